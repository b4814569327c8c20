use crate::storage::StorageError;

/// Rejected user input
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Amount must be greater than 0")]
    NonPositiveAmount,
    #[error("Category is required")]
    MissingCategory,
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("Payment method is required")]
    MissingPaymentMethod,
    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),
    #[error("Date is required")]
    MissingDate,
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Month is required")]
    MissingMonth,
    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),
    #[error("Description is too long")]
    DescriptionTooLong,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: &str) -> Self {
        DomainError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
