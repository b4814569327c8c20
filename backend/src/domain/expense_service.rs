//! Expense service domain logic for the spending tracker.
use shared::{CreateExpenseRequest, ExpenseFilters, UpdateExpenseRequest};
use tracing::info;

use crate::domain::error::DomainError;
use crate::domain::models::{
    expense::{normalize_description, parse_date, validate_amount},
    now_timestamp, Expense, ExpenseCategory, ExpenseQuery, PaymentMethod,
};
use crate::storage::{DbConnection, ExpenseRepository};

/// An expense as it was before and after an update
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRevision {
    pub before: Expense,
    pub after: Expense,
}

#[derive(Clone)]
pub struct ExpenseService {
    expense_repository: ExpenseRepository,
}

impl ExpenseService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            expense_repository: ExpenseRepository::new(db),
        }
    }

    pub async fn create_expense(&self, user_id: &str, request: CreateExpenseRequest) -> Result<Expense, DomainError> {
        let amount = validate_amount(request.amount)?;
        let category = ExpenseCategory::parse(&request.category)?;
        let date = parse_date(&request.date)?;
        let payment_method = PaymentMethod::parse(&request.payment_method)?;
        let description = normalize_description(request.description.as_deref())?;

        let now = now_timestamp();
        let expense = Expense {
            id: Expense::generate_id(),
            user_id: user_id.to_string(),
            amount,
            category,
            date,
            description,
            payment_method,
            created_at: now.clone(),
            updated_at: now,
        };

        self.expense_repository.store_expense(&expense).await?;
        info!(user_id, expense_id = %expense.id, amount, category = %category, "Created expense");
        Ok(expense)
    }

    pub async fn get_expense(&self, user_id: &str, expense_id: &str) -> Result<Expense, DomainError> {
        self.expense_repository
            .get_expense(user_id, expense_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Expense", expense_id))
    }

    /// The user's expenses matching `filters`, newest first. Blank filter
    /// values are ignored.
    pub async fn list_expenses(&self, user_id: &str, filters: &ExpenseFilters) -> Result<Vec<Expense>, DomainError> {
        let query = Self::query_from_filters(filters)?;
        Ok(self.expense_repository.list_expenses(user_id, &query).await?)
    }

    pub async fn update_expense(
        &self,
        user_id: &str,
        expense_id: &str,
        request: UpdateExpenseRequest,
    ) -> Result<ExpenseRevision, DomainError> {
        let before = self.get_expense(user_id, expense_id).await?;
        let mut after = before.clone();

        if let Some(amount) = request.amount {
            after.amount = validate_amount(amount)?;
        }
        if let Some(category) = request.category.as_deref() {
            after.category = ExpenseCategory::parse(category)?;
        }
        if let Some(date) = request.date.as_deref() {
            after.date = parse_date(date)?;
        }
        if let Some(description) = request.description.as_deref() {
            after.description = normalize_description(Some(description))?;
        }
        if let Some(method) = request.payment_method.as_deref() {
            after.payment_method = PaymentMethod::parse(method)?;
        }
        after.updated_at = now_timestamp();

        if !self.expense_repository.update_expense(&after).await? {
            return Err(DomainError::not_found("Expense", expense_id));
        }

        info!(user_id, expense_id, "Updated expense");
        Ok(ExpenseRevision { before, after })
    }

    /// Delete an expense, returning it as it was
    pub async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<Expense, DomainError> {
        let expense = self.get_expense(user_id, expense_id).await?;
        if !self.expense_repository.delete_expense(user_id, expense_id).await? {
            return Err(DomainError::not_found("Expense", expense_id));
        }
        info!(user_id, expense_id, "Deleted expense");
        Ok(expense)
    }

    fn query_from_filters(filters: &ExpenseFilters) -> Result<ExpenseQuery, DomainError> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Ok(ExpenseQuery {
            start_date: present(&filters.start_date).map(|d| parse_date(&d)).transpose()?,
            end_date: present(&filters.end_date).map(|d| parse_date(&d)).transpose()?,
            category: present(&filters.category).map(|c| ExpenseCategory::parse(&c)).transpose()?,
            payment_method: present(&filters.payment_method)
                .map(|m| PaymentMethod::parse(&m))
                .transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ValidationError;
    use chrono::NaiveDate;

    async fn create_test_service() -> ExpenseService {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        ExpenseService::new(db)
    }

    fn request(amount: f64, category: &str, date: &str) -> CreateExpenseRequest {
        CreateExpenseRequest {
            amount,
            category: category.to_string(),
            date: date.to_string(),
            description: None,
            payment_method: "Debit Card".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_expense_basic() {
        let service = create_test_service().await;
        let mut req = request(42.75, "Shopping", "2024-03-09");
        req.description = Some("  Shoes ".to_string());

        let expense = service.create_expense("alice", req).await.unwrap();
        assert_eq!(expense.user_id, "alice");
        assert_eq!(expense.amount, 42.75);
        assert_eq!(expense.category, ExpenseCategory::Shopping);
        assert_eq!(expense.date, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(expense.description.as_deref(), Some("Shoes"));
        assert_eq!(expense.payment_method, PaymentMethod::DebitCard);
        assert_eq!(expense.created_at, expense.updated_at);

        let fetched = service.get_expense("alice", &expense.id).await.unwrap();
        assert_eq!(fetched, expense);
    }

    #[tokio::test]
    async fn test_create_expense_validation() {
        let service = create_test_service().await;

        let zero = service.create_expense("alice", request(0.0, "Shopping", "2024-03-09")).await;
        assert!(matches!(zero, Err(DomainError::Validation(ValidationError::NonPositiveAmount))));

        let no_category = service.create_expense("alice", request(5.0, "", "2024-03-09")).await;
        assert!(matches!(no_category, Err(DomainError::Validation(ValidationError::MissingCategory))));

        let bad_date = service.create_expense("alice", request(5.0, "Shopping", "09/03/2024")).await;
        assert!(matches!(bad_date, Err(DomainError::Validation(ValidationError::InvalidDate(_)))));

        let mut bad_method = request(5.0, "Shopping", "2024-03-09");
        bad_method.payment_method = "Barter".to_string();
        let result = service.create_expense("alice", bad_method).await;
        assert!(matches!(result, Err(DomainError::Validation(ValidationError::UnknownPaymentMethod(_)))));

        assert!(service.list_expenses("alice", &ExpenseFilters::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_expenses_with_filters() {
        let service = create_test_service().await;
        service.create_expense("alice", request(10.0, "Travel", "2024-03-01")).await.unwrap();
        service.create_expense("alice", request(20.0, "Travel", "2024-03-20")).await.unwrap();
        service.create_expense("alice", request(30.0, "Utilities", "2024-03-21")).await.unwrap();

        let filters = ExpenseFilters {
            start_date: Some("2024-03-10".to_string()),
            end_date: None,
            category: Some("Travel".to_string()),
            payment_method: Some("".to_string()),
        };
        let listed = service.list_expenses("alice", &filters).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].amount, 20.0);

        let all = service.list_expenses("alice", &ExpenseFilters::default()).await.unwrap();
        let amounts: Vec<f64> = all.iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![30.0, 20.0, 10.0]);
    }

    #[tokio::test]
    async fn test_list_expenses_rejects_bad_filter() {
        let service = create_test_service().await;
        let filters = ExpenseFilters {
            category: Some("Crypto".to_string()),
            ..ExpenseFilters::default()
        };
        let result = service.list_expenses("alice", &filters).await;
        assert!(matches!(result, Err(DomainError::Validation(ValidationError::UnknownCategory(_)))));
    }

    #[tokio::test]
    async fn test_update_expense_partial() {
        let service = create_test_service().await;
        let mut req = request(10.0, "Travel", "2024-03-01");
        req.description = Some("Bus".to_string());
        let created = service.create_expense("alice", req).await.unwrap();

        let update = UpdateExpenseRequest {
            amount: Some(12.0),
            date: Some("2024-04-02".to_string()),
            description: Some("".to_string()),
            ..UpdateExpenseRequest::default()
        };
        let revision = service.update_expense("alice", &created.id, update).await.unwrap();

        assert_eq!(revision.before, created);
        assert_eq!(revision.after.amount, 12.0);
        assert_eq!(revision.after.category, ExpenseCategory::Travel);
        assert_eq!(revision.after.date, NaiveDate::from_ymd_opt(2024, 4, 2).unwrap());
        assert_eq!(revision.after.description, None);
        assert_eq!(revision.after.created_at, created.created_at);

        let stored = service.get_expense("alice", &created.id).await.unwrap();
        assert_eq!(stored, revision.after);
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_amount_without_writing() {
        let service = create_test_service().await;
        let created = service.create_expense("alice", request(10.0, "Travel", "2024-03-01")).await.unwrap();

        let update = UpdateExpenseRequest {
            amount: Some(-1.0),
            ..UpdateExpenseRequest::default()
        };
        assert!(service.update_expense("alice", &created.id, update).await.is_err());
        assert_eq!(service.get_expense("alice", &created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_other_users_cannot_touch_expense() {
        let service = create_test_service().await;
        let created = service.create_expense("alice", request(10.0, "Travel", "2024-03-01")).await.unwrap();

        assert!(matches!(
            service.get_expense("bob", &created.id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service
                .update_expense("bob", &created.id, UpdateExpenseRequest::default())
                .await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service.delete_expense("bob", &created.id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(service.get_expense("alice", &created.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_expense() {
        let service = create_test_service().await;
        let created = service.create_expense("alice", request(10.0, "Travel", "2024-03-01")).await.unwrap();

        let deleted = service.delete_expense("alice", &created.id).await.unwrap();
        assert_eq!(deleted, created);
        assert!(matches!(
            service.delete_expense("alice", &created.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
