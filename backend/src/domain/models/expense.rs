//! Domain model for an expense.
use chrono::{Datelike, NaiveDate};
use std::fmt;

use crate::domain::error::ValidationError;
use crate::domain::models::{month::SUPPORTED_YEARS, DATE_FORMAT};

/// Longest accepted description, in characters
pub const MAX_DESCRIPTION_LENGTH: usize = 256;

/// Smallest amount accepted for expenses and budgets
pub const MIN_AMOUNT: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExpenseCategory {
    FoodAndDining,
    Transportation,
    Utilities,
    Entertainment,
    Healthcare,
    Shopping,
    Education,
    Travel,
    Insurance,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 10] = [
        ExpenseCategory::FoodAndDining,
        ExpenseCategory::Transportation,
        ExpenseCategory::Utilities,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Healthcare,
        ExpenseCategory::Shopping,
        ExpenseCategory::Education,
        ExpenseCategory::Travel,
        ExpenseCategory::Insurance,
        ExpenseCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::FoodAndDining => "Food & Dining",
            ExpenseCategory::Transportation => "Transportation",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Healthcare => "Healthcare",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Education => "Education",
            ExpenseCategory::Travel => "Travel",
            ExpenseCategory::Insurance => "Insurance",
            ExpenseCategory::Other => "Other",
        }
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == trimmed)
            .ok_or_else(|| ValidationError::UnknownCategory(trimmed.to_string()))
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    DebitCard,
    DigitalWallet,
    BankTransfer,
    Check,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 6] = [
        PaymentMethod::Cash,
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::DigitalWallet,
        PaymentMethod::BankTransfer,
        PaymentMethod::Check,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::DigitalWallet => "Digital Wallet",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::Check => "Check",
        }
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingPaymentMethod);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|method| method.as_str() == trimmed)
            .ok_or_else(|| ValidationError::UnknownPaymentMethod(trimmed.to_string()))
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: String,
    pub user_id: String,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub payment_method: PaymentMethod,
    pub created_at: String,
    pub updated_at: String,
}

impl Expense {
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Filters for listing a user's expenses; `None` means unrestricted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: Option<ExpenseCategory>,
    pub payment_method: Option<PaymentMethod>,
}

impl ExpenseQuery {
    /// Expenses of one category within an inclusive date range
    pub fn category_between(category: ExpenseCategory, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
            category: Some(category),
            payment_method: None,
        }
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
            ..Self::default()
        }
    }

    pub fn since(start: NaiveDate) -> Self {
        Self {
            start_date: Some(start),
            ..Self::default()
        }
    }
}

pub fn validate_amount(amount: f64) -> Result<f64, ValidationError> {
    if amount.is_finite() && amount >= MIN_AMOUNT {
        Ok(amount)
    } else {
        Err(ValidationError::NonPositiveAmount)
    }
}

pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingDate);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .ok()
        .filter(|date| SUPPORTED_YEARS.contains(&date.year()))
        .ok_or_else(|| ValidationError::InvalidDate(trimmed.to_string()))
}

/// Blank descriptions are stored as absent
pub fn normalize_description(input: Option<&str>) -> Result<Option<String>, ValidationError> {
    match input.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) if text.chars().count() > MAX_DESCRIPTION_LENGTH => {
            Err(ValidationError::DescriptionTooLong)
        }
        Some(text) => Ok(Some(text.to_string())),
    }
}
