//! Domain model for a monthly category budget.
use crate::domain::models::{expense::ExpenseCategory, month::BudgetMonth};

#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub month: BudgetMonth,
    pub created_at: String,
    pub updated_at: String,
}

impl Budget {
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
