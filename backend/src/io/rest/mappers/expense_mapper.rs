use shared::{Expense, ExpenseListResponse};

use crate::domain::models::{self, DATE_FORMAT};
use crate::domain::spending::total_amount;

pub struct ExpenseMapper;

impl ExpenseMapper {
    pub fn to_dto(domain: models::Expense) -> Expense {
        Expense {
            id: domain.id,
            user_id: domain.user_id,
            amount: domain.amount,
            category: domain.category.as_str().to_string(),
            date: domain.date.format(DATE_FORMAT).to_string(),
            description: domain.description,
            payment_method: domain.payment_method.as_str().to_string(),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }

    /// List response carrying the total of exactly the returned expenses
    pub fn to_list_response(domain_expenses: Vec<models::Expense>) -> ExpenseListResponse {
        let total_amount = total_amount(&domain_expenses);
        ExpenseListResponse {
            expenses: domain_expenses.into_iter().map(Self::to_dto).collect(),
            total_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ExpenseCategory, PaymentMethod};
    use chrono::NaiveDate;

    fn domain_expense(amount: f64) -> models::Expense {
        models::Expense {
            id: "e1".to_string(),
            user_id: "alice".to_string(),
            amount,
            category: ExpenseCategory::FoodAndDining,
            date: NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
            description: Some("Tacos".to_string()),
            payment_method: PaymentMethod::DigitalWallet,
            created_at: "2024-03-07T12:00:00.000000Z".to_string(),
            updated_at: "2024-03-07T12:00:00.000000Z".to_string(),
        }
    }

    #[test]
    fn test_to_dto_renders_names_and_date() {
        let dto = ExpenseMapper::to_dto(domain_expense(9.5));
        assert_eq!(dto.category, "Food & Dining");
        assert_eq!(dto.payment_method, "Digital Wallet");
        assert_eq!(dto.date, "2024-03-07");
        assert_eq!(dto.description.as_deref(), Some("Tacos"));
    }

    #[test]
    fn test_list_response_total() {
        let response = ExpenseMapper::to_list_response(vec![domain_expense(9.5), domain_expense(0.5)]);
        assert_eq!(response.expenses.len(), 2);
        assert_eq!(response.total_amount, 10.0);

        let empty = ExpenseMapper::to_list_response(Vec::new());
        assert_eq!(empty.total_amount, 0.0);
    }
}
