use shared::{Budget, BudgetListResponse, BudgetStatus, BudgetWithSpending};

use crate::domain::models::{self, BudgetMonth};
use crate::domain::spending::{BudgetSpending, SpendingStatus};

pub struct BudgetMapper;

impl BudgetMapper {
    pub fn to_dto(domain: models::Budget) -> Budget {
        Budget {
            id: domain.id,
            user_id: domain.user_id,
            amount: domain.amount,
            category: domain.category.as_str().to_string(),
            month: domain.month.to_string(),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }

    pub fn status_to_dto(status: SpendingStatus) -> BudgetStatus {
        match status {
            SpendingStatus::OnTrack => BudgetStatus::OnTrack,
            SpendingStatus::Warning => BudgetStatus::Warning,
            SpendingStatus::Critical => BudgetStatus::Critical,
            SpendingStatus::OverBudget => BudgetStatus::OverBudget,
        }
    }

    pub fn spending_to_dto(spending: BudgetSpending) -> BudgetWithSpending {
        let status = Self::status_to_dto(spending.status());
        BudgetWithSpending {
            budget: Self::to_dto(spending.budget),
            actual_spending: spending.actual_spending,
            remaining: spending.remaining,
            percentage_used: spending.percentage_used,
            is_over_budget: spending.is_over_budget,
            status,
        }
    }

    pub fn to_list_response(month: BudgetMonth, spending: Vec<BudgetSpending>) -> BudgetListResponse {
        BudgetListResponse {
            month: month.to_string(),
            budgets: spending.into_iter().map(Self::spending_to_dto).collect(),
        }
    }
}
