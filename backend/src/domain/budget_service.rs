//! Budget service domain logic for the spending tracker.
//!
//! Budgets are monthly limits per category. Whenever a budget is read it is
//! paired with the spending recorded against it, derived fresh from the
//! user's expenses.

use chrono::NaiveDate;
use shared::{CreateBudgetRequest, UpdateBudgetRequest};
use tracing::{info, warn};

use crate::domain::error::DomainError;
use crate::domain::models::{
    expense::validate_amount, now_timestamp, Budget, BudgetMonth, ExpenseCategory, ExpenseQuery,
};
use crate::domain::spending::BudgetSpending;
use crate::storage::{BudgetRepository, DbConnection, ExpenseRepository, StorageError};

#[derive(Clone)]
pub struct BudgetService {
    budget_repository: BudgetRepository,
    expense_repository: ExpenseRepository,
}

impl BudgetService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            budget_repository: BudgetRepository::new(db.clone()),
            expense_repository: ExpenseRepository::new(db),
        }
    }

    /// Month named by `requested`, or the month containing `today` when
    /// nothing (or only whitespace) was given
    pub fn resolve_month(requested: Option<&str>, today: NaiveDate) -> Result<BudgetMonth, DomainError> {
        match requested.map(str::trim).filter(|m| !m.is_empty()) {
            Some(month) => Ok(BudgetMonth::parse(month)?),
            None => Ok(BudgetMonth::containing(today)),
        }
    }

    pub async fn create_budget(&self, user_id: &str, request: CreateBudgetRequest) -> Result<Budget, DomainError> {
        let amount = validate_amount(request.amount)?;
        let category = ExpenseCategory::parse(&request.category)?;
        let month = BudgetMonth::parse(&request.month)?;

        if self.budget_repository.find_budget(user_id, category, month).await?.is_some() {
            warn!(user_id, category = %category, month = %month, "Rejected duplicate budget");
            return Err(Self::duplicate(category, month));
        }

        let now = now_timestamp();
        let budget = Budget {
            id: Budget::generate_id(),
            user_id: user_id.to_string(),
            amount,
            category,
            month,
            created_at: now.clone(),
            updated_at: now,
        };

        self.budget_repository
            .store_budget(&budget)
            .await
            .map_err(|e| Self::conflict_or_storage(e, category, month))?;

        info!(user_id, budget_id = %budget.id, category = %category, month = %month, amount, "Created budget");
        Ok(budget)
    }

    /// All of the user's budgets for `month`, each with its spending
    pub async fn list_budgets(&self, user_id: &str, month: BudgetMonth) -> Result<Vec<BudgetSpending>, DomainError> {
        let budgets = self.budget_repository.list_budgets_for_month(user_id, month).await?;
        if budgets.is_empty() {
            return Ok(Vec::new());
        }

        let expenses = self
            .expense_repository
            .list_expenses(user_id, &ExpenseQuery::between(month.first_day(), month.last_day()))
            .await?;

        Ok(budgets
            .into_iter()
            .map(|budget| BudgetSpending::from_expenses(budget, &expenses))
            .collect())
    }

    pub async fn get_budget(&self, user_id: &str, budget_id: &str) -> Result<BudgetSpending, DomainError> {
        let budget = self
            .budget_repository
            .get_budget(user_id, budget_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Budget", budget_id))?;
        self.with_spending(budget).await
    }

    pub async fn update_budget(
        &self,
        user_id: &str,
        budget_id: &str,
        request: UpdateBudgetRequest,
    ) -> Result<Budget, DomainError> {
        let mut budget = self
            .budget_repository
            .get_budget(user_id, budget_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Budget", budget_id))?;

        if let Some(amount) = request.amount {
            budget.amount = validate_amount(amount)?;
        }
        if let Some(category) = request.category.as_deref() {
            budget.category = ExpenseCategory::parse(category)?;
        }
        if let Some(month) = request.month.as_deref() {
            budget.month = BudgetMonth::parse(month)?;
        }

        let (category, month) = (budget.category, budget.month);
        if let Some(existing) = self.budget_repository.find_budget(user_id, category, month).await? {
            if existing.id != budget.id {
                return Err(Self::duplicate(category, month));
            }
        }

        budget.updated_at = now_timestamp();
        let updated = self
            .budget_repository
            .update_budget(&budget)
            .await
            .map_err(|e| Self::conflict_or_storage(e, category, month))?;
        if !updated {
            return Err(DomainError::not_found("Budget", budget_id));
        }

        info!(user_id, budget_id, "Updated budget");
        Ok(budget)
    }

    pub async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<(), DomainError> {
        if !self.budget_repository.delete_budget(user_id, budget_id).await? {
            return Err(DomainError::not_found("Budget", budget_id));
        }
        info!(user_id, budget_id, "Deleted budget");
        Ok(())
    }

    async fn with_spending(&self, budget: Budget) -> Result<BudgetSpending, DomainError> {
        let query = ExpenseQuery::category_between(budget.category, budget.month.first_day(), budget.month.last_day());
        let expenses = self.expense_repository.list_expenses(&budget.user_id, &query).await?;
        Ok(BudgetSpending::from_expenses(budget, &expenses))
    }

    fn duplicate(category: ExpenseCategory, month: BudgetMonth) -> DomainError {
        DomainError::Conflict(format!("A {} budget for {} already exists", category, month))
    }

    fn conflict_or_storage(err: StorageError, category: ExpenseCategory, month: BudgetMonth) -> DomainError {
        match err {
            StorageError::UniqueViolation(_) => Self::duplicate(category, month),
            other => DomainError::Storage(other),
        }
    }
}
