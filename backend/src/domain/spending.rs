//! Budget spending rules.
//!
//! Pure functions over in-memory records: how much of a budget has been
//! spent, what status that puts it in, and which alerts are due.

use crate::domain::models::{AlertKind, Budget, Expense};

/// Lower bound of the warning band, in percent of the budget
pub const WARNING_THRESHOLD_PERCENT: f64 = 75.0;
/// Upper bound (exclusive) of the warning band, in percent of the budget
pub const CRITICAL_THRESHOLD_PERCENT: f64 = 90.0;
pub const FULL_PERCENT: f64 = 100.0;

/// Display tier of a budget's progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpendingStatus {
    OnTrack,
    Warning,
    Critical,
    OverBudget,
}

/// Alerts the spending rules can raise. Stored rows may carry other
/// `AlertKind`s, but these are the only ones ever generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueAlert {
    Threshold,
    OverBudget,
}

impl DueAlert {
    pub fn kind(self) -> AlertKind {
        match self {
            DueAlert::Threshold => AlertKind::Threshold,
            DueAlert::OverBudget => AlertKind::OverBudget,
        }
    }
}

pub fn total_amount<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> f64 {
    expenses.into_iter().map(|expense| expense.amount).sum()
}

/// `actual / budgeted * 100`, or 0 when nothing was budgeted
pub fn percentage_used(actual_spending: f64, budget_amount: f64) -> f64 {
    if budget_amount > 0.0 {
        actual_spending / budget_amount * 100.0
    } else {
        0.0
    }
}

/// Sum of the expenses that count against `budget`: same user, same
/// category, dated inside the budget month
pub fn spending_against(budget: &Budget, expenses: &[Expense]) -> f64 {
    total_amount(expenses.iter().filter(|expense| {
        expense.user_id == budget.user_id
            && expense.category == budget.category
            && budget.month.contains(expense.date)
    }))
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetSpending {
    pub budget: Budget,
    pub actual_spending: f64,
    /// Negative once the budget is exceeded
    pub remaining: f64,
    pub percentage_used: f64,
    pub is_over_budget: bool,
}

impl BudgetSpending {
    pub fn derive(budget: Budget, actual_spending: f64) -> Self {
        let remaining = budget.amount - actual_spending;
        let percentage_used = percentage_used(actual_spending, budget.amount);
        let is_over_budget = actual_spending > budget.amount;
        Self {
            budget,
            actual_spending,
            remaining,
            percentage_used,
            is_over_budget,
        }
    }

    pub fn from_expenses(budget: Budget, expenses: &[Expense]) -> Self {
        let actual_spending = spending_against(&budget, expenses);
        Self::derive(budget, actual_spending)
    }

    pub fn status(&self) -> SpendingStatus {
        let percentage = self.percentage_used;
        if percentage >= FULL_PERCENT {
            SpendingStatus::OverBudget
        } else if percentage >= CRITICAL_THRESHOLD_PERCENT {
            SpendingStatus::Critical
        } else if percentage >= WARNING_THRESHOLD_PERCENT {
            SpendingStatus::Warning
        } else {
            SpendingStatus::OnTrack
        }
    }

    /// Alert kinds the current spending calls for, before de-duplication
    /// against alerts that already exist
    pub fn due_alerts(&self) -> Vec<DueAlert> {
        let mut due = Vec::new();
        if (WARNING_THRESHOLD_PERCENT..CRITICAL_THRESHOLD_PERCENT).contains(&self.percentage_used) {
            due.push(DueAlert::Threshold);
        }
        if self.is_over_budget {
            due.push(DueAlert::OverBudget);
        }
        due
    }

    pub fn alert_message(&self, alert: DueAlert) -> String {
        let category = self.budget.category;
        match alert {
            DueAlert::Threshold => format!(
                "Warning: You've used {:.1}% of your {} budget.",
                self.percentage_used, category
            ),
            DueAlert::OverBudget => format!(
                "Alert: You've exceeded your {} budget by ${:.2}.",
                category,
                self.actual_spending - self.budget.amount
            ),
        }
    }
}
