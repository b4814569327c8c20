//! Dashboard statistics for the spending tracker.
use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::models::{BudgetMonth, Expense, ExpenseCategory, ExpenseQuery};
use crate::domain::spending::{percentage_used, total_amount};
use crate::storage::{DbConnection, ExpenseRepository};

/// Months of history before the current one shown in the trend
pub const TREND_MONTHS_BACK: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: ExpenseCategory,
    pub amount: f64,
    /// Share of the month's total, 0-100
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthTotal {
    pub month: BudgetMonth,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total_this_month: f64,
    pub total_last_month: f64,
    pub percentage_change: f64,
    pub category_breakdown: Vec<CategoryShare>,
    pub monthly_trend: Vec<MonthTotal>,
}

#[derive(Clone)]
pub struct DashboardService {
    expense_repository: ExpenseRepository,
}

impl DashboardService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            expense_repository: ExpenseRepository::new(db),
        }
    }

    pub async fn dashboard_stats(&self, user_id: &str, today: NaiveDate) -> Result<DashboardSummary, DomainError> {
        let this_month = BudgetMonth::containing(today);
        let last_month = this_month.previous();
        let trend_start = this_month.months_back(TREND_MONTHS_BACK);

        let current = self
            .expense_repository
            .list_expenses(user_id, &ExpenseQuery::between(this_month.first_day(), this_month.last_day()))
            .await?;
        let previous = self
            .expense_repository
            .list_expenses(user_id, &ExpenseQuery::between(last_month.first_day(), last_month.last_day()))
            .await?;
        // No upper bound: anything dated after today still lands in its own month
        let trend = self
            .expense_repository
            .list_expenses(user_id, &ExpenseQuery::since(trend_start.first_day()))
            .await?;

        debug!(
            user_id,
            month = %this_month,
            current = current.len(),
            previous = previous.len(),
            trend = trend.len(),
            "Loaded dashboard expenses"
        );
        Ok(summarize(&current, &previous, &trend))
    }
}

/// Build the dashboard from already-scoped expense sets
pub fn summarize(current: &[Expense], previous: &[Expense], trend: &[Expense]) -> DashboardSummary {
    let total_this_month = total_amount(current);
    let total_last_month = total_amount(previous);
    let percentage_change = if total_last_month > 0.0 {
        (total_this_month - total_last_month) / total_last_month * 100.0
    } else {
        0.0
    };

    DashboardSummary {
        total_this_month,
        total_last_month,
        percentage_change,
        category_breakdown: category_breakdown(current, total_this_month),
        monthly_trend: monthly_trend(trend),
    }
}

fn category_breakdown(expenses: &[Expense], total: f64) -> Vec<CategoryShare> {
    let mut shares: Vec<CategoryShare> = ExpenseCategory::ALL
        .iter()
        .filter_map(|&category| {
            let matching: Vec<&Expense> = expenses.iter().filter(|e| e.category == category).collect();
            if matching.is_empty() {
                return None;
            }
            let amount = total_amount(matching);
            Some(CategoryShare {
                category,
                amount,
                percentage: percentage_used(amount, total),
            })
        })
        .collect();

    shares.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    shares
}

fn monthly_trend(expenses: &[Expense]) -> Vec<MonthTotal> {
    let mut by_month: BTreeMap<BudgetMonth, f64> = BTreeMap::new();
    for expense in expenses {
        *by_month.entry(BudgetMonth::containing(expense.date)).or_insert(0.0) += expense.amount;
    }
    by_month
        .into_iter()
        .map(|(month, amount)| MonthTotal { month, amount })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::expense_service::ExpenseService;
    use crate::domain::models::{PaymentMethod, DATE_FORMAT};
    use shared::CreateExpenseRequest;

    fn expense(category: ExpenseCategory, day: &str, amount: f64) -> Expense {
        Expense {
            id: Expense::generate_id(),
            user_id: "alice".to_string(),
            amount,
            category,
            date: NaiveDate::parse_from_str(day, DATE_FORMAT).unwrap(),
            description: None,
            payment_method: PaymentMethod::Cash,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_summarize_totals_and_change() {
        let current = vec![
            expense(ExpenseCategory::Shopping, "2024-03-02", 30.0),
            expense(ExpenseCategory::Utilities, "2024-03-05", 90.0),
        ];
        let previous = vec![expense(ExpenseCategory::Shopping, "2024-02-10", 100.0)];

        let summary = summarize(&current, &previous, &[]);
        assert_eq!(summary.total_this_month, 120.0);
        assert_eq!(summary.total_last_month, 100.0);
        assert_eq!(summary.percentage_change, 20.0);
    }

    #[test]
    fn test_percentage_change_is_zero_without_last_month() {
        let current = vec![expense(ExpenseCategory::Shopping, "2024-03-02", 30.0)];
        let summary = summarize(&current, &[], &[]);
        assert_eq!(summary.percentage_change, 0.0);
    }

    #[test]
    fn test_category_breakdown_sorted_by_amount() {
        let current = vec![
            expense(ExpenseCategory::Shopping, "2024-03-02", 20.0),
            expense(ExpenseCategory::Travel, "2024-03-03", 50.0),
            expense(ExpenseCategory::Shopping, "2024-03-04", 5.0),
            expense(ExpenseCategory::Other, "2024-03-05", 25.0),
        ];

        let summary = summarize(&current, &[], &[]);
        let breakdown: Vec<(ExpenseCategory, f64, f64)> = summary
            .category_breakdown
            .iter()
            .map(|share| (share.category, share.amount, share.percentage))
            .collect();
        assert_eq!(
            breakdown,
            vec![
                (ExpenseCategory::Travel, 50.0, 50.0),
                (ExpenseCategory::Shopping, 25.0, 25.0),
                (ExpenseCategory::Other, 25.0, 25.0),
            ]
        );
    }

    #[test]
    fn test_empty_month_has_empty_breakdown() {
        let summary = summarize(&[], &[], &[]);
        assert_eq!(summary.total_this_month, 0.0);
        assert!(summary.category_breakdown.is_empty());
        assert!(summary.monthly_trend.is_empty());
    }

    #[test]
    fn test_monthly_trend_is_chronological_and_sparse() {
        let trend = vec![
            expense(ExpenseCategory::Other, "2024-03-10", 10.0),
            expense(ExpenseCategory::Other, "2023-12-01", 5.0),
            expense(ExpenseCategory::Travel, "2024-03-01", 2.5),
            expense(ExpenseCategory::Other, "2024-01-31", 7.0),
        ];

        let summary = summarize(&[], &[], &trend);
        let points: Vec<(String, f64)> = summary
            .monthly_trend
            .iter()
            .map(|point| (point.month.label(), point.amount))
            .collect();
        assert_eq!(
            points,
            vec![
                ("Dec 2023".to_string(), 5.0),
                ("Jan 2024".to_string(), 7.0),
                ("Mar 2024".to_string(), 12.5),
            ]
        );
    }

    #[tokio::test]
    async fn test_dashboard_stats_reads_the_right_windows() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let expenses = ExpenseService::new(db.clone());
        let dashboard = DashboardService::new(db);

        for (amount, date) in [
            (10.0, "2024-06-30"),
            (20.0, "2024-07-01"),
            (40.0, "2024-07-31"),
            (8.0, "2024-02-01"),
            (1.0, "2024-01-31"),
            (3.0, "2024-09-15"),
        ] {
            expenses
                .create_expense(
                    "alice",
                    CreateExpenseRequest {
                        amount,
                        category: "Other".to_string(),
                        date: date.to_string(),
                        description: None,
                        payment_method: "Cash".to_string(),
                    },
                )
                .await
                .unwrap();
        }

        let today = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        let stats = dashboard.dashboard_stats("alice", today).await.unwrap();

        assert_eq!(stats.total_this_month, 60.0);
        assert_eq!(stats.total_last_month, 10.0);
        assert_eq!(stats.percentage_change, 500.0);

        let labels: Vec<String> = stats.monthly_trend.iter().map(|p| p.month.label()).collect();
        assert_eq!(labels, vec!["Feb 2024", "Jun 2024", "Jul 2024", "Sep 2024"]);

        let other_user = dashboard.dashboard_stats("bob", today).await.unwrap();
        assert_eq!(other_user.total_this_month, 0.0);
    }
}
