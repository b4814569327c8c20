use shared::{CategoryBreakdown, DashboardStats, MonthlyTrendPoint};

use crate::domain::dashboard_service::DashboardSummary;

pub struct DashboardMapper;

impl DashboardMapper {
    pub fn to_dto(summary: DashboardSummary) -> DashboardStats {
        DashboardStats {
            total_this_month: summary.total_this_month,
            total_last_month: summary.total_last_month,
            percentage_change: summary.percentage_change,
            category_breakdown: summary
                .category_breakdown
                .into_iter()
                .map(|share| CategoryBreakdown {
                    category: share.category.as_str().to_string(),
                    amount: share.amount,
                    percentage: share.percentage,
                })
                .collect(),
            monthly_trend: summary
                .monthly_trend
                .into_iter()
                .map(|point| MonthlyTrendPoint {
                    month: point.month.label(),
                    amount: point.amount,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard_service::{CategoryShare, MonthTotal};
    use crate::domain::models::{BudgetMonth, ExpenseCategory};

    #[test]
    fn test_trend_uses_chart_labels() {
        let stats = DashboardMapper::to_dto(DashboardSummary {
            total_this_month: 30.0,
            total_last_month: 0.0,
            percentage_change: 0.0,
            category_breakdown: vec![CategoryShare {
                category: ExpenseCategory::Education,
                amount: 30.0,
                percentage: 100.0,
            }],
            monthly_trend: vec![MonthTotal {
                month: BudgetMonth::parse("2024-03").unwrap(),
                amount: 30.0,
            }],
        });

        assert_eq!(stats.category_breakdown[0].category, "Education");
        assert_eq!(stats.monthly_trend[0].month, "Mar 2024");
    }
}
