use shared::{AlertListResponse, AlertType, BudgetAlert};

use crate::domain::alert_service::AlertFeed;
use crate::domain::models::{self, AlertKind};

pub struct AlertMapper;

impl AlertMapper {
    pub fn kind_to_dto(kind: AlertKind) -> AlertType {
        match kind {
            AlertKind::Threshold => AlertType::Threshold,
            AlertKind::OverBudget => AlertType::OverBudget,
            AlertKind::MonthlySummary => AlertType::MonthlySummary,
        }
    }

    pub fn to_dto(domain: models::BudgetAlert) -> BudgetAlert {
        BudgetAlert {
            id: domain.id,
            user_id: domain.user_id,
            budget_id: domain.budget_id,
            alert_type: Self::kind_to_dto(domain.kind),
            message: domain.message,
            is_read: domain.is_read,
            created_at: domain.created_at,
        }
    }

    pub fn to_list_response(feed: AlertFeed) -> AlertListResponse {
        AlertListResponse {
            alerts: feed.alerts.into_iter().map(Self::to_dto).collect(),
            unread_count: feed.unread_count,
        }
    }
}
