//! Alert service domain logic for the spending tracker.
//!
//! Alerts are raised from budget spending and are never edited afterwards,
//! apart from being marked read.

use tracing::{debug, info};

use crate::domain::budget_service::BudgetService;
use crate::domain::error::DomainError;
use crate::domain::models::{now_timestamp, BudgetAlert, BudgetMonth};
use crate::domain::spending::BudgetSpending;
use crate::storage::{BudgetAlertRepository, DbConnection};

pub const DEFAULT_ALERT_LIMIT: u32 = 50;
pub const MAX_ALERT_LIMIT: u32 = 200;

/// A page of alerts plus the user's total unread count
#[derive(Debug, Clone, PartialEq)]
pub struct AlertFeed {
    pub alerts: Vec<BudgetAlert>,
    pub unread_count: u64,
}

#[derive(Clone)]
pub struct AlertService {
    alert_repository: BudgetAlertRepository,
}

impl AlertService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            alert_repository: BudgetAlertRepository::new(db),
        }
    }

    /// Store every alert the given spending calls for, skipping kinds that
    /// already have an unread alert for the same budget. Returns the alerts
    /// that were created.
    pub async fn evaluate_budgets(&self, spending: &[BudgetSpending]) -> Result<Vec<BudgetAlert>, DomainError> {
        let mut created = Vec::new();

        for entry in spending {
            let budget = &entry.budget;
            for due in entry.due_alerts() {
                let alert = BudgetAlert {
                    id: BudgetAlert::generate_id(),
                    user_id: budget.user_id.clone(),
                    budget_id: Some(budget.id.clone()),
                    kind: due.kind(),
                    message: entry.alert_message(due),
                    is_read: false,
                    created_at: now_timestamp(),
                };

                // Not stored when the budget already has an unread alert of this kind
                if !self.alert_repository.store_alert(&alert).await? {
                    debug!(budget_id = %budget.id, kind = %alert.kind, "Unread alert already present");
                    continue;
                }
                info!(user_id = %alert.user_id, budget_id = %budget.id, kind = %alert.kind, "Raised budget alert");
                created.push(alert);
            }
        }

        Ok(created)
    }

    /// Re-derive the user's budgets for `month` and raise any alerts now due
    pub async fn check_month(
        &self,
        budget_service: &BudgetService,
        user_id: &str,
        month: BudgetMonth,
    ) -> Result<Vec<BudgetAlert>, DomainError> {
        let spending = budget_service.list_budgets(user_id, month).await?;
        self.evaluate_budgets(&spending).await
    }

    /// Newest alerts first. `limit` defaults to 50 and is capped at 200.
    pub async fn list_alerts(&self, user_id: &str, limit: Option<u32>) -> Result<AlertFeed, DomainError> {
        let limit = limit.unwrap_or(DEFAULT_ALERT_LIMIT).clamp(1, MAX_ALERT_LIMIT);
        let alerts = self.alert_repository.list_alerts(user_id, limit).await?;
        let unread_count = self.alert_repository.count_unread(user_id).await?;
        Ok(AlertFeed { alerts, unread_count })
    }

    pub async fn mark_alert_read(&self, user_id: &str, alert_id: &str) -> Result<BudgetAlert, DomainError> {
        if !self.alert_repository.mark_read(user_id, alert_id).await? {
            return Err(DomainError::not_found("Alert", alert_id));
        }
        self.alert_repository
            .get_alert(user_id, alert_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Alert", alert_id))
    }

    /// Returns how many alerts went from unread to read
    pub async fn mark_all_read(&self, user_id: &str) -> Result<u64, DomainError> {
        let updated = self.alert_repository.mark_all_read(user_id).await?;
        info!(user_id, updated, "Marked alerts read");
        Ok(updated)
    }
}
