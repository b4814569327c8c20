//! # REST API Interface Layer
//!
//! HTTP endpoints for the spending tracker, mounted under `/api`.
//! This layer handles:
//! - JSON request/response serialization
//! - Resolving the calling user
//! - Translating domain errors into HTTP status codes
//! - Request logging
//!
//! Handlers stay thin: they call one or two domain services and map the
//! result to `shared` DTOs.

use chrono::{Local, NaiveDate};
use tracing::warn;

use crate::domain::models::BudgetMonth;
use crate::AppState;

pub mod alert_apis;
pub mod budget_apis;
pub mod dashboard_apis;
pub mod error;
pub mod expense_apis;
pub mod export_apis;
pub mod extract;
pub mod mappers;
pub mod reference_apis;

pub use error::ApiError;
pub use extract::{ApiJson, ApiQuery};

/// The server's local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Re-evaluate budget alerts for each distinct month. Failures are logged
/// and never fail the request that triggered them.
pub async fn refresh_budget_alerts(state: &AppState, user_id: &str, months: &[BudgetMonth]) {
    let mut seen: Vec<BudgetMonth> = Vec::with_capacity(months.len());
    for &month in months {
        if seen.contains(&month) {
            continue;
        }
        seen.push(month);

        if let Err(e) = state
            .alert_service
            .check_month(&state.budget_service, user_id, month)
            .await
        {
            warn!(user_id, month = %month, "Failed to evaluate budget alerts: {}", e);
        }
    }
}
