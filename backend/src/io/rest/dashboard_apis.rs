//! # REST API for the Dashboard

use axum::{
    extract::State,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::info;

use crate::domain::models::expense::parse_date;
use crate::domain::DomainError;
use crate::io::auth::AuthenticatedUser;
use crate::io::rest::mappers::DashboardMapper;
use crate::io::rest::{today, ApiError, ApiQuery};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// `YYYY-MM-DD` to view the dashboard as of another day
    pub as_of: Option<String>,
}

/// Create a router for dashboard APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_dashboard))
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiQuery(query): ApiQuery<DashboardQuery>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/dashboard - user: {}, as_of: {:?}", user.user_id, query.as_of);

    let as_of = match query.as_of.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(date) => parse_date(date).map_err(DomainError::from)?,
        None => today(),
    };
    let summary = state.dashboard_service.dashboard_stats(&user.user_id, as_of).await?;
    Ok(Json(DashboardMapper::to_dto(summary)))
}
