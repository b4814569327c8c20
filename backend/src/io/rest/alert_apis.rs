//! # REST API for Budget Alerts

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use shared::MarkAlertsReadResponse;
use tracing::info;

use crate::io::auth::AuthenticatedUser;
use crate::io::rest::mappers::AlertMapper;
use crate::io::rest::{ApiError, ApiQuery};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AlertListQuery {
    pub limit: Option<u32>,
}

/// Create a router for alert related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_alerts))
        .route("/read-all", post(mark_all_alerts_read))
        .route("/:id/read", post(mark_alert_read))
}

pub async fn list_alerts(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiQuery(query): ApiQuery<AlertListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/alerts - user: {}, limit: {:?}", user.user_id, query.limit);

    let feed = state.alert_service.list_alerts(&user.user_id, query.limit).await?;
    Ok(Json(AlertMapper::to_list_response(feed)))
}

pub async fn mark_alert_read(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(alert_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/alerts/{}/read - user: {}", alert_id, user.user_id);

    let alert = state.alert_service.mark_alert_read(&user.user_id, &alert_id).await?;
    Ok(Json(AlertMapper::to_dto(alert)))
}

pub async fn mark_all_alerts_read(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/alerts/read-all - user: {}", user.user_id);

    let updated_count = state.alert_service.mark_all_read(&user.user_id).await?;
    Ok(Json(MarkAlertsReadResponse { updated_count }))
}
