//! # REST API for Data Export
//!
//! Download of the calling user's expenses as a CSV file.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};
use shared::ExpenseFilters;
use tracing::info;

use crate::io::auth::AuthenticatedUser;
use crate::io::rest::{today, ApiError, ApiQuery};
use crate::AppState;

/// Create a router for export related APIs, merged under `/expenses`
pub fn router() -> Router<AppState> {
    Router::new().route("/export", get(export_expenses_csv))
}

/// Export expenses as a CSV attachment. Accepts the expense list filters.
pub async fn export_expenses_csv(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiQuery(filters): ApiQuery<ExpenseFilters>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/expenses/export - user: {}, filters: {:?}", user.user_id, filters);

    let export = state
        .export_service
        .export_expenses_csv(&user.user_id, &filters, today())
        .await?;

    let disposition = format!("attachment; filename=\"{}\"", export.filename);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.content,
    ))
}
