//! # REST API for Expenses
//!
//! CRUD endpoints for the calling user's expenses. Every write re-checks the
//! budgets of the month(s) it touched.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::{CreateExpenseRequest, ExpenseFilters, UpdateExpenseRequest};
use tracing::info;

use crate::domain::models::BudgetMonth;
use crate::io::auth::AuthenticatedUser;
use crate::io::rest::mappers::ExpenseMapper;
use crate::io::rest::{refresh_budget_alerts, ApiError, ApiJson, ApiQuery};
use crate::AppState;

/// Create a router for expense related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_expenses).post(create_expense))
        .route("/:id", get(get_expense).put(update_expense).delete(delete_expense))
}

/// List expenses, newest first, with the total of the listed amounts
pub async fn list_expenses(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiQuery(filters): ApiQuery<ExpenseFilters>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/expenses - user: {}, filters: {:?}", user.user_id, filters);

    let expenses = state.expense_service.list_expenses(&user.user_id, &filters).await?;
    Ok(Json(ExpenseMapper::to_list_response(expenses)))
}

pub async fn create_expense(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiJson(request): ApiJson<CreateExpenseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/expenses - user: {}, request: {:?}", user.user_id, request);

    let expense = state.expense_service.create_expense(&user.user_id, request).await?;
    refresh_budget_alerts(&state, &user.user_id, &[BudgetMonth::containing(expense.date)]).await;

    Ok((StatusCode::CREATED, Json(ExpenseMapper::to_dto(expense))))
}

pub async fn get_expense(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(expense_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/expenses/{} - user: {}", expense_id, user.user_id);

    let expense = state.expense_service.get_expense(&user.user_id, &expense_id).await?;
    Ok(Json(ExpenseMapper::to_dto(expense)))
}

pub async fn update_expense(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(expense_id): Path<String>,
    ApiJson(request): ApiJson<UpdateExpenseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("PUT /api/expenses/{} - user: {}, request: {:?}", expense_id, user.user_id, request);

    let revision = state
        .expense_service
        .update_expense(&user.user_id, &expense_id, request)
        .await?;
    let months = [
        BudgetMonth::containing(revision.before.date),
        BudgetMonth::containing(revision.after.date),
    ];
    refresh_budget_alerts(&state, &user.user_id, &months).await;

    Ok(Json(ExpenseMapper::to_dto(revision.after)))
}

pub async fn delete_expense(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(expense_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("DELETE /api/expenses/{} - user: {}", expense_id, user.user_id);

    let deleted = state.expense_service.delete_expense(&user.user_id, &expense_id).await?;
    refresh_budget_alerts(&state, &user.user_id, &[BudgetMonth::containing(deleted.date)]).await;

    Ok(StatusCode::NO_CONTENT)
}
