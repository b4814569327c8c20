//! # REST API for Budgets
//!
//! Monthly category budgets, always returned with the spending recorded
//! against them.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Deserialize;
use shared::{CreateBudgetRequest, UpdateBudgetRequest};
use tracing::{info, warn};

use crate::domain::BudgetService;
use crate::io::auth::AuthenticatedUser;
use crate::io::rest::mappers::BudgetMapper;
use crate::io::rest::{refresh_budget_alerts, today, ApiError, ApiJson, ApiQuery};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct BudgetMonthQuery {
    /// `YYYY-MM`; the current month when absent
    pub month: Option<String>,
}

/// Create a router for budget related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_budgets).post(create_budget))
        .route("/:id", get(get_budget).put(update_budget).delete(delete_budget))
}

/// List one month's budgets with spending, raising any alerts now due
pub async fn list_budgets(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiQuery(query): ApiQuery<BudgetMonthQuery>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/budgets - user: {}, month: {:?}", user.user_id, query.month);

    let month = BudgetService::resolve_month(query.month.as_deref(), today())?;
    let spending = state.budget_service.list_budgets(&user.user_id, month).await?;
    if let Err(e) = state.alert_service.evaluate_budgets(&spending).await {
        warn!(user_id = %user.user_id, month = %month, "Failed to evaluate budget alerts: {}", e);
    }

    Ok(Json(BudgetMapper::to_list_response(month, spending)))
}

pub async fn create_budget(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiJson(request): ApiJson<CreateBudgetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/budgets - user: {}, request: {:?}", user.user_id, request);

    let budget = state.budget_service.create_budget(&user.user_id, request).await?;
    refresh_budget_alerts(&state, &user.user_id, &[budget.month]).await;

    Ok((StatusCode::CREATED, Json(BudgetMapper::to_dto(budget))))
}

pub async fn get_budget(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(budget_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/budgets/{} - user: {}", budget_id, user.user_id);

    let spending = state.budget_service.get_budget(&user.user_id, &budget_id).await?;
    Ok(Json(BudgetMapper::spending_to_dto(spending)))
}

pub async fn update_budget(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(budget_id): Path<String>,
    ApiJson(request): ApiJson<UpdateBudgetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("PUT /api/budgets/{} - user: {}, request: {:?}", budget_id, user.user_id, request);

    let budget = state
        .budget_service
        .update_budget(&user.user_id, &budget_id, request)
        .await?;
    refresh_budget_alerts(&state, &user.user_id, &[budget.month]).await;

    Ok(Json(BudgetMapper::to_dto(budget)))
}

pub async fn delete_budget(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(budget_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("DELETE /api/budgets/{} - user: {}", budget_id, user.user_id);

    state.budget_service.delete_budget(&user.user_id, &budget_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::USER_ID_HEADER;
    use crate::storage::DbConnection;
    use axum::{
        body::Body,
        http::{Method, Request},
    };
    use serde_json::{json, Value};
    use shared::{Budget, BudgetListResponse, BudgetStatus, BudgetWithSpending, CreateExpenseRequest};
    use tower::util::ServiceExt; // for `oneshot`

    async fn setup_test_app() -> (Router, AppState) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let state = AppState::new(db);
        (router().with_state(state.clone()), state)
    }

    fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(USER_ID_HEADER, "alice");
        match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn create_budget_via_api(app: &Router, amount: f64, category: &str, month: &str) -> Budget {
        let body = json!({ "amount": amount, "category": category, "month": month });
        let response = app
            .clone()
            .oneshot(request(Method::POST, "/", Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        read_json(response).await
    }

    async fn spend(state: &AppState, amount: f64, category: &str, date: &str) {
        state
            .expense_service
            .create_expense(
                "alice",
                CreateExpenseRequest {
                    amount,
                    category: category.to_string(),
                    date: date.to_string(),
                    description: None,
                    payment_method: "Cash".to_string(),
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_list_budgets_with_spending_and_alerts() {
        let (app, state) = setup_test_app().await;
        create_budget_via_api(&app, 200.0, "Utilities", "2024-03").await;
        spend(&state, 150.0, "Utilities", "2024-03-05").await;
        spend(&state, 40.0, "Utilities", "2024-02-05").await;

        let response = app
            .clone()
            .oneshot(request(Method::GET, "/?month=2024-03", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed: BudgetListResponse = read_json(response).await;
        assert_eq!(listed.month, "2024-03");
        assert_eq!(listed.budgets.len(), 1);

        let budget = &listed.budgets[0];
        assert_eq!(budget.actual_spending, 150.0);
        assert_eq!(budget.remaining, 50.0);
        assert_eq!(budget.percentage_used, 75.0);
        assert_eq!(budget.status, BudgetStatus::Warning);

        // Listing raised the threshold alert; listing again does not duplicate it
        app.oneshot(request(Method::GET, "/?month=2024-03", None)).await.unwrap();
        let feed = state.alert_service.list_alerts("alice", None).await.unwrap();
        assert_eq!(feed.alerts.len(), 1);
    }

    #[tokio::test]
    async fn test_list_budgets_rejects_bad_month() {
        let (app, _) = setup_test_app().await;
        let response = app.oneshot(request(Method::GET, "/?month=2024-3", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_duplicate_budget_is_conflict() {
        let (app, _) = setup_test_app().await;
        create_budget_via_api(&app, 100.0, "Education", "2024-03").await;

        let body = json!({ "amount": 50.0, "category": "Education", "month": "2024-03" });
        let response = app.oneshot(request(Method::POST, "/", Some(body))).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body: Value = read_json(response).await;
        assert_eq!(body["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn test_get_update_delete_budget() {
        let (app, state) = setup_test_app().await;
        let created = create_budget_via_api(&app, 100.0, "Insurance", "2024-03").await;
        spend(&state, 120.0, "Insurance", "2024-03-02").await;
        let uri = format!("/{}", created.id);

        let response = app.clone().oneshot(request(Method::GET, &uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let fetched: BudgetWithSpending = read_json(response).await;
        assert_eq!(fetched.budget.id, created.id);
        assert!(fetched.is_over_budget);
        assert_eq!(fetched.remaining, -20.0);

        let response = app
            .clone()
            .oneshot(request(Method::PUT, &uri, Some(json!({ "amount": 150.0 }))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated: Budget = read_json(response).await;
        assert_eq!(updated.amount, 150.0);

        let response = app.clone().oneshot(request(Method::DELETE, &uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app.oneshot(request(Method::GET, &uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
