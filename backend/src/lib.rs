//! # Spending Tracker Backend
//!
//! HTTP service for recording expenses, tracking monthly category budgets
//! and raising alerts as budgets fill up.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST handlers, auth, mappers)
//!     ↓
//! Domain Layer (services, spending rules)
//!     ↓
//! Storage Layer (SQLite repositories)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{header, HeaderName, Method},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{AlertService, BudgetService, DashboardService, ExpenseService, ExportService};
use crate::io::rest::{alert_apis, budget_apis, dashboard_apis, expense_apis, export_apis, reference_apis};
use crate::io::USER_ID_HEADER;
use crate::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub expense_service: ExpenseService,
    pub budget_service: BudgetService,
    pub alert_service: AlertService,
    pub dashboard_service: DashboardService,
    pub export_service: ExportService,
}

impl AppState {
    pub fn new(db: DbConnection) -> Self {
        let expense_service = ExpenseService::new(db.clone());
        Self {
            export_service: ExportService::new(expense_service.clone()),
            expense_service,
            budget_service: BudgetService::new(db.clone()),
            alert_service: AlertService::new(db.clone()),
            dashboard_service: DashboardService::new(db),
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db = DbConnection::new(&config.database_url).await?;

    info!("Setting up application state");
    Ok(AppState::new(db))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &AppConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(config.allowed_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(USER_ID_HEADER)])
        .expose_headers([header::CONTENT_DISPOSITION]);

    let api_routes = Router::new()
        .nest("/expenses", expense_apis::router().merge(export_apis::router()))
        .nest("/budgets", budget_apis::router())
        .nest("/alerts", alert_apis::router())
        .nest("/dashboard", dashboard_apis::router())
        .nest("/reference-data", reference_apis::router());

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt; // for `oneshot`

    async fn setup_test_app() -> Router {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        create_router(AppState::new(db), &AppConfig::default())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(USER_ID_HEADER, "alice")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_api_routes_are_mounted() {
        let app = setup_test_app().await;
        for uri in [
            "/api/expenses/export",
            "/api/budgets?month=2024-03",
            "/api/alerts",
            "/api/dashboard?as_of=2024-03-01",
            "/api/reference-data",
        ] {
            let response = app.clone().oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
        }
    }

    #[tokio::test]
    async fn test_export_is_not_taken_as_an_expense_id() {
        let app = setup_test_app().await;
        let response = app.oneshot(get("/api/expenses/export")).await.unwrap();
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE].to_str().unwrap(),
            "text/csv; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_unknown_expense_is_not_found() {
        let app = setup_test_app().await;
        let response = app.oneshot(get("/api/expenses/does-not-exist")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
