//! # REST API for Reference Data
//!
//! The fixed category and payment method lists offered to clients.

use axum::{response::Json, routing::get, Router};
use shared::ReferenceDataResponse;
use tracing::info;

use crate::io::auth::AuthenticatedUser;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_reference_data))
}

pub async fn get_reference_data(user: AuthenticatedUser) -> Json<ReferenceDataResponse> {
    info!("GET /api/reference-data - user: {}", user.user_id);
    Json(ReferenceDataResponse::current())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::USER_ID_HEADER;
    use crate::storage::DbConnection;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt; // for `oneshot`

    #[tokio::test]
    async fn test_reference_data() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let app = router().with_state(AppState::new(db));

        let request = Request::builder()
            .uri("/")
            .header(USER_ID_HEADER, "alice")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let data: ReferenceDataResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(data.categories.len(), 10);
        assert_eq!(data.categories[0], "Food & Dining");
        assert_eq!(data.payment_methods.len(), 6);
    }
}
