use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::error;

use crate::domain::DomainError;

/// Error returned by every API handler
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing or empty x-user-id header")]
    Unauthorized,
    /// A body or query string that could not be read into the request type
    #[error("{0}")]
    InvalidInput(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(DomainError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Domain(DomainError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Domain(DomainError::Conflict(_)) => StatusCode::CONFLICT,
            ApiError::Domain(DomainError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthorized => "UNAUTHORIZED",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::Domain(DomainError::Validation(_)) => "INVALID_INPUT",
            ApiError::Domain(DomainError::NotFound { .. }) => "NOT_FOUND",
            ApiError::Domain(DomainError::Conflict(_)) => "CONFLICT",
            ApiError::Domain(DomainError::Storage(_)) => "STORAGE_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Storage details stay in the log
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {}", self);
            "Internal storage error".to_string()
        } else {
            self.to_string()
        };

        let body = json!({
            "error": message,
            "code": self.code(),
        });
        (status, Json(body)).into_response()
    }
}
