//! Request authentication.
//!
//! Sign-in happens upstream; the gateway forwards the authenticated user's
//! id in the `x-user-id` header and every API route requires it.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::io::rest::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The user a request acts on behalf of
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(ApiError::Unauthorized)?;

        Ok(Self {
            user_id: user_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(header: Option<&str>) -> Result<AuthenticatedUser, ApiError> {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(USER_ID_HEADER, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        AuthenticatedUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_header_is_trimmed() {
        let user = extract(Some("  alice ")).await.unwrap();
        assert_eq!(user.user_id, "alice");
    }

    #[tokio::test]
    async fn test_missing_or_blank_header_is_rejected() {
        assert!(matches!(extract(None).await, Err(ApiError::Unauthorized)));
        assert!(matches!(extract(Some("   ")).await, Err(ApiError::Unauthorized)));
    }
}
