//! API Error Taxonomy
//! Mission: One typed failure channel, mapped to HTTP at the boundary

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

/// Typed API failures. Every handler returns `Result<_, ApiError>` and the
/// transport layer turns the variant into a status code plus a JSON
/// `{"message": ...}` body.
#[derive(Debug)]
pub enum ApiError {
    /// Missing/invalid/expired token, or credentials that don't check out.
    Unauthorized(String),
    /// Valid identity lacking the required role or ownership.
    Forbidden(String),
    /// Referenced entity absent.
    NotFound(String),
    /// Duplicate unique field (email).
    Conflict(String),
    /// Missing or invalid request fields.
    Validation(String),
    /// Anything else. Internal detail is logged, never sent to the client.
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            // Duplicate email surfaces as 400 in the observed API contract.
            ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Unauthorized(m)
            | ApiError::Forbidden(m)
            | ApiError::NotFound(m)
            | ApiError::Conflict(m)
            | ApiError::Validation(m) => m,
            ApiError::Internal(err) => {
                warn!("internal error: {err:#}");
                "Server Error".to_string()
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
