//! Error-to-HTTP response conversion.
//!
//! Route handlers return `Result<T, AppError>`; any [`pf_core::Error`]
//! converts with `?` and is rendered as `{"detail": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Human-readable description of what went wrong.
    pub detail: String,
}

/// Wrapper so we can implement `IntoResponse` for an external type.
#[derive(Debug)]
pub struct AppError(pub pf_core::Error);

impl From<pf_core::Error> for AppError {
    fn from(e: pf_core::Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self.0, "Server error in API handler");
        } else {
            tracing::debug!(status = %status, error = %self.0, "Request rejected");
        }

        let body = ErrorBody {
            detail: self.0.to_string(),
        };
        (status, axum::Json(body)).into_response()
    }
}
