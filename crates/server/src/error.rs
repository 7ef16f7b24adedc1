//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. Service errors become a
//! `{"err": "<message>"}` body with a status derived from the error kind.
//! Internal failures are captured to Sentry and logged in full, while the
//! client only sees `internal error`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fruitvendor_core::Error;

/// Wire form of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub err: String,
}

/// Application-level error type for the HTTP API.
#[derive(Debug, Error)]
pub enum AppError {
    /// A service operation failed.
    #[error(transparent)]
    Service(#[from] Error),

    /// The request body was not valid JSON for the endpoint.
    #[error("invalid json: {0}")]
    Json(#[from] JsonRejection),

    /// A blocking service call panicked or was cancelled.
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Service(err) => match err {
                Error::ProductIdRequired
                | Error::ProductRequired
                | Error::UserIdRequired
                | Error::UserRequired
                | Error::InvalidJson => StatusCode::BAD_REQUEST,
                Error::Unauthorized => StatusCode::UNAUTHORIZED,
                Error::ProductNotFound | Error::UserNotFound => StatusCode::NOT_FOUND,
                Error::ProductExists | Error::UserExists => StatusCode::CONFLICT,
                Error::NotImplemented => StatusCode::NOT_IMPLEMENTED,
                Error::Internal | Error::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Json(_) => StatusCode::BAD_REQUEST,
            Self::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client.
    fn public_message(&self) -> String {
        match self {
            Self::Service(err) if err.is_internal() => Error::Internal.to_string(),
            Self::Service(err) => err.to_string(),
            Self::Json(_) => Error::InvalidJson.to_string(),
            Self::Join(_) => Error::Internal.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() && status != StatusCode::NOT_IMPLEMENTED {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = ErrorResponse {
            err: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    fn status_of(err: Error) -> StatusCode {
        AppError::from(err).into_response().status()
    }

    async fn body_of(err: AppError) -> ErrorResponse {
        let bytes = to_bytes(err.into_response().into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(status_of(Error::ProductIdRequired), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(Error::UserRequired), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(Error::InvalidJson), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(Error::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(Error::ProductNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_of(Error::UserNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_of(Error::ProductExists), StatusCode::CONFLICT);
        assert_eq!(status_of(Error::UserExists), StatusCode::CONFLICT);
        assert_eq!(status_of(Error::NotImplemented), StatusCode::NOT_IMPLEMENTED);
        assert_eq!(status_of(Error::Internal), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            status_of(Error::backend("disk")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_domain_message_is_exposed() {
        let body = body_of(Error::ProductExists.into()).await;
        assert_eq!(body.err, "product already exists");
    }

    #[tokio::test]
    async fn test_backend_detail_is_hidden() {
        let body = body_of(Error::backend("redb exploded at page 7").into()).await;
        assert_eq!(body.err, "internal error");
    }
}
