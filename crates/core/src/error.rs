//! Error taxonomy shared by every service implementation.
//!
//! Validation, conflict and not-found errors are unit variants whose
//! `Display` text doubles as the wire message of the HTTP API, so a remote
//! client can turn a response body back into the same variant with
//! [`Error::from_message`]. Anything raised by a storage engine or a
//! transport is wrapped in [`Error::Backend`] with its source chain intact.

use thiserror::Error;

/// Boxed error used to carry backend failures without naming their type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by product and user services.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller is not allowed to perform the operation.
    #[error("unauthorized")]
    Unauthorized,

    /// Generic message shown to external callers in place of internal detail.
    #[error("internal error")]
    Internal,

    /// The operation exists in the interface but is not supported.
    #[error("not implemented")]
    NotImplemented,

    /// A request body could not be decoded.
    #[error("invalid json")]
    InvalidJson,

    #[error("product required")]
    ProductRequired,

    #[error("product not found")]
    ProductNotFound,

    #[error("product already exists")]
    ProductExists,

    #[error("product id required")]
    ProductIdRequired,

    #[error("user required")]
    UserRequired,

    #[error("user not found")]
    UserNotFound,

    #[error("user already exists")]
    UserExists,

    #[error("user id required")]
    UserIdRequired,

    /// Failure raised by the storage engine or the transport.
    #[error("backend error: {0}")]
    Backend(#[source] BoxError),
}

impl Error {
    /// Wrap a backend failure.
    pub fn backend(err: impl Into<BoxError>) -> Self {
        Self::Backend(err.into())
    }

    /// Rebuild an error from its wire message.
    ///
    /// Unknown messages collapse to [`Error::Internal`]; backend detail never
    /// crosses the wire, so it cannot be reconstructed.
    #[must_use]
    pub fn from_message(message: &str) -> Self {
        match message {
            "unauthorized" => Self::Unauthorized,
            "not implemented" => Self::NotImplemented,
            "invalid json" => Self::InvalidJson,
            "product required" => Self::ProductRequired,
            "product not found" => Self::ProductNotFound,
            "product already exists" => Self::ProductExists,
            "product id required" => Self::ProductIdRequired,
            "user required" => Self::UserRequired,
            "user not found" => Self::UserNotFound,
            "user already exists" => Self::UserExists,
            "user id required" => Self::UserIdRequired,
            _ => Self::Internal,
        }
    }

    /// Returns `true` for errors whose detail must stay inside the process.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Backend(_))
    }
}

/// Result type alias for service operations.
pub type Result<T> = std::result::Result<T, Error>;
