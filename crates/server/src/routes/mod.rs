//! HTTP route handlers for the JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                     - Health check
//!
//! # Products
//! GET    /api/products               - List products
//! POST   /api/products               - Create product ({"product":{..},"token":".."})
//! GET    /api/products/{id}          - Fetch product
//! PATCH  /api/products/{id}          - Update product ({"product":{..}})
//! DELETE /api/products/{id}?token=.. - Delete product
//!
//! # Users
//! GET    /api/users                  - List users (501)
//! POST   /api/users                  - Create user ({"user":{..}})
//! GET    /api/users/{id}             - Fetch user
//! PATCH  /api/users/{id}             - Update user ({"user":{..}})
//! DELETE /api/users/{id}             - Delete user
//! ```
//!
//! Errors are returned as `{"err":"<message>"}`; see [`crate::error`].

pub mod products;
pub mod users;

use axum::{
    Router,
    extract::{Path, rejection::PathRejection},
    routing::get,
};
use fruitvendor_core::Error;
use tracing::debug;

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(products::index).post(products::create))
        .route(
            "/api/products/{id}",
            get(products::show)
                .patch(products::update)
                .delete(products::delete),
        )
}

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(users::index).post(users::create))
        .route(
            "/api/users/{id}",
            get(users::show).patch(users::update).delete(users::delete),
        )
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new().merge(product_routes()).merge(user_routes())
}

/// Run a blocking service call off the async executor.
async fn blocking<T, F>(f: F) -> crate::error::Result<T>
where
    F: FnOnce() -> fruitvendor_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(f).await??)
}

/// Take the id out of a path extraction.
///
/// A segment that does not decode (bad percent-encoding, invalid UTF-8) is
/// reported as `missing` so clients get the same `{"err": ..}` envelope as
/// for any other id problem.
fn path_id<T>(
    path: std::result::Result<Path<T>, PathRejection>,
    missing: Error,
) -> crate::error::Result<T> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            debug!(%rejection, "Rejected path parameter");
            Err(missing.into())
        }
    }
}
