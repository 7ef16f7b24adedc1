//! Application state shared across handlers.

use std::sync::Arc;

use fruitvendor_core::{Client, ProductService, UserService};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Handlers only see the service traits, so the
/// same router serves the redb stores in production and the mocks in tests.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    products: Arc<dyn ProductService>,
    users: Arc<dyn UserService>,
}

impl AppState {
    /// Create a new application state from two services.
    #[must_use]
    pub fn new(products: Arc<dyn ProductService>, users: Arc<dyn UserService>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { products, users }),
        }
    }

    /// Create a new application state from the services a client hands out.
    #[must_use]
    pub fn from_client<C>(client: &C) -> Self
    where
        C: Client,
        C::Products: 'static,
        C::Users: 'static,
    {
        Self::new(
            Arc::new(client.product_service()),
            Arc::new(client.user_service()),
        )
    }

    /// Get a shared handle to the product service.
    #[must_use]
    pub fn products(&self) -> Arc<dyn ProductService> {
        Arc::clone(&self.inner.products)
    }

    /// Get a shared handle to the user service.
    #[must_use]
    pub fn users(&self) -> Arc<dyn UserService> {
        Arc::clone(&self.inner.users)
    }
}
