//! Configurable test doubles for the service traits.
//!
//! Each operation is backed by an optional closure plus an "invoked" flag.
//! An operation without a closure answers `Error::NotImplemented`, so a test
//! only wires up what it expects to be called.
//!
//! ```rust
//! use fruitvendor_core::mock::MockProductService;
//! use fruitvendor_core::{Product, ProductId, ProductService};
//!
//! let service = MockProductService::new().with_product(|id| Ok(Product::new(id.clone())));
//!
//! let product = service.product(&ProductId::new("A")).unwrap();
//! assert_eq!(product.id.as_str(), "A");
//! assert!(service.product_invoked());
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Error, Result};
use crate::service::{ProductService, UserService};
use crate::types::{Product, ProductId, User, UserId};

type Handler<F> = Option<Box<F>>;

/// Record a call and dispatch it to the configured closure.
fn invoke<F: ?Sized, T>(
    flag: &AtomicBool,
    handler: Option<&F>,
    call: impl FnOnce(&F) -> Result<T>,
) -> Result<T> {
    flag.store(true, Ordering::SeqCst);
    handler.map_or(Err(Error::NotImplemented), call)
}

/// Test double for [`ProductService`].
#[derive(Default)]
pub struct MockProductService {
    product_fn: Handler<dyn Fn(&ProductId) -> Result<Product> + Send + Sync>,
    product_invoked: AtomicBool,

    products_fn: Handler<dyn Fn() -> Result<Vec<Product>> + Send + Sync>,
    products_invoked: AtomicBool,

    create_product_fn: Handler<dyn Fn(&mut Product) -> Result<()> + Send + Sync>,
    create_product_invoked: AtomicBool,

    update_product_fn: Handler<dyn Fn(&ProductId, &Product) -> Result<Product> + Send + Sync>,
    update_product_invoked: AtomicBool,

    delete_product_fn: Handler<dyn Fn(&ProductId, &str) -> Result<()> + Send + Sync>,
    delete_product_invoked: AtomicBool,
}

impl MockProductService {
    /// Create a mock with no operations configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_product(
        mut self,
        f: impl Fn(&ProductId) -> Result<Product> + Send + Sync + 'static,
    ) -> Self {
        self.product_fn = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn with_products(
        mut self,
        f: impl Fn() -> Result<Vec<Product>> + Send + Sync + 'static,
    ) -> Self {
        self.products_fn = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn with_create_product(
        mut self,
        f: impl Fn(&mut Product) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.create_product_fn = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn with_update_product(
        mut self,
        f: impl Fn(&ProductId, &Product) -> Result<Product> + Send + Sync + 'static,
    ) -> Self {
        self.update_product_fn = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn with_delete_product(
        mut self,
        f: impl Fn(&ProductId, &str) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.delete_product_fn = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn product_invoked(&self) -> bool {
        self.product_invoked.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn products_invoked(&self) -> bool {
        self.products_invoked.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn create_product_invoked(&self) -> bool {
        self.create_product_invoked.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn update_product_invoked(&self) -> bool {
        self.update_product_invoked.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn delete_product_invoked(&self) -> bool {
        self.delete_product_invoked.load(Ordering::SeqCst)
    }
}

impl ProductService for MockProductService {
    fn product(&self, id: &ProductId) -> Result<Product> {
        invoke(&self.product_invoked, self.product_fn.as_deref(), |f| f(id))
    }

    fn products(&self) -> Result<Vec<Product>> {
        invoke(&self.products_invoked, self.products_fn.as_deref(), |f| f())
    }

    fn create_product(&self, product: &mut Product) -> Result<()> {
        invoke(
            &self.create_product_invoked,
            self.create_product_fn.as_deref(),
            |f| f(product),
        )
    }

    fn update_product(&self, id: &ProductId, product: &Product) -> Result<Product> {
        invoke(
            &self.update_product_invoked,
            self.update_product_fn.as_deref(),
            |f| f(id, product),
        )
    }

    fn delete_product(&self, id: &ProductId, token: &str) -> Result<()> {
        invoke(
            &self.delete_product_invoked,
            self.delete_product_fn.as_deref(),
            |f| f(id, token),
        )
    }
}

/// Test double for [`UserService`].
#[derive(Default)]
pub struct MockUserService {
    user_fn: Handler<dyn Fn(&UserId) -> Result<User> + Send + Sync>,
    user_invoked: AtomicBool,

    users_fn: Handler<dyn Fn() -> Result<Vec<User>> + Send + Sync>,
    users_invoked: AtomicBool,

    create_user_fn: Handler<dyn Fn(&mut User) -> Result<()> + Send + Sync>,
    create_user_invoked: AtomicBool,

    update_user_fn: Handler<dyn Fn(&UserId, &User) -> Result<User> + Send + Sync>,
    update_user_invoked: AtomicBool,

    delete_user_fn: Handler<dyn Fn(&UserId) -> Result<()> + Send + Sync>,
    delete_user_invoked: AtomicBool,
}

impl MockUserService {
    /// Create a mock with no operations configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_user(mut self, f: impl Fn(&UserId) -> Result<User> + Send + Sync + 'static) -> Self {
        self.user_fn = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn with_users(mut self, f: impl Fn() -> Result<Vec<User>> + Send + Sync + 'static) -> Self {
        self.users_fn = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn with_create_user(
        mut self,
        f: impl Fn(&mut User) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.create_user_fn = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn with_update_user(
        mut self,
        f: impl Fn(&UserId, &User) -> Result<User> + Send + Sync + 'static,
    ) -> Self {
        self.update_user_fn = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn with_delete_user(
        mut self,
        f: impl Fn(&UserId) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.delete_user_fn = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn user_invoked(&self) -> bool {
        self.user_invoked.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn users_invoked(&self) -> bool {
        self.users_invoked.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn create_user_invoked(&self) -> bool {
        self.create_user_invoked.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn update_user_invoked(&self) -> bool {
        self.update_user_invoked.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn delete_user_invoked(&self) -> bool {
        self.delete_user_invoked.load(Ordering::SeqCst)
    }
}

impl UserService for MockUserService {
    fn user(&self, id: &UserId) -> Result<User> {
        invoke(&self.user_invoked, self.user_fn.as_deref(), |f| f(id))
    }

    fn users(&self) -> Result<Vec<User>> {
        invoke(&self.users_invoked, self.users_fn.as_deref(), |f| f())
    }

    fn create_user(&self, user: &mut User) -> Result<()> {
        invoke(
            &self.create_user_invoked,
            self.create_user_fn.as_deref(),
            |f| f(user),
        )
    }

    fn update_user(&self, id: &UserId, user: &User) -> Result<User> {
        invoke(
            &self.update_user_invoked,
            self.update_user_fn.as_deref(),
            |f| f(id, user),
        )
    }

    fn delete_user(&self, id: &UserId) -> Result<()> {
        invoke(
            &self.delete_user_invoked,
            self.delete_user_fn.as_deref(),
            |f| f(id),
        )
    }
}
