//! Service interfaces implemented by the storage layer, the HTTP client and
//! the test double.
//!
//! All operations are synchronous and may block while a transaction or a
//! network round trip is in flight. Callers that need a timeout enforce it
//! themselves.

use crate::error::Result;
use crate::types::{Product, ProductId, User, UserId};

/// Manages products.
pub trait ProductService: Send + Sync {
    /// Fetch a single product.
    ///
    /// # Errors
    ///
    /// `ProductIdRequired` for an empty ID, `ProductNotFound` if absent.
    fn product(&self, id: &ProductId) -> Result<Product>;

    /// Fetch every stored product. An empty store yields an empty `Vec`.
    ///
    /// # Errors
    ///
    /// Only backend failures.
    fn products(&self) -> Result<Vec<Product>>;

    /// Persist a new product and stamp its `mod_time`.
    ///
    /// # Errors
    ///
    /// `ProductIdRequired` for an empty ID, `ProductExists` on a duplicate.
    fn create_product(&self, product: &mut Product) -> Result<()>;

    /// Overwrite the mutable fields of an existing product and return the
    /// stored record.
    ///
    /// # Errors
    ///
    /// `ProductNotFound` if no product has this ID.
    fn update_product(&self, id: &ProductId, product: &Product) -> Result<Product>;

    /// Remove a product.
    ///
    /// # Errors
    ///
    /// `ProductNotFound` if no product has this ID.
    fn delete_product(&self, id: &ProductId, token: &str) -> Result<()>;
}

/// Manages users.
pub trait UserService: Send + Sync {
    /// Fetch a single user.
    ///
    /// # Errors
    ///
    /// `UserIdRequired` for an empty ID, `UserNotFound` if absent.
    fn user(&self, id: &UserId) -> Result<User>;

    /// List users.
    ///
    /// # Errors
    ///
    /// Implementations that cannot list return `NotImplemented` rather than
    /// an empty `Vec`.
    fn users(&self) -> Result<Vec<User>>;

    /// Persist a new user and stamp its `mod_time`.
    ///
    /// # Errors
    ///
    /// `UserIdRequired` for an empty ID, `UserExists` on a duplicate.
    fn create_user(&self, user: &mut User) -> Result<()>;

    /// Overwrite name, card and address of an existing user and return the
    /// stored record.
    ///
    /// # Errors
    ///
    /// `UserNotFound` if no user has this ID.
    fn update_user(&self, id: &UserId, user: &User) -> Result<User>;

    /// Remove a user.
    ///
    /// # Errors
    ///
    /// `UserNotFound` if no user has this ID.
    fn delete_user(&self, id: &UserId) -> Result<()>;
}

/// A connection that hands out both services.
pub trait Client {
    type Products: ProductService;
    type Users: UserService;

    fn product_service(&self) -> Self::Products;

    fn user_service(&self) -> Self::Users;
}
