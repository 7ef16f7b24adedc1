//! Table definitions for redb storage.
//!
//! Both collections are keyed by the entity's ID string. Values are records
//! produced by `fruitvendor_core::codec`.

use redb::TableDefinition;

/// Table definitions for the fruitvendor database file.
pub struct Tables;

impl Tables {
    /// Product storage: product ID → encoded product record
    pub const PRODUCTS: TableDefinition<'static, &'static str, &'static [u8]> =
        TableDefinition::new("Products");

    /// User storage: user ID → encoded user record
    pub const USERS: TableDefinition<'static, &'static str, &'static [u8]> =
        TableDefinition::new("Users");
}
