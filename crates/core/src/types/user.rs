//! User domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// A postal address attached to a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// A customer account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    /// Unique user identifier. Required; the stores reject an empty ID.
    #[serde(rename = "userID")]
    pub id: UserId,
    pub name: String,
    pub address: Option<Address>,
    /// Payment card reference.
    #[serde(rename = "card")]
    pub card_id: String,
    /// Last modification time. Always assigned by the store.
    pub mod_time: DateTime<Utc>,
}

impl User {
    /// Create an otherwise empty user with the given ID.
    #[must_use]
    pub fn new(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}
