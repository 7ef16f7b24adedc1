//! Product domain type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ProductId;

/// A product in the inventory.
///
/// The JSON form is the public view used by the HTTP API. `token` is accepted
/// when deserializing but never written back out, so reads over HTTP do not
/// leak it. The storage layer persists the token through the record codec
/// instead.
///
/// Empty strings mean "unset" for every descriptive field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    /// Unique product identifier. Required; the stores reject an empty ID.
    #[serde(rename = "productID")]
    pub id: ProductId,
    /// Capability token that authorizes deleting this product.
    #[serde(skip_serializing)]
    pub token: String,
    pub name: String,
    pub sku: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub color: String,
    pub description: String,
    /// Last modification time. Always assigned by the store.
    pub mod_time: DateTime<Utc>,
}

impl Product {
    /// Create an otherwise empty product with the given ID.
    #[must_use]
    pub fn new(id: impl Into<ProductId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_public_json_hides_token() {
        let product = Product {
            token: "s3cr3t".to_string(),
            sku: "S1".to_string(),
            ..Product::new("X")
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["productID"], "X");
        assert_eq!(json["sku"], "S1");
        assert!(json.get("token").is_none());
        assert!(json.get("modTime").is_some());
    }

    #[test]
    fn test_public_json_accepts_token_and_missing_fields() {
        let product: Product =
            serde_json::from_str(r#"{"productID":"X","token":"t","type":"fruit"}"#).unwrap();

        assert_eq!(product.id, ProductId::new("X"));
        assert_eq!(product.token, "t");
        assert_eq!(product.product_type, "fruit");
        assert!(product.description.is_empty());
        assert_eq!(product.mod_time, DateTime::<Utc>::default());
    }
}
