//! Record codec for persisted entities.
//!
//! Records are encoded as self-delimited JSON objects through private record
//! types. Unlike the public serde view of [`Product`], the record keeps the
//! capability token, and every string field is always written, so decoding
//! an encoded record reproduces it field for field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Address, Product, ProductId, User, UserId};

/// Errors raised while encoding or decoding a record.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to encode {entity} record: {source}")]
    Encode {
        entity: &'static str,
        source: serde_json::Error,
    },

    #[error("failed to decode {entity} record: {source}")]
    Decode {
        entity: &'static str,
        source: serde_json::Error,
    },
}

// =============================================================================
// Record Types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct ProductRecord {
    id: String,
    token: String,
    name: String,
    sku: String,
    #[serde(rename = "type")]
    product_type: String,
    color: String,
    description: String,
    mod_time: DateTime<Utc>,
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_str().to_owned(),
            token: product.token.clone(),
            name: product.name.clone(),
            sku: product.sku.clone(),
            product_type: product.product_type.clone(),
            color: product.color.clone(),
            description: product.description.clone(),
            mod_time: product.mod_time,
        }
    }
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Self {
            id: ProductId::new(record.id),
            token: record.token,
            name: record.name,
            sku: record.sku,
            product_type: record.product_type,
            color: record.color,
            description: record.description,
            mod_time: record.mod_time,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct UserRecord {
    id: String,
    name: String,
    address: Option<Address>,
    card_id: String,
    mod_time: DateTime<Utc>,
}

impl From<&User> for UserRecord {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.as_str().to_owned(),
            name: user.name.clone(),
            address: user.address.clone(),
            card_id: user.card_id.clone(),
            mod_time: user.mod_time,
        }
    }
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: UserId::new(record.id),
            name: record.name,
            address: record.address,
            card_id: record.card_id,
            mod_time: record.mod_time,
        }
    }
}

// =============================================================================
// Encoding
// =============================================================================

/// Encode a product, token included.
///
/// # Errors
///
/// Returns `CodecError::Encode` if serialization fails.
pub fn encode_product(product: &Product) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(&ProductRecord::from(product)).map_err(|source| CodecError::Encode {
        entity: "product",
        source,
    })
}

/// Decode a product previously written by [`encode_product`].
///
/// # Errors
///
/// Returns `CodecError::Decode` if the bytes are not a product record.
pub fn decode_product(bytes: &[u8]) -> Result<Product, CodecError> {
    serde_json::from_slice::<ProductRecord>(bytes)
        .map(Product::from)
        .map_err(|source| CodecError::Decode {
            entity: "product",
            source,
        })
}

/// Encode a user.
///
/// # Errors
///
/// Returns `CodecError::Encode` if serialization fails.
pub fn encode_user(user: &User) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(&UserRecord::from(user)).map_err(|source| CodecError::Encode {
        entity: "user",
        source,
    })
}

/// Decode a user previously written by [`encode_user`].
///
/// # Errors
///
/// Returns `CodecError::Decode` if the bytes are not a user record.
pub fn decode_user(bytes: &[u8]) -> Result<User, CodecError> {
    serde_json::from_slice::<UserRecord>(bytes)
        .map(User::from)
        .map_err(|source| CodecError::Decode {
            entity: "user",
            source,
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_round_trip() {
        let product = Product {
            id: ProductId::new("ID"),
            token: "TOKEN".to_string(),
            name: "NAME".to_string(),
            sku: "SKU".to_string(),
            product_type: "TYPE".to_string(),
            color: "COLOR".to_string(),
            description: "DESCRIPTION".to_string(),
            mod_time: Utc::now(),
        };

        let other = decode_product(&encode_product(&product).unwrap()).unwrap();
        assert_eq!(other, product);
    }

    #[test]
    fn test_product_round_trip_keeps_empty_fields() {
        let product = Product {
            sku: "S1".to_string(),
            ..Product::new("X")
        };

        let bytes = encode_product(&product).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["description"], "");
        assert_eq!(json["token"], "");

        let other = decode_product(&bytes).unwrap();
        assert_eq!(other, product);
        assert!(other.description.is_empty());
    }

    #[test]
    fn test_user_round_trip() {
        let user = User {
            name: "NAME".to_string(),
            card_id: "CARDID".to_string(),
            address: Some(Address {
                line1: "1 Orchard Rd".to_string(),
                city: "Fresno".to_string(),
                ..Address::default()
            }),
            mod_time: Utc::now(),
            ..User::new("ID")
        };

        let other = decode_user(&encode_user(&user).unwrap()).unwrap();
        assert_eq!(other, user);
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode_product(b"not json").unwrap_err();
        assert!(matches!(err, CodecError::Decode { entity: "product", .. }));
    }
}
