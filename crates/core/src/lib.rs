//! fruitvendor core - Shared types library.
//!
//! This crate provides what every fruitvendor component agrees on:
//! - `server` - redb-backed stores and the JSON HTTP API
//! - `cli` - Seeding tools
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. Storage and transport live behind the service traits.
//!
//! # Modules
//!
//! - [`types`] - Products, users and their type-safe IDs
//! - [`error`] - Error taxonomy shared by all service implementations
//! - [`service`] - `ProductService`, `UserService` and `Client` traits
//! - [`codec`] - Byte encoding of persisted records
//! - `mock` - Test doubles (behind the `mock` feature)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod codec;
pub mod error;
#[cfg(feature = "mock")]
pub mod mock;
pub mod service;
pub mod types;

pub use error::{BoxError, Error, Result};
pub use service::{Client, ProductService, UserService};
pub use types::*;
