//! Core types for fruitvendor.
//!
//! This module provides the stored entities and type-safe wrappers for their
//! identifiers.

pub mod id;
pub mod product;
pub mod user;

pub use id::*;
pub use product::Product;
pub use user::{Address, User};
