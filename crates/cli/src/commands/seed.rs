//! Seed a database with random products and users.
//!
//! Each round generates one product and one user that share a random ID.
//! IDs that are already taken are skipped, so seeding an existing database
//! only adds records.

use std::path::Path;

use rand::Rng;
use rand::distr::{Alphanumeric, SampleString};
use rand::seq::IndexedRandom;
use thiserror::Error;
use tracing::{debug, info};

use fruitvendor_core::{Client, Error, Product, ProductService, User, UserService};
use fruitvendor_server::db::{Database, StoreError};

const COLORS: &[&str] = &["Red", "Green", "White", "Blue"];
const FRUITS: &[&str] = &["Apple", "Grape", "Pear", "Plum", "Melon", "Kiwi"];
const TYPES: &[&str] = &["fruit", "berry", "citrus"];

/// Errors that abort seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Service(#[from] Error),
}

/// Outcome of a seeding run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub products: usize,
    pub users: usize,
    /// Records not written because their ID already existed.
    pub skipped: usize,
}

/// Open (or create) the database at `path` and seed `count` rounds.
///
/// # Errors
///
/// Returns `SeedError` if the database cannot be opened or a write fails for
/// any reason other than an ID collision.
pub fn run(path: &Path, count: usize) -> Result<SeedSummary, SeedError> {
    let db = Database::new(path);
    db.open()?;
    info!(path = %path.display(), count, "Seeding database");

    let result = seed(&db, count, &mut rand::rng());
    db.close();

    let summary = result?;
    info!(
        products = summary.products,
        users = summary.users,
        skipped = summary.skipped,
        "Seeding complete"
    );
    Ok(summary)
}

/// Seed `count` rounds through any client.
///
/// # Errors
///
/// Returns the first error that is not an ID collision.
pub fn seed<C: Client>(
    client: &C,
    count: usize,
    rng: &mut impl Rng,
) -> Result<SeedSummary, SeedError> {
    let products = client.product_service();
    let users = client.user_service();
    let mut summary = SeedSummary::default();

    for round in 0..count {
        let id = (rng.random_range(0..1000) + round).to_string();
        let color = pick(COLORS, rng);

        let mut product = Product {
            token: Alphanumeric.sample_string(rng, 16),
            name: pick(FRUITS, rng).to_string(),
            sku: format!("SKU-{}", Alphanumeric.sample_string(rng, 6).to_uppercase()),
            product_type: pick(TYPES, rng).to_string(),
            color: color.to_string(),
            ..Product::new(id.as_str())
        };
        match products.create_product(&mut product) {
            Ok(()) => summary.products += 1,
            Err(Error::ProductExists) => {
                debug!(id = %id, "Product ID taken, skipping");
                summary.skipped += 1;
            }
            Err(err) => return Err(err.into()),
        }

        let mut user = User {
            name: color.to_string(),
            card_id: rng.random::<u32>().to_string(),
            ..User::new(id.as_str())
        };
        match users.create_user(&mut user) {
            Ok(()) => summary.users += 1,
            Err(Error::UserExists) => {
                debug!(id = %id, "User ID taken, skipping");
                summary.skipped += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(summary)
}

fn pick<'a>(options: &[&'a str], rng: &mut impl Rng) -> &'a str {
    options.choose(rng).copied().unwrap_or_default()
}
