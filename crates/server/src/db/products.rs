//! Product store backed by the `Products` table.

use redb::ReadableTable;
use tracing::{debug, instrument, warn};

use fruitvendor_core::codec::{decode_product, encode_product};
use fruitvendor_core::{Error, Product, ProductId, ProductService};

use super::{Database, StoreError, Tables};

/// Product store for database operations.
#[derive(Debug, Clone)]
pub struct ProductStore {
    db: Database,
}

impl ProductStore {
    /// Create a store over a shared database handle.
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `Error::ProductIdRequired` for an empty ID and
    /// `Error::ProductNotFound` if no product has this ID.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn get(&self, id: &ProductId) -> Result<Product, StoreError> {
        if id.is_empty() {
            return Err(Error::ProductIdRequired.into());
        }

        let txn = self.db.begin_read()?;
        let table = txn.open_table(Tables::PRODUCTS)?;
        read_product(&table, id)?.ok_or_else(|| Error::ProductNotFound.into())
    }

    /// List every product in key order.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the read or decoding fails.
    #[instrument(skip(self))]
    pub fn list(&self) -> Result<Vec<Product>, StoreError> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(Tables::PRODUCTS)?;

        let mut products = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            products.push(decode_product(value.value())?);
        }

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Insert a new product, stamping `mod_time` on both the stored record and
    /// the caller's copy.
    ///
    /// # Errors
    ///
    /// Returns `Error::ProductIdRequired` for an empty ID and
    /// `Error::ProductExists` if the ID is taken. Nothing is written on error.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn create(&self, product: &mut Product) -> Result<(), StoreError> {
        if product.id.is_empty() {
            return Err(Error::ProductIdRequired.into());
        }

        let stored = Product {
            mod_time: self.db.now(),
            ..product.clone()
        };
        let bytes = encode_product(&stored)?;

        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(Tables::PRODUCTS)?;
            if table.get(stored.id.as_str())?.is_some() {
                return Err(Error::ProductExists.into());
            }
            table.insert(stored.id.as_str(), bytes.as_slice())?;
        }
        txn.commit()?;

        product.mod_time = stored.mod_time;
        debug!("Product created");
        Ok(())
    }

    /// Overwrite the descriptive fields of an existing product.
    ///
    /// The stored ID is `id` regardless of `product.id`, and the stored token
    /// is kept.
    ///
    /// # Errors
    ///
    /// Returns `Error::ProductNotFound` if no product has this ID.
    #[instrument(skip(self, product), fields(product_id = %id))]
    pub fn update(&self, id: &ProductId, product: &Product) -> Result<Product, StoreError> {
        if id.is_empty() {
            return Err(Error::ProductIdRequired.into());
        }

        let txn = self.db.begin_write()?;
        let updated = {
            let mut table = txn.open_table(Tables::PRODUCTS)?;
            let existing = read_product(&table, id)?.ok_or(Error::ProductNotFound)?;

            let updated = Product {
                id: id.clone(),
                token: existing.token,
                name: product.name.clone(),
                sku: product.sku.clone(),
                product_type: product.product_type.clone(),
                color: product.color.clone(),
                description: product.description.clone(),
                mod_time: self.db.now(),
            };
            table.insert(id.as_str(), encode_product(&updated)?.as_slice())?;
            updated
        };
        txn.commit()?;

        debug!("Product updated");
        Ok(updated)
    }

    /// Remove a product.
    ///
    /// # Errors
    ///
    /// Returns `Error::ProductNotFound` if no product has this ID.
    #[instrument(skip(self, token), fields(product_id = %id))]
    pub fn delete(&self, id: &ProductId, token: &str) -> Result<(), StoreError> {
        if id.is_empty() {
            return Err(Error::ProductIdRequired.into());
        }

        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(Tables::PRODUCTS)?;
            let existing = read_product(&table, id)?.ok_or(Error::ProductNotFound)?;

            // TODO: reject with Error::Unauthorized once token checks on delete are agreed on.
            if existing.token != token {
                warn!("Deleting product with a token that does not match the stored one");
            }

            table.remove(id.as_str())?;
        }
        txn.commit()?;

        debug!("Product deleted");
        Ok(())
    }
}

/// Look up and decode a single product inside an open transaction.
fn read_product(
    table: &impl ReadableTable<&'static str, &'static [u8]>,
    id: &ProductId,
) -> Result<Option<Product>, StoreError> {
    match table.get(id.as_str())? {
        Some(value) => Ok(Some(decode_product(value.value())?)),
        None => Ok(None),
    }
}

impl ProductService for ProductStore {
    fn product(&self, id: &ProductId) -> fruitvendor_core::Result<Product> {
        Ok(self.get(id)?)
    }

    fn products(&self) -> fruitvendor_core::Result<Vec<Product>> {
        Ok(self.list()?)
    }

    fn create_product(&self, product: &mut Product) -> fruitvendor_core::Result<()> {
        Ok(self.create(product)?)
    }

    fn update_product(&self, id: &ProductId, product: &Product) -> fruitvendor_core::Result<Product> {
        Ok(self.update(id, product)?)
    }

    fn delete_product(&self, id: &ProductId, token: &str) -> fruitvendor_core::Result<()> {
        Ok(self.delete(id, token)?)
    }
}
