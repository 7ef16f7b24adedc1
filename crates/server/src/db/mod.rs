//! Database operations over the embedded redb file.
//!
//! # Layout
//!
//! One redb file with two tables:
//!
//! - `Products` - product ID → product record
//! - `Users` - user ID → user record
//!
//! # Transactions
//!
//! Every store operation runs inside a single transaction. Reads use a read
//! transaction and may run concurrently; writes take redb's single write
//! lock, so an existence check and the write that depends on it are never
//! interleaved with another writer. A write transaction that is dropped
//! without `commit()` is rolled back.

mod products;
mod tables;
mod users;

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use fruitvendor_core::codec::CodecError;

pub use products::ProductStore;
pub use tables::Tables;
pub use users::UserStore;

/// Source of the current time used for `mod_time` stamps.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Errors raised by the storage layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Domain error (validation, conflict, not found).
    #[error(transparent)]
    Service(#[from] fruitvendor_core::Error),

    /// The handle was never opened or has been closed.
    #[error("database is not open")]
    NotOpen,

    /// The database file could not be opened (bad path, or locked by
    /// another process).
    #[error("failed to open database at {path}: {source}")]
    Open {
        path: String,
        source: redb::DatabaseError,
    },

    #[error("transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl From<StoreError> for fruitvendor_core::Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Service(err) => err,
            other => Self::backend(other),
        }
    }
}

/// Handle to the fruitvendor database file.
///
/// Cheap to clone; every clone shares the same underlying connection. The
/// stores keep a clone and acquire a fresh transaction on each call.
#[derive(Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

struct DatabaseInner {
    path: PathBuf,
    db: RwLock<Option<redb::Database>>,
    clock: Clock,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("path", &self.inner.path)
            .field("open", &self.is_open())
            .finish_non_exhaustive()
    }
}

impl Database {
    /// Create an unopened handle for the database at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, Arc::new(Utc::now))
    }

    /// Create an unopened handle that stamps records with `clock`.
    #[must_use]
    pub fn with_clock(path: impl Into<PathBuf>, clock: Clock) -> Self {
        Self {
            inner: Arc::new(DatabaseInner {
                path: path.into(),
                db: RwLock::new(None),
                clock,
            }),
        }
    }

    /// Path of the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Open or create the database file and make sure both tables exist.
    ///
    /// Opening an already open handle does nothing.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Open` if the path is invalid or the file is
    /// locked by another process.
    pub fn open(&self) -> Result<(), StoreError> {
        let mut handle = self.write_handle();
        if handle.is_some() {
            return Ok(());
        }

        let db = redb::Database::create(&self.inner.path).map_err(|source| StoreError::Open {
            path: self.inner.path.display().to_string(),
            source,
        })?;

        // Read transactions can only open tables that already exist.
        let txn = db.begin_write()?;
        txn.open_table(Tables::PRODUCTS)?;
        txn.open_table(Tables::USERS)?;
        txn.commit()?;

        *handle = Some(db);
        info!(path = %self.inner.path.display(), "Database opened");
        Ok(())
    }

    /// Release the connection. Safe to call on a handle that was never
    /// opened, or more than once.
    pub fn close(&self) {
        if self.write_handle().take().is_some() {
            info!(path = %self.inner.path.display(), "Database closed");
        }
    }

    /// Returns `true` while the connection is held.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.read_handle().is_some()
    }

    /// Begin a read-only transaction.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotOpen` on a closed handle, or the engine's
    /// transaction error.
    pub fn begin_read(&self) -> Result<redb::ReadTransaction, StoreError> {
        let handle = self.read_handle();
        let db = handle.as_ref().ok_or(StoreError::NotOpen)?;
        Ok(db.begin_read()?)
    }

    /// Begin a read-write transaction. Dropping it without calling
    /// `commit()` discards every write made through it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotOpen` on a closed handle, or the engine's
    /// transaction error.
    pub fn begin_write(&self) -> Result<redb::WriteTransaction, StoreError> {
        let handle = self.read_handle();
        let db = handle.as_ref().ok_or(StoreError::NotOpen)?;
        Ok(db.begin_write()?)
    }

    /// Product store sharing this handle.
    #[must_use]
    pub fn products(&self) -> ProductStore {
        ProductStore::new(self.clone())
    }

    /// User store sharing this handle.
    #[must_use]
    pub fn users(&self) -> UserStore {
        UserStore::new(self.clone())
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        (self.inner.clock)()
    }

    fn read_handle(&self) -> RwLockReadGuard<'_, Option<redb::Database>> {
        self.inner.db.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_handle(&self) -> RwLockWriteGuard<'_, Option<redb::Database>> {
        self.inner.db.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fruitvendor_core::Client for Database {
    type Products = ProductStore;
    type Users = UserStore;

    fn product_service(&self) -> ProductStore {
        self.products()
    }

    fn user_service(&self) -> UserStore {
        self.users()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicI64, Ordering};

    use tempfile::TempDir;

    use super::*;

    /// 2000-01-01T00:00:00Z
    pub const START: i64 = 946_684_800;

    /// Open a database in a fresh temporary directory.
    ///
    /// Keep the returned `TempDir` alive for as long as the database is used.
    pub fn open_temp() -> (TempDir, Database) {
        let dir = TempDir::new().unwrap();
        let db = Database::new(dir.path().join("fruitvendor.redb"));
        db.open().unwrap();
        (dir, db)
    }

    /// Like [`open_temp`], but every call to the clock advances it by one
    /// second starting at [`START`].
    pub fn open_temp_ticking() -> (TempDir, Database) {
        let dir = TempDir::new().unwrap();
        let tick = Arc::new(AtomicI64::new(START));
        let clock: Clock = Arc::new(move || {
            let secs = tick.fetch_add(1, Ordering::SeqCst);
            DateTime::from_timestamp(secs, 0).unwrap()
        });
        let db = Database::with_clock(dir.path().join("fruitvendor.redb"), clock);
        db.open().unwrap();
        (dir, db)
    }
}
