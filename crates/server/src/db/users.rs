//! User store backed by the `Users` table.

use redb::ReadableTable;
use tracing::{debug, instrument};

use fruitvendor_core::codec::{decode_user, encode_user};
use fruitvendor_core::{Error, User, UserId, UserService};

use super::{Database, StoreError, Tables};

/// User store for database operations.
#[derive(Debug, Clone)]
pub struct UserStore {
    db: Database,
}

impl UserStore {
    /// Create a store over a shared database handle.
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `Error::UserIdRequired` for an empty ID and
    /// `Error::UserNotFound` if no user has this ID.
    #[instrument(skip(self), fields(user_id = %id))]
    pub fn get(&self, id: &UserId) -> Result<User, StoreError> {
        if id.is_empty() {
            return Err(Error::UserIdRequired.into());
        }

        let txn = self.db.begin_read()?;
        let table = txn.open_table(Tables::USERS)?;
        read_user(&table, id)?.ok_or_else(|| Error::UserNotFound.into())
    }

    /// Insert a new user and stamp `mod_time`.
    ///
    /// # Errors
    ///
    /// Returns `Error::UserIdRequired` for an empty ID and
    /// `Error::UserExists` if the ID is taken.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub fn create(&self, user: &mut User) -> Result<(), StoreError> {
        if user.id.is_empty() {
            return Err(Error::UserIdRequired.into());
        }

        let stored = User {
            mod_time: self.db.now(),
            ..user.clone()
        };
        let bytes = encode_user(&stored)?;

        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(Tables::USERS)?;
            if table.get(stored.id.as_str())?.is_some() {
                return Err(Error::UserExists.into());
            }
            table.insert(stored.id.as_str(), bytes.as_slice())?;
        }
        txn.commit()?;

        user.mod_time = stored.mod_time;
        debug!("User created");
        Ok(())
    }

    /// Overwrite name, card and address of an existing user.
    ///
    /// # Errors
    ///
    /// Returns `Error::UserNotFound` if no user has this ID.
    #[instrument(skip(self, user), fields(user_id = %id))]
    pub fn update(&self, id: &UserId, user: &User) -> Result<User, StoreError> {
        if id.is_empty() {
            return Err(Error::UserIdRequired.into());
        }

        let txn = self.db.begin_write()?;
        let updated = {
            let mut table = txn.open_table(Tables::USERS)?;
            let existing = read_user(&table, id)?.ok_or(Error::UserNotFound)?;

            let updated = User {
                name: user.name.clone(),
                address: user.address.clone(),
                card_id: user.card_id.clone(),
                mod_time: self.db.now(),
                ..existing
            };
            table.insert(id.as_str(), encode_user(&updated)?.as_slice())?;
            updated
        };
        txn.commit()?;

        debug!("User updated");
        Ok(updated)
    }

    /// Remove a user.
    ///
    /// # Errors
    ///
    /// Returns `Error::UserNotFound` if no user has this ID, or the codec
    /// error if the stored record cannot be decoded.
    #[instrument(skip(self), fields(user_id = %id))]
    pub fn delete(&self, id: &UserId) -> Result<(), StoreError> {
        if id.is_empty() {
            return Err(Error::UserIdRequired.into());
        }

        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(Tables::USERS)?;
            read_user(&table, id)?.ok_or(Error::UserNotFound)?;
            table.remove(id.as_str())?;
        }
        txn.commit()?;

        debug!("User deleted");
        Ok(())
    }
}

fn read_user(
    table: &impl ReadableTable<&'static str, &'static [u8]>,
    id: &UserId,
) -> Result<Option<User>, StoreError> {
    match table.get(id.as_str())? {
        Some(value) => Ok(Some(decode_user(value.value())?)),
        None => Ok(None),
    }
}

impl UserService for UserStore {
    fn user(&self, id: &UserId) -> fruitvendor_core::Result<User> {
        Ok(self.get(id)?)
    }

    /// Listing users is not supported by this store.
    fn users(&self) -> fruitvendor_core::Result<Vec<User>> {
        Err(Error::NotImplemented)
    }

    fn create_user(&self, user: &mut User) -> fruitvendor_core::Result<()> {
        Ok(self.create(user)?)
    }

    fn update_user(&self, id: &UserId, user: &User) -> fruitvendor_core::Result<User> {
        Ok(self.update(id, user)?)
    }

    fn delete_user(&self, id: &UserId) -> fruitvendor_core::Result<()> {
        Ok(self.delete(id)?)
    }
}
