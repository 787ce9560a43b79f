/// Key-value capability the accessor layer runs on.
///
/// Keys and values are opaque byte strings. Implementations must be safe to
/// share between threads and provide per-key atomicity; nothing stronger is
/// assumed.
use std::sync::Arc;

use crate::error::DbError;

pub trait DatabaseReader: Send + Sync {
    /// Returns the value stored under `key`, or `None` if the key is absent.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, DbError>;

    fn has(&self, key: &[u8]) -> Result<bool, DbError>;
}

pub trait DatabaseWriter: Send + Sync {
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), DbError>;
}

pub trait DatabaseDeleter: Send + Sync {
    fn delete(&self, key: &[u8]) -> Result<(), DbError>;
}

/// Full read/write/delete access.
pub trait Database: DatabaseReader + DatabaseWriter + DatabaseDeleter {}

impl<T: DatabaseReader + DatabaseWriter + DatabaseDeleter + ?Sized> Database for T {}

impl<T: DatabaseReader + ?Sized> DatabaseReader for Arc<T> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, DbError> {
        (**self).get(key)
    }

    fn has(&self, key: &[u8]) -> Result<bool, DbError> {
        (**self).has(key)
    }
}

impl<T: DatabaseWriter + ?Sized> DatabaseWriter for Arc<T> {
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), DbError> {
        (**self).put(key, value)
    }
}

impl<T: DatabaseDeleter + ?Sized> DatabaseDeleter for Arc<T> {
    fn delete(&self, key: &[u8]) -> Result<(), DbError> {
        (**self).delete(key)
    }
}
