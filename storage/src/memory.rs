use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::database::{DatabaseDeleter, DatabaseReader, DatabaseWriter};
use crate::error::DbError;

/// In-memory key-value engine.
///
/// Keys are kept ordered so prefix scans return them in byte-lexicographic
/// order, which the schema relies on for canonical history.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    entries: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// All keys starting with `prefix`, in ascending byte order.
    pub fn keys_with_prefix(&self, prefix: &[u8]) -> Vec<Vec<u8>> {
        self.entries
            .read()
            .range(prefix.to_vec()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect()
    }
}

impl DatabaseReader for MemoryDatabase {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, DbError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn has(&self, key: &[u8]) -> Result<bool, DbError> {
        Ok(self.entries.read().contains_key(key))
    }
}

impl DatabaseWriter for MemoryDatabase {
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), DbError> {
        self.entries.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }
}

impl DatabaseDeleter for MemoryDatabase {
    fn delete(&self, key: &[u8]) -> Result<(), DbError> {
        self.entries.write().remove(key);
        Ok(())
    }
}
