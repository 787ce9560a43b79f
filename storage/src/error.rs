use thiserror::Error;

/// Failure reported by the key-value engine itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DbError {
    #[error("database I/O error: {0}")]
    Io(String),

    #[error("database is closed")]
    Closed,
}

/// Outcome of an accessor call that did not produce a value.
///
/// `try_*` accessors return this directly. The plain accessors apply the
/// default policy instead: `NotFound`, `Corrupt` and `Read` degrade to an
/// absent value, `Write` and `Encode` abort the process.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("corrupt {entity} under key {key}: {reason}")]
    Corrupt {
        entity: &'static str,
        key: String,
        reason: String,
    },

    #[error("failed to read {entity}: {source}")]
    Read {
        entity: &'static str,
        #[source]
        source: DbError,
    },

    #[error("failed to write {entity}: {source}")]
    Write {
        entity: &'static str,
        #[source]
        source: DbError,
    },

    #[error("failed to encode {entity}: {reason}")]
    Encode { entity: &'static str, reason: String },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::Corrupt { .. })
    }

    pub(crate) fn corrupt(entity: &'static str, key: &[u8], reason: impl Into<String>) -> Self {
        StoreError::Corrupt {
            entity,
            key: hex::encode(key),
            reason: reason.into(),
        }
    }
}
