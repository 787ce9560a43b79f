//! Chain storage: key schema, typed accessors and ancestor search over a
//! pluggable key-value engine.

pub mod accessors;
pub mod ancestor;
pub mod database;
pub mod error;
pub mod memory;
pub mod schema;

pub use accessors::*;
pub use ancestor::{find_common_ancestor, find_common_minor_ancestor, find_common_root_ancestor};
pub use database::{Database, DatabaseDeleter, DatabaseReader, DatabaseWriter};
pub use error::{DbError, StoreError};
pub use memory::MemoryDatabase;
