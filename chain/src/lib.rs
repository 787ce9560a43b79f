//! Capabilities the sync core consumes from the chain object.
//!
//! Block insertion, fork choice and header validation rules belong to the
//! chain implementation; the synchronizer only sees these traits.

use containers::{Bytes32, ChainBlock, ChainHeader};
use thiserror::Error;

/// Header validation rules, as exposed by a chain.
pub trait HeaderValidator: Send + Sync {
    fn validate_header(&self, header: &ChainHeader) -> anyhow::Result<()>;
}

/// Lightweight view over a shard chain or the root chain.
pub trait Blockchain: Send + Sync {
    fn has_block(&self, hash: &Bytes32) -> bool;

    /// Inserts a contiguous, ascending segment of blocks.
    ///
    /// Returns the number of blocks inserted. On failure the error carries the
    /// index of the first rejected block; blocks before it stay inserted.
    fn insert_chain(&self, blocks: Vec<ChainBlock>) -> Result<usize, InsertChainError>;

    fn current_header(&self) -> ChainHeader;

    fn validator(&self) -> &dyn HeaderValidator;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("block {index} of chain segment rejected: {reason}")]
pub struct InsertChainError {
    pub index: usize,
    pub reason: String,
}

impl InsertChainError {
    pub fn new(index: usize, reason: impl Into<String>) -> Self {
        Self {
            index,
            reason: reason.into(),
        }
    }
}
