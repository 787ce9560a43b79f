use crate::Bytes32;
use ssz::SszHash;
use ssz_derive::Ssz;

/// Minimal view of a header shared by both block hierarchies.
///
/// Everything that walks parent links (ancestor search, sync tasks) is written
/// against this trait so the minor and root chains share one implementation.
pub trait Header {
    fn number(&self) -> u64;
    fn parent_hash(&self) -> Bytes32;
    fn hash(&self) -> Bytes32;
}

/// Header of a shard ("minor") block.
#[derive(Clone, Debug, PartialEq, Eq, Ssz, Default)]
pub struct MinorBlockHeader {
    pub version: u64,
    /// Full shard id of the shard that produced the block.
    pub branch: u64,
    pub number: u64,
    pub coinbase: Bytes32,
    pub parent_hash: Bytes32,
    /// Root block this minor block builds on.
    pub prev_root_block_hash: Bytes32,
    pub gas_limit: u64,
    /// Commitment to the block's transaction list and receipts.
    pub meta_hash: Bytes32,
    pub create_time: u64,
    pub difficulty: u64,
    pub nonce: u64,
}

/// Header of a root block.
#[derive(Clone, Debug, PartialEq, Eq, Ssz, Default)]
pub struct RootBlockHeader {
    pub version: u64,
    pub number: u64,
    pub parent_hash: Bytes32,
    /// Merkle root over the minor block headers the root block confirms.
    pub minor_header_hash: Bytes32,
    pub coinbase: Bytes32,
    pub create_time: u64,
    pub difficulty: u64,
    pub nonce: u64,
}

impl Header for MinorBlockHeader {
    fn number(&self) -> u64 {
        self.number
    }

    fn parent_hash(&self) -> Bytes32 {
        self.parent_hash
    }

    fn hash(&self) -> Bytes32 {
        Bytes32(self.hash_tree_root())
    }
}

impl Header for RootBlockHeader {
    fn number(&self) -> u64 {
        self.number
    }

    fn parent_hash(&self) -> Bytes32 {
        self.parent_hash
    }

    fn hash(&self) -> Bytes32 {
        Bytes32(self.hash_tree_root())
    }
}

/// A header from either hierarchy, as handed across the blockchain capability.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChainHeader {
    Minor(MinorBlockHeader),
    Root(RootBlockHeader),
}

impl ChainHeader {
    /// Difficulty contributed by this block alone.
    pub fn difficulty(&self) -> u64 {
        match self {
            ChainHeader::Minor(header) => header.difficulty,
            ChainHeader::Root(header) => header.difficulty,
        }
    }
}

impl Header for ChainHeader {
    fn number(&self) -> u64 {
        match self {
            ChainHeader::Minor(header) => header.number,
            ChainHeader::Root(header) => header.number,
        }
    }

    fn parent_hash(&self) -> Bytes32 {
        match self {
            ChainHeader::Minor(header) => header.parent_hash,
            ChainHeader::Root(header) => header.parent_hash,
        }
    }

    fn hash(&self) -> Bytes32 {
        match self {
            ChainHeader::Minor(header) => header.hash(),
            ChainHeader::Root(header) => header.hash(),
        }
    }
}

impl From<MinorBlockHeader> for ChainHeader {
    fn from(header: MinorBlockHeader) -> Self {
        ChainHeader::Minor(header)
    }
}

impl From<RootBlockHeader> for ChainHeader {
    fn from(header: RootBlockHeader) -> Self {
        ChainHeader::Root(header)
    }
}
