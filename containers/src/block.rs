use crate::header::{ChainHeader, Header, MinorBlockHeader, RootBlockHeader};
use crate::Bytes32;
use ssz::PersistentList;
use ssz_derive::Ssz;
use typenum::U4096;

pub type Transactions = PersistentList<Transaction, U4096>;
pub type MinorHeaders = PersistentList<MinorBlockHeader, U4096>;

/// Shard transaction as carried in a minor block body.
///
/// Execution semantics live outside this crate; only the fields needed to
/// identify and order the transaction are kept.
#[derive(Clone, Debug, PartialEq, Eq, Ssz, Default)]
pub struct Transaction {
    pub nonce: u64,
    pub from: Bytes32,
    pub to: Bytes32,
    pub value: u64,
    pub gas_limit: u64,
    pub gas_price: u64,
}

/// Shard block: header plus its transactions.
#[derive(Clone, Debug, PartialEq, Eq, Ssz, Default)]
pub struct MinorBlock {
    pub header: MinorBlockHeader,
    pub transactions: Transactions,
}

/// Root block: header plus the minor block headers it confirms.
#[derive(Clone, Debug, PartialEq, Eq, Ssz, Default)]
pub struct RootBlock {
    pub header: RootBlockHeader,
    pub minor_block_headers: MinorHeaders,
}

impl MinorBlock {
    /// Builds a block, returning `None` if the list exceeds the body limit.
    pub fn new(header: MinorBlockHeader, transactions: Vec<Transaction>) -> Option<Self> {
        let mut list = Transactions::default();
        for tx in transactions {
            list.push(tx).ok()?;
        }
        Some(Self {
            header,
            transactions: list,
        })
    }

    pub fn hash(&self) -> Bytes32 {
        self.header.hash()
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        // PersistentList has no borrowing iterator; read by index.
        (0..self.transactions.len_usize() as u64)
            .filter_map(|i| self.transactions.get(i).ok().cloned())
            .collect()
    }
}

impl RootBlock {
    /// Builds a block, returning `None` if the list exceeds the body limit.
    pub fn new(header: RootBlockHeader, minor_block_headers: Vec<MinorBlockHeader>) -> Option<Self> {
        let mut list = MinorHeaders::default();
        for minor in minor_block_headers {
            list.push(minor).ok()?;
        }
        Some(Self {
            header,
            minor_block_headers: list,
        })
    }

    pub fn hash(&self) -> Bytes32 {
        self.header.hash()
    }

    pub fn minor_block_headers(&self) -> Vec<MinorBlockHeader> {
        (0..self.minor_block_headers.len_usize() as u64)
            .filter_map(|i| self.minor_block_headers.get(i).ok().cloned())
            .collect()
    }
}

/// A block from either hierarchy, as handed to `insert_chain`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChainBlock {
    Minor(MinorBlock),
    Root(RootBlock),
}

impl ChainBlock {
    pub fn header(&self) -> ChainHeader {
        match self {
            ChainBlock::Minor(block) => ChainHeader::Minor(block.header.clone()),
            ChainBlock::Root(block) => ChainHeader::Root(block.header.clone()),
        }
    }

    pub fn hash(&self) -> Bytes32 {
        match self {
            ChainBlock::Minor(block) => block.hash(),
            ChainBlock::Root(block) => block.hash(),
        }
    }

    pub fn number(&self) -> u64 {
        match self {
            ChainBlock::Minor(block) => block.header.number,
            ChainBlock::Root(block) => block.header.number,
        }
    }
}

impl From<MinorBlock> for ChainBlock {
    fn from(block: MinorBlock) -> Self {
        ChainBlock::Minor(block)
    }
}

impl From<RootBlock> for ChainBlock {
    fn from(block: RootBlock) -> Self {
        ChainBlock::Root(block)
    }
}
