pub mod types;
pub mod chain_type;
pub mod header;
pub mod block;
pub mod receipt;

pub use block::{ChainBlock, MinorBlock, RootBlock, Transaction};
pub use chain_type::ChainType;
pub use header::{ChainHeader, Header, MinorBlockHeader, RootBlockHeader};
pub use receipt::{Receipt, Receipts};
pub use types::Bytes32;
pub use ssz;
