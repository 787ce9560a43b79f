use async_trait::async_trait;
use containers::{Bytes32, RootBlock, RootBlockHeader};

/// Remote peer as seen by sync tasks.
///
/// Abstracts the wire protocol so tasks can be driven by mocks in tests.
#[async_trait]
pub trait Peer: Send + Sync {
    fn id(&self) -> &str;

    /// Up to `count` headers starting at `hash` and walking towards genesis,
    /// so the first header is the one with hash `hash`.
    async fn download_root_headers_from_hash(
        &self,
        hash: Bytes32,
        count: u64,
    ) -> anyhow::Result<Vec<RootBlockHeader>>;

    /// Blocks for the given headers, in the same order.
    async fn download_root_blocks(
        &self,
        headers: &[RootBlockHeader],
    ) -> anyhow::Result<Vec<RootBlock>>;
}
