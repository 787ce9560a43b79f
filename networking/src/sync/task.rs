use async_trait::async_trait;
use chain::Blockchain;

/// Unit of sync work announced by a peer.
///
/// The synchronizer keeps at most one pending task per peer and always runs
/// the pending task with the highest priority next.
#[async_trait]
pub trait Task: Send + Sync {
    /// Peer the task was derived from. A newer task from the same peer
    /// replaces an older one still waiting in the queue.
    fn peer_id(&self) -> &str;

    /// Larger runs first. Typically the height of the announced block.
    fn priority(&self) -> u64;

    async fn run(&self, chain: &dyn Blockchain) -> anyhow::Result<()>;
}
