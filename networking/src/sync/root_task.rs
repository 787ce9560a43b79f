/// Root chain catch-up task.
///
/// When a peer announces a root block we do not have, the task walks the
/// peer's chain backwards from the announced header until it reaches a block
/// our chain already knows, then downloads the missing blocks and inserts
/// them oldest first.
///
/// ## Bounds
///
/// - Headers are fetched in batches of `header_batch_size`.
/// - The walk gives up once it reaches more than `max_staleness` blocks below
///   the local head; such a fork is too old to be worth adopting.
/// - Blocks are downloaded and inserted in batches of `block_batch_size`.
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use chain::Blockchain;
use containers::{Bytes32, ChainBlock, ChainHeader, Header, RootBlockHeader};
use thiserror::Error;
use tracing::{debug, info};

use super::{config::SyncConfig, peer::Peer, task::Task};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyncTaskError {
    #[error("root block {number} is too far behind local head {head}")]
    TooStale { number: u64, head: u64 },

    #[error("peer returned no headers starting at {hash}")]
    EmptyHeaders { hash: Bytes32 },

    /// Wrong hash, or a number that is not one below its child's.
    #[error("header {number} does not link to the chain being synced, expected hash {expected}")]
    UnlinkedHeader { number: u64, expected: Bytes32 },

    #[error("peer returned {got} blocks for {expected} headers")]
    BlockCountMismatch { expected: usize, got: usize },

    #[error("block {index} of batch has hash {got}, expected {expected}")]
    BlockHashMismatch {
        index: usize,
        expected: Bytes32,
        got: Bytes32,
    },
}

pub struct RootBlockSyncTask {
    peer: Arc<dyn Peer>,
    header: RootBlockHeader,
    config: SyncConfig,
}

impl RootBlockSyncTask {
    pub fn new(
        peer: Arc<dyn Peer>,
        header: RootBlockHeader,
        config: SyncConfig,
    ) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self {
            peer,
            header,
            config,
        })
    }

    pub fn header(&self) -> &RootBlockHeader {
        &self.header
    }

    /// Headers from the announced one back to the first block whose parent
    /// the chain knows, newest first.
    async fn collect_missing_headers(
        &self,
        chain: &dyn Blockchain,
    ) -> anyhow::Result<Vec<RootBlockHeader>> {
        let mut headers = vec![self.header.clone()];

        loop {
            let (oldest_number, mut expected) = match headers.last() {
                Some(oldest) => (oldest.number, oldest.parent_hash),
                None => break,
            };
            if chain.has_block(&expected) {
                break;
            }

            let head = chain.current_header().number();
            if head.saturating_sub(oldest_number) > self.config.max_staleness {
                return Err(SyncTaskError::TooStale {
                    number: oldest_number,
                    head,
                }
                .into());
            }

            let downloaded = self
                .peer
                .download_root_headers_from_hash(expected, self.config.header_batch_size)
                .await
                .with_context(|| format!("failed to download headers from {expected}"))?;

            if downloaded.is_empty() {
                return Err(SyncTaskError::EmptyHeaders { hash: expected }.into());
            }

            debug!(
                peer = %self.peer.id(),
                from = %expected,
                count = downloaded.len(),
                "Downloaded root block headers"
            );

            let mut expected_number = oldest_number.checked_sub(1);
            for header in downloaded {
                let hash = header.hash();
                if hash != expected || Some(header.number) != expected_number {
                    return Err(SyncTaskError::UnlinkedHeader {
                        number: header.number,
                        expected,
                    }
                    .into());
                }
                if chain.has_block(&hash) {
                    break;
                }

                chain
                    .validator()
                    .validate_header(&ChainHeader::Root(header.clone()))
                    .with_context(|| format!("invalid root block header {}", header.number))?;

                expected = header.parent_hash;
                expected_number = header.number.checked_sub(1);
                headers.push(header);
            }
        }

        Ok(headers)
    }

    async fn download_and_insert(
        &self,
        chain: &dyn Blockchain,
        headers: &[RootBlockHeader],
    ) -> anyhow::Result<()> {
        for batch in headers.chunks(self.config.block_batch_size) {
            let blocks = self
                .peer
                .download_root_blocks(batch)
                .await
                .context("failed to download root blocks")?;

            if blocks.len() != batch.len() {
                return Err(SyncTaskError::BlockCountMismatch {
                    expected: batch.len(),
                    got: blocks.len(),
                }
                .into());
            }

            for (index, (block, header)) in blocks.iter().zip(batch).enumerate() {
                let (got, expected) = (block.hash(), header.hash());
                if got != expected {
                    return Err(SyncTaskError::BlockHashMismatch {
                        index,
                        expected,
                        got,
                    }
                    .into());
                }
            }

            let inserted = chain.insert_chain(blocks.into_iter().map(ChainBlock::Root).collect())?;

            debug!(
                peer = %self.peer.id(),
                inserted,
                first = batch.first().map(|h| h.number),
                last = batch.last().map(|h| h.number),
                "Inserted root block batch"
            );
        }

        Ok(())
    }
}

#[async_trait]
impl Task for RootBlockSyncTask {
    fn peer_id(&self) -> &str {
        self.peer.id()
    }

    fn priority(&self) -> u64 {
        self.header.number
    }

    async fn run(&self, chain: &dyn Blockchain) -> anyhow::Result<()> {
        let hash = self.header.hash();
        if chain.has_block(&hash) {
            debug!(peer = %self.peer.id(), number = self.header.number, "Root block already known");
            return Ok(());
        }

        chain
            .validator()
            .validate_header(&ChainHeader::Root(self.header.clone()))
            .with_context(|| format!("invalid announced root block header {}", self.header.number))?;

        let mut headers = self.collect_missing_headers(chain).await?;
        headers.reverse();

        info!(
            peer = %self.peer.id(),
            from = headers.first().map(|h| h.number),
            to = self.header.number,
            "Syncing root blocks"
        );

        self.download_and_insert(chain, &headers).await
    }
}
