use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chain::{Blockchain, HeaderValidator, InsertChainError};
use containers::{Bytes32, ChainBlock, ChainHeader, ChainType, Header, RootBlock, RootBlockHeader};
use num_bigint::BigUint;
use parking_lot::Mutex;
use storage::MemoryDatabase;
use tokio::sync::{mpsc, oneshot};

use crate::sync::{Peer, Task};

/// Rejects headers at one configured height.
#[derive(Default)]
pub struct TestValidator {
    reject_number: Mutex<Option<u64>>,
}

impl HeaderValidator for TestValidator {
    fn validate_header(&self, header: &ChainHeader) -> anyhow::Result<()> {
        if Some(header.number()) == *self.reject_number.lock() {
            anyhow::bail!("header {} rejected by test validator", header.number());
        }
        Ok(())
    }
}

/// Root chain backed by the in-memory store.
pub struct TestChain {
    db: MemoryDatabase,
    head: Mutex<RootBlockHeader>,
    validator: TestValidator,
    inserted: Mutex<Vec<u64>>,
    reject_insert: Mutex<Option<u64>>,
}

impl TestChain {
    pub fn with_genesis(genesis: &RootBlock) -> Self {
        let db = MemoryDatabase::new();
        let hash = genesis.hash();
        storage::write_root_block(&db, genesis);
        storage::write_td(&db, ChainType::Root, &hash, &BigUint::from(genesis.header.difficulty));
        storage::write_canonical_hash(&db, ChainType::Root, &hash, 0);
        storage::write_head_block_hash(&db, &hash);

        Self {
            db,
            head: Mutex::new(genesis.header.clone()),
            validator: TestValidator::default(),
            inserted: Mutex::new(Vec::new()),
            reject_insert: Mutex::new(None),
        }
    }

    pub fn reject_header(&self, number: u64) {
        *self.validator.reject_number.lock() = Some(number);
    }

    /// Fail `insert_chain` when it reaches the block at `number`.
    pub fn reject_insert(&self, number: u64) {
        *self.reject_insert.lock() = Some(number);
    }

    /// Numbers of the blocks inserted so far, in insertion order.
    pub fn inserted(&self) -> Vec<u64> {
        self.inserted.lock().clone()
    }

    pub fn head(&self) -> RootBlockHeader {
        self.head.lock().clone()
    }

    pub fn canonical_hash(&self, number: u64) -> Bytes32 {
        storage::read_canonical_hash(&self.db, ChainType::Root, number)
    }
}

impl Blockchain for TestChain {
    fn has_block(&self, hash: &Bytes32) -> bool {
        storage::has_block(&self.db, ChainType::Root, hash)
    }

    fn insert_chain(&self, blocks: Vec<ChainBlock>) -> Result<usize, InsertChainError> {
        let count = blocks.len();
        for (index, block) in blocks.into_iter().enumerate() {
            let ChainBlock::Root(block) = block else {
                return Err(InsertChainError::new(index, "minor block on root chain"));
            };
            if Some(block.header.number) == *self.reject_insert.lock() {
                return Err(InsertChainError::new(index, "block rejected by test chain"));
            }
            let parent_td = storage::read_td(&self.db, ChainType::Root, &block.header.parent_hash)
                .ok_or_else(|| InsertChainError::new(index, "unknown parent"))?;

            let hash = block.hash();
            let td = parent_td + BigUint::from(block.header.difficulty);
            storage::write_root_block(&self.db, &block);
            storage::write_td(&self.db, ChainType::Root, &hash, &td);

            let head_hash = storage::read_head_block_hash(&self.db);
            let head_td = storage::read_td(&self.db, ChainType::Root, &head_hash).unwrap_or_default();
            if td > head_td {
                storage::write_canonical_hash(&self.db, ChainType::Root, &hash, block.header.number);
                storage::write_head_block_hash(&self.db, &hash);
                *self.head.lock() = block.header.clone();
            }

            self.inserted.lock().push(block.header.number);
        }
        Ok(count)
    }

    fn current_header(&self) -> ChainHeader {
        ChainHeader::Root(self.head.lock().clone())
    }

    fn validator(&self) -> &dyn HeaderValidator {
        &self.validator
    }
}

pub fn genesis() -> RootBlock {
    root_block(0, Bytes32::zero(), 0)
}

pub fn root_block(number: u64, parent_hash: Bytes32, nonce: u64) -> RootBlock {
    let header = RootBlockHeader {
        number,
        parent_hash,
        nonce,
        difficulty: 1_000,
        create_time: 1_600_000_000 + number * 60,
        ..Default::default()
    };
    RootBlock {
        header,
        ..Default::default()
    }
}

/// `len` blocks extending `parent`; `nonce` separates forks.
pub fn extend(parent: &RootBlock, len: u64, nonce: u64) -> Vec<RootBlock> {
    let mut blocks: Vec<RootBlock> = Vec::new();
    for _ in 0..len {
        let next = {
            let tip = blocks.last().unwrap_or(parent);
            root_block(tip.header.number + 1, tip.hash(), nonce)
        };
        blocks.push(next);
    }
    blocks
}

/// Peer serving a fixed set of root blocks.
pub struct MockPeer {
    id: String,
    blocks: HashMap<Bytes32, RootBlock>,
    withheld_bodies: Vec<Bytes32>,
    pub header_requests: Mutex<Vec<(Bytes32, u64)>>,
    pub block_requests: Mutex<Vec<usize>>,
}

impl MockPeer {
    pub fn new(id: &str, blocks: &[RootBlock]) -> Self {
        Self {
            id: id.to_string(),
            blocks: blocks.iter().map(|b| (b.hash(), b.clone())).collect(),
            withheld_bodies: Vec::new(),
            header_requests: Mutex::new(Vec::new()),
            block_requests: Mutex::new(Vec::new()),
        }
    }

    /// Serve the header of `hash` but not its body.
    pub fn withhold_body(mut self, hash: Bytes32) -> Self {
        self.withheld_bodies.push(hash);
        self
    }
}

#[async_trait::async_trait]
impl Peer for MockPeer {
    fn id(&self) -> &str {
        &self.id
    }

    async fn download_root_headers_from_hash(
        &self,
        hash: Bytes32,
        count: u64,
    ) -> anyhow::Result<Vec<RootBlockHeader>> {
        self.header_requests.lock().push((hash, count));

        let mut headers = Vec::new();
        let mut next = hash;
        while (headers.len() as u64) < count {
            let Some(block) = self.blocks.get(&next) else {
                break;
            };
            headers.push(block.header.clone());
            next = block.header.parent_hash;
        }
        Ok(headers)
    }

    async fn download_root_blocks(
        &self,
        headers: &[RootBlockHeader],
    ) -> anyhow::Result<Vec<RootBlock>> {
        self.block_requests.lock().push(headers.len());

        Ok(headers
            .iter()
            .map(|h| h.hash())
            .filter(|hash| !self.withheld_bodies.contains(hash))
            .filter_map(|hash| self.blocks.get(&hash).cloned())
            .collect())
    }
}

/// Reports its label when run, optionally failing afterwards.
pub struct RecordingTask {
    peer: String,
    priority: u64,
    label: String,
    fail: bool,
    log: mpsc::UnboundedSender<String>,
}

impl RecordingTask {
    pub fn boxed(
        peer: &str,
        priority: u64,
        label: &str,
        log: &mpsc::UnboundedSender<String>,
    ) -> Box<dyn Task> {
        Box::new(Self {
            peer: peer.to_string(),
            priority,
            label: label.to_string(),
            fail: false,
            log: log.clone(),
        })
    }

    pub fn failing(
        peer: &str,
        priority: u64,
        label: &str,
        log: &mpsc::UnboundedSender<String>,
    ) -> Box<dyn Task> {
        Box::new(Self {
            peer: peer.to_string(),
            priority,
            label: label.to_string(),
            fail: true,
            log: log.clone(),
        })
    }
}

#[async_trait::async_trait]
impl Task for RecordingTask {
    fn peer_id(&self) -> &str {
        &self.peer
    }

    fn priority(&self) -> u64 {
        self.priority
    }

    async fn run(&self, _chain: &dyn Blockchain) -> anyhow::Result<()> {
        let _ = self.log.send(self.label.clone());
        if self.fail {
            anyhow::bail!("task {} failed on purpose", self.label);
        }
        Ok(())
    }
}

/// Panics when run.
pub struct PanickingTask;

#[async_trait::async_trait]
impl Task for PanickingTask {
    fn peer_id(&self) -> &str {
        "panicking"
    }

    fn priority(&self) -> u64 {
        100
    }

    async fn run(&self, _chain: &dyn Blockchain) -> anyhow::Result<()> {
        panic!("sync task panicked on purpose");
    }
}

/// Occupies the worker until released, so tests can fill the queue.
pub struct GateTask {
    started: Mutex<Option<oneshot::Sender<()>>>,
    release: Mutex<Option<oneshot::Receiver<()>>>,
}

pub struct Gate {
    pub started: oneshot::Receiver<()>,
    pub release: oneshot::Sender<()>,
}

pub fn gate_task() -> (Box<dyn Task>, Gate) {
    let (started_tx, started_rx) = oneshot::channel();
    let (release_tx, release_rx) = oneshot::channel();
    let task = GateTask {
        started: Mutex::new(Some(started_tx)),
        release: Mutex::new(Some(release_rx)),
    };
    (
        Box::new(task),
        Gate {
            started: started_rx,
            release: release_tx,
        },
    )
}

#[async_trait::async_trait]
impl Task for GateTask {
    fn peer_id(&self) -> &str {
        "gate"
    }

    fn priority(&self) -> u64 {
        u64::MAX
    }

    async fn run(&self, _chain: &dyn Blockchain) -> anyhow::Result<()> {
        let started = self.started.lock().take();
        if let Some(started) = started {
            let _ = started.send(());
        }
        let release = self.release.lock().take();
        if let Some(release) = release {
            let _ = release.await;
        }
        Ok(())
    }
}

pub fn test_chain() -> Arc<TestChain> {
    Arc::new(TestChain::with_genesis(&genesis()))
}

/// Next label reported by a recording task.
pub async fn next_label(log: &mut mpsc::UnboundedReceiver<String>) -> String {
    tokio::time::timeout(Duration::from_secs(5), log.recv())
        .await
        .expect("timed out waiting for a task to run")
        .expect("log channel closed")
}
