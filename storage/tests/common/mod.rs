//! Shared fixtures for storage integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use containers::receipt::{RECEIPT_STATUS_FAILED, RECEIPT_STATUS_SUCCESSFUL};
use containers::{Bytes32, MinorBlockHeader, Receipt, RootBlockHeader};
use storage::{DatabaseDeleter, DatabaseReader, DatabaseWriter, DbError, MemoryDatabase};

pub fn hash(byte: u8) -> Bytes32 {
    Bytes32::from([byte; 32])
}

pub fn minor_header(number: u64, parent_hash: Bytes32, nonce: u64) -> MinorBlockHeader {
    MinorBlockHeader {
        number,
        parent_hash,
        nonce,
        difficulty: 1_000,
        gas_limit: 12_000_000,
        create_time: 1_600_000_000 + number * 10,
        ..Default::default()
    }
}

pub fn root_header(number: u64, parent_hash: Bytes32, nonce: u64) -> RootBlockHeader {
    RootBlockHeader {
        number,
        parent_hash,
        nonce,
        difficulty: 1_000_000,
        create_time: 1_600_000_000 + number * 60,
        ..Default::default()
    }
}

/// Builds `len` minor headers extending `parent`, tagging each with `nonce`
/// so forks built from the same parent produce distinct hashes.
pub fn extend_minor(parent: &MinorBlockHeader, len: u64, nonce: u64) -> Vec<MinorBlockHeader> {
    let mut headers = Vec::with_capacity(len as usize);
    let mut tip = parent.clone();
    for _ in 0..len {
        let next = minor_header(tip.number + 1, containers::Header::hash(&tip), nonce);
        headers.push(next.clone());
        tip = next;
    }
    headers
}

pub fn extend_root(parent: &RootBlockHeader, len: u64, nonce: u64) -> Vec<RootBlockHeader> {
    let mut headers = Vec::with_capacity(len as usize);
    let mut tip = parent.clone();
    for _ in 0..len {
        let next = root_header(tip.number + 1, containers::Header::hash(&tip), nonce);
        headers.push(next.clone());
        tip = next;
    }
    headers
}

pub fn receipts(count: u64) -> Vec<Receipt> {
    (0..count)
        .map(|i| Receipt {
            status: if i % 2 == 0 {
                RECEIPT_STATUS_FAILED
            } else {
                RECEIPT_STATUS_SUCCESSFUL
            },
            cumulative_gas_used: 21_000 * (i + 1),
            gas_used: 21_000,
            contract_address: Bytes32::zero(),
        })
        .collect()
}

/// Memory engine that can be told to fail reads or writes.
pub struct FlakyDatabase {
    pub inner: MemoryDatabase,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    write_budget: AtomicUsize,
}

impl Default for FlakyDatabase {
    fn default() -> Self {
        Self {
            inner: MemoryDatabase::new(),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            write_budget: AtomicUsize::new(usize::MAX),
        }
    }
}

impl FlakyDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lets the next `count` puts through, then fails every later one.
    pub fn allow_puts(&self, count: usize) {
        self.write_budget.store(count, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool) -> Result<(), DbError> {
        if flag.load(Ordering::SeqCst) {
            Err(DbError::Io("injected failure".to_string()))
        } else {
            Ok(())
        }
    }
}

impl DatabaseReader for FlakyDatabase {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, DbError> {
        Self::check(&self.fail_reads)?;
        self.inner.get(key)
    }

    fn has(&self, key: &[u8]) -> Result<bool, DbError> {
        Self::check(&self.fail_reads)?;
        self.inner.has(key)
    }
}

impl DatabaseWriter for FlakyDatabase {
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), DbError> {
        Self::check(&self.fail_writes)?;
        let budget = self.write_budget.load(Ordering::SeqCst);
        if budget == 0 {
            return Err(DbError::Io("write budget exhausted".to_string()));
        }
        if budget != usize::MAX {
            self.write_budget.store(budget - 1, Ordering::SeqCst);
        }
        self.inner.put(key, value)
    }
}

impl DatabaseDeleter for FlakyDatabase {
    fn delete(&self, key: &[u8]) -> Result<(), DbError> {
        Self::check(&self.fail_writes)?;
        self.inner.delete(key)
    }
}
