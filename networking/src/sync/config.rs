/// Sync configuration: batch sizes and limits for downloading chain segments.
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Maximum root block headers requested from a peer in one call.
pub const ROOT_BLOCK_HEADER_LIST_LIMIT: u64 = 500;

/// Maximum root blocks downloaded and inserted per batch.
pub const ROOT_BLOCK_BATCH_SIZE: usize = 100;

/// How far behind the local head an announced root block may start before
/// the announcement is rejected as stale.
pub const MAX_ROOT_BLOCK_STALENESS: u64 = 22_500;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct SyncConfig {
    pub header_batch_size: u64,
    pub block_batch_size: usize,
    pub max_staleness: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            header_batch_size: ROOT_BLOCK_HEADER_LIST_LIMIT,
            block_batch_size: ROOT_BLOCK_BATCH_SIZE,
            max_staleness: MAX_ROOT_BLOCK_STALENESS,
        }
    }
}

impl SyncConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open sync config {}", path.display()))?;
        let config: Self = serde_yaml::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse sync config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).context("failed to parse sync config")?;
        config.validate()?;
        Ok(config)
    }

    /// Zero batch sizes would make a sync task spin without progress.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.header_batch_size > 0, "HEADER_BATCH_SIZE must be positive");
        anyhow::ensure!(self.block_batch_size > 0, "BLOCK_BATCH_SIZE must be positive");
        Ok(())
    }
}
