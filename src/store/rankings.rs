//! Ranking storage interface and implementations
//!
//! This module defines the interface for persisting and retrieving finalized
//! partition rankings, with an in-memory implementation. Durable backends
//! (document store, files) implement the same trait.

use crate::error::{RankingError, Result};
use crate::types::{PartitionKey, PartitionRankings};
use std::collections::HashMap;
use std::sync::RwLock;

/// Trait for ranking storage operations
pub trait RankingStore: Send + Sync {
    /// Store or replace a partition's finalized rankings
    fn store_partition(&self, rankings: PartitionRankings) -> Result<()>;

    /// Get a partition's rankings, if stored
    fn get_partition(&self, key: &PartitionKey) -> Result<Option<PartitionRankings>>;

    /// List the stored partition keys
    fn partition_keys(&self) -> Result<Vec<PartitionKey>>;

    /// Number of stored partitions
    fn partition_count(&self) -> Result<usize>;
}

/// In-memory ranking storage implementation
#[derive(Debug, Default)]
pub struct InMemoryRankingStore {
    partitions: RwLock<HashMap<PartitionKey, PartitionRankings>>,
}

impl InMemoryRankingStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

impl RankingStore for InMemoryRankingStore {
    fn store_partition(&self, rankings: PartitionRankings) -> Result<()> {
        let mut partitions = self.partitions.write().map_err(|_| RankingError::StoreError {
            message: "Failed to acquire rankings write lock".to_string(),
        })?;
        partitions.insert(rankings.key, rankings);
        Ok(())
    }

    fn get_partition(&self, key: &PartitionKey) -> Result<Option<PartitionRankings>> {
        let partitions = self.partitions.read().map_err(|_| RankingError::StoreError {
            message: "Failed to acquire rankings read lock".to_string(),
        })?;
        Ok(partitions.get(key).cloned())
    }

    fn partition_keys(&self) -> Result<Vec<PartitionKey>> {
        let partitions = self.partitions.read().map_err(|_| RankingError::StoreError {
            message: "Failed to acquire rankings read lock".to_string(),
        })?;
        let mut keys: Vec<PartitionKey> = partitions.keys().copied().collect();
        keys.sort();
        Ok(keys)
    }

    fn partition_count(&self) -> Result<usize> {
        let partitions = self.partitions.read().map_err(|_| RankingError::StoreError {
            message: "Failed to acquire rankings read lock".to_string(),
        })?;
        Ok(partitions.len())
    }
}
