//! Season source traits and implementations
//!
//! This module defines the interface the engine's callers use to materialize
//! a partition's raw season records before the computation runs. Fetch and
//! persistence layers implement it; the static implementation backs tests
//! and pre-loaded datasets.

use crate::error::Result;
use crate::ingest::record::SeasonRecord;
use crate::types::{PartitionKey, TeamId};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};

/// Trait for materializing raw season records for the engine
#[async_trait]
pub trait SeasonSource: Send + Sync {
    /// List the partitions this source has data for
    async fn partitions(&self) -> Result<Vec<PartitionKey>>;

    /// Load all raw records for one partition, keyed by team
    async fn load_partition(&self, key: PartitionKey) -> Result<BTreeMap<TeamId, SeasonRecord>>;
}

/// In-memory season source backed by pre-loaded records
#[derive(Debug, Default)]
pub struct StaticSeasonSource {
    partitions: HashMap<PartitionKey, BTreeMap<TeamId, SeasonRecord>>,
}

impl StaticSeasonSource {
    /// Create an empty static source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one team's record to a partition
    pub fn insert_record(&mut self, key: PartitionKey, team_id: TeamId, record: SeasonRecord) {
        self.partitions
            .entry(key)
            .or_default()
            .insert(team_id, record);
    }

    /// Number of partitions with data
    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }
}

#[async_trait]
impl SeasonSource for StaticSeasonSource {
    async fn partitions(&self) -> Result<Vec<PartitionKey>> {
        let mut keys: Vec<PartitionKey> = self.partitions.keys().copied().collect();
        keys.sort();
        Ok(keys)
    }

    async fn load_partition(&self, key: PartitionKey) -> Result<BTreeMap<TeamId, SeasonRecord>> {
        Ok(self.partitions.get(&key).cloned().unwrap_or_default())
    }
}
