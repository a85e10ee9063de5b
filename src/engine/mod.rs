//! Partition driver
//!
//! Per-partition orchestration of aggregation, rating, assembly, and output
//! shaping. Each (season, gender) partition is computed independently.

pub mod driver;

// Re-export commonly used types
pub use driver::{PartitionInput, RankingEngine};
