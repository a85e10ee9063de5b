//! Storage interfaces
//!
//! Ranking persistence and the injectable collaborator cache, both behind
//! traits with in-memory implementations.

pub mod cache;
pub mod rankings;

// Re-export commonly used types
pub use cache::{get_or_fetch, InMemoryCache, KeyValueCache};
pub use rankings::{InMemoryRankingStore, RankingStore};
