//! Baseline Rankings - season power rankings for high-school tennis
//!
//! This crate turns raw dual-meet match histories into an ordered power
//! ranking per (season, gender), blending an opponent-strength-adjusted win
//! rating with a flight-weighted roster-depth score and resolving near-ties
//! with head-to-head results.

pub mod config;
pub mod directory;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod ranking;
pub mod rating;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{RankingError, Result};
pub use types::*;

// Re-export key components
pub use directory::{StaticTeamDirectory, TeamDirectory};
pub use engine::{PartitionInput, RankingEngine};
pub use ingest::{SeasonRecord, SeasonSource, StaticSeasonSource};
pub use store::{InMemoryRankingStore, RankingStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
