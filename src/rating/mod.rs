//! Rating computation
//!
//! This module turns extracted dual results into per-team ratings: the
//! flight weight table, single-pass season aggregation, and the staged
//! WP → OWP → OOWP → APR → Power Index pipeline.

pub mod pipeline;
pub mod stats;
pub mod weights;

// Re-export commonly used types
pub use pipeline::{compute_base, compute_ratings, BaseStage, ScheduleStage};
pub use stats::TeamSeasonStats;
pub use weights::{flight_weight, CANONICAL_WEIGHT_SUM, DEFAULT_FLIGHT_WEIGHT};
