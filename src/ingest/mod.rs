//! Raw match-history ingestion
//!
//! Wire-shaped season records, boundary validation, the dual-meet extractor,
//! and the source trait callers implement to materialize data for the engine.

pub mod extractor;
pub mod record;
pub mod source;

// Re-export commonly used types
pub use extractor::{extract_team_duals, is_dual_meet};
pub use record::SeasonRecord;
pub use source::{SeasonSource, StaticSeasonSource};
