//! Configuration management for the rankings engine
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values for the ranking computation.

pub mod app;
pub mod rating;
pub mod tiebreak;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, DataSettings, ServiceSettings};
pub use rating::RatingConfig;
pub use tiebreak::TiebreakConfig;
