//! Main application configuration
//!
//! This module defines the primary configuration structures for the rankings
//! driver, including environment variable loading, TOML file loading, and
//! validation.

use crate::config::{RatingConfig, TiebreakConfig};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub rating: RatingConfig,
    #[serde(default)]
    pub tiebreak: TiebreakConfig,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Input and output locations for the driver binary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSettings {
    /// Directory holding per-season subdirectories of raw season records
    pub data_dir: PathBuf,
    /// JSON listing of team metadata (name, classification, league)
    pub directory_file: PathBuf,
    /// Where the finalized rankings JSON is written
    pub output_file: PathBuf,
    /// First season to process, inclusive
    pub first_season: u16,
    /// Last season to process, inclusive
    pub last_season: u16,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "baseline-rankings".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            directory_file: PathBuf::from("team_directory.json"),
            output_file: PathBuf::from("processed_rankings.json"),
            first_season: 2022,
            last_season: 2025,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }

        // Data settings
        if let Ok(data_dir) = env::var("DATA_DIR") {
            config.data.data_dir = PathBuf::from(data_dir);
        }
        if let Ok(directory_file) = env::var("DIRECTORY_FILE") {
            config.data.directory_file = PathBuf::from(directory_file);
        }
        if let Ok(output_file) = env::var("OUTPUT_FILE") {
            config.data.output_file = PathBuf::from(output_file);
        }
        if let Ok(first) = env::var("FIRST_SEASON") {
            config.data.first_season = first
                .parse()
                .map_err(|_| anyhow!("Invalid FIRST_SEASON value: {}", first))?;
        }
        if let Ok(last) = env::var("LAST_SEASON") {
            config.data.last_season = last
                .parse()
                .map_err(|_| anyhow!("Invalid LAST_SEASON value: {}", last))?;
        }

        // Tiebreak settings
        if let Ok(threshold) = env::var("POWER_GAP_THRESHOLD") {
            config.tiebreak.power_gap_threshold = threshold
                .parse()
                .map_err(|_| anyhow!("Invalid POWER_GAP_THRESHOLD value: {}", threshold))?;
        }
        if let Ok(window) = env::var("LEAGUE_RANK_WINDOW") {
            config.tiebreak.league_rank_window = window
                .parse()
                .map_err(|_| anyhow!("Invalid LEAGUE_RANK_WINDOW value: {}", window))?;
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_config(&config)?;
        Ok(config)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    // Validate season range
    if config.data.first_season > config.data.last_season {
        return Err(anyhow!(
            "First season {} is after last season {}",
            config.data.first_season,
            config.data.last_season
        ));
    }

    config.rating.validate()?;
    config.tiebreak.validate()?;

    Ok(())
}
