//! Head-to-head tiebreak configuration
//!
//! Both values are tuned heuristics from the source ranking system, kept
//! configurable rather than derived.

use crate::error::{RankingError, Result};
use serde::{Deserialize, Serialize};

/// Proximity conditions that allow a head-to-head swap to be considered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TiebreakConfig {
    /// Maximum Power Index gap for the statewide adjacent-pair condition
    pub power_gap_threshold: f64,
    /// Maximum league-internal rank distance for the league condition
    pub league_rank_window: u32,
}

impl Default for TiebreakConfig {
    fn default() -> Self {
        Self {
            power_gap_threshold: 0.02,
            league_rank_window: 2,
        }
    }
}

impl TiebreakConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.power_gap_threshold <= 0.0 {
            return Err(RankingError::ConfigurationError {
                message: "Power gap threshold must be positive".to_string(),
            }
            .into());
        }

        if self.league_rank_window == 0 {
            return Err(RankingError::ConfigurationError {
                message: "League rank window must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TiebreakConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.power_gap_threshold, 0.02);
        assert_eq!(config.league_rank_window, 2);
    }

    #[test]
    fn test_threshold_must_be_positive() {
        let mut config = TiebreakConfig::default();
        config.power_gap_threshold = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_window_must_be_positive() {
        let mut config = TiebreakConfig::default();
        config.league_rank_window = 0;
        assert!(config.validate().is_err());
    }
}
