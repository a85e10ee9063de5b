//! Rating formula configuration
//!
//! The blend weights are fixed by the rating design; they are configurable
//! here so the formulas are stated once, with validation, rather than as
//! magic numbers in the pipeline.

use crate::error::{RankingError, Result};
use serde::{Deserialize, Serialize};

/// Weights for the APR composite and the final Power Index blend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingConfig {
    /// Own win percentage share of APR
    pub wp_weight: f64,
    /// Opponent win percentage share of APR
    pub owp_weight: f64,
    /// Opponent's-opponent win percentage share of APR
    pub oowp_weight: f64,
    /// APR share of the Power Index
    pub apr_blend: f64,
    /// Normalized FWS share of the Power Index
    pub fws_blend: f64,
    /// Win percentage substituted for opponents outside the partition
    pub neutral_wp: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            wp_weight: 0.25,
            owp_weight: 0.50,
            oowp_weight: 0.25,
            apr_blend: 0.50,
            fws_blend: 0.50,
            neutral_wp: 0.5,
        }
    }
}

impl RatingConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        let apr_sum = self.wp_weight + self.owp_weight + self.oowp_weight;
        if (apr_sum - 1.0).abs() > 1e-9 {
            return Err(RankingError::ConfigurationError {
                message: format!("APR weights must sum to 1.0, got {}", apr_sum),
            }
            .into());
        }

        let blend_sum = self.apr_blend + self.fws_blend;
        if (blend_sum - 1.0).abs() > 1e-9 {
            return Err(RankingError::ConfigurationError {
                message: format!("Power Index blend must sum to 1.0, got {}", blend_sum),
            }
            .into());
        }

        for (name, value) in [
            ("wp_weight", self.wp_weight),
            ("owp_weight", self.owp_weight),
            ("oowp_weight", self.oowp_weight),
            ("apr_blend", self.apr_blend),
            ("fws_blend", self.fws_blend),
            ("neutral_wp", self.neutral_wp),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(RankingError::ConfigurationError {
                    message: format!("{} must lie in [0, 1], got {}", name, value),
                }
                .into());
            }
        }

        Ok(())
    }
}
