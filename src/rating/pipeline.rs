//! Staged rating pipeline
//!
//! The rating computation is a strict pipeline: WP and FWS need only a
//! team's own results, OWP needs every team's WP, and OOWP needs every
//! team's OWP. Each stage is a distinct type that can only be built from the
//! completed previous stage, so phase ordering is enforced by the compiler
//! rather than by convention.

use crate::config::RatingConfig;
use crate::rating::stats::TeamSeasonStats;
use crate::rating::weights::CANONICAL_WEIGHT_SUM;
use crate::types::{TeamId, TeamRating};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Per-team values computable from the team's own results alone
#[derive(Debug, Clone)]
struct BaseEntry {
    wp: f64,
    fws_normalized: f64,
    opponents: BTreeSet<TeamId>,
}

/// Stage 1 output: WP and normalized FWS for every team in the partition
#[derive(Debug)]
pub struct BaseStage {
    teams: BTreeMap<TeamId, BaseEntry>,
}

/// Stage 2 output: stage 1 plus OWP for every team
#[derive(Debug)]
pub struct ScheduleStage {
    teams: BTreeMap<TeamId, ScheduleEntry>,
}

#[derive(Debug, Clone)]
struct ScheduleEntry {
    wp: f64,
    fws_normalized: f64,
    owp: f64,
    opponents: BTreeSet<TeamId>,
}

/// Compute stage 1 for a partition: win percentage and proportional FWS
///
/// WP counts dual meets with ties at half value. The FWS for a meet is the
/// ratio of earned weight to the weight of the flights actually contested in
/// that meet, so a meet missing a flight is judged fairly; the normalized
/// FWS is the mean ratio across duals.
pub fn compute_base(stats: &BTreeMap<TeamId, TeamSeasonStats>) -> BaseStage {
    let mut teams = BTreeMap::new();

    for (&team_id, team_stats) in stats {
        let duals = team_stats.duals_played();
        let wp = if duals > 0 {
            (f64::from(team_stats.wins) + 0.5 * f64::from(team_stats.ties)) / f64::from(duals)
        } else {
            0.0
        };

        let mut ratio_sum = 0.0;
        let mut ratio_count = 0u32;
        for dual in &team_stats.duals {
            let available = dual.available_weight();
            if available > 0.0 {
                ratio_sum += dual.earned_weight() / available;
                ratio_count += 1;
            }
        }
        let fws_normalized = if ratio_count > 0 {
            ratio_sum / f64::from(ratio_count)
        } else {
            0.0
        };

        teams.insert(
            team_id,
            BaseEntry {
                wp,
                fws_normalized,
                opponents: team_stats.opponents.clone(),
            },
        );
    }

    BaseStage { teams }
}

impl BaseStage {
    /// Number of teams in the partition
    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    /// Win percentage for a team, if it is in the partition
    pub fn wp(&self, team_id: TeamId) -> Option<f64> {
        self.teams.get(&team_id).map(|t| t.wp)
    }

    /// Compute stage 2: opponent win percentage over the complete WP map
    ///
    /// Opponents outside the partition contribute the neutral WP instead of
    /// being excluded, so schedules built around unknown opponents are not
    /// rewarded.
    pub fn with_opponent_strength(self, config: &RatingConfig) -> ScheduleStage {
        let mut teams = BTreeMap::new();

        for (team_id, entry) in &self.teams {
            let mut sum = 0.0;
            for opponent in &entry.opponents {
                sum += match self.teams.get(opponent) {
                    Some(opp) => opp.wp,
                    None => {
                        debug!(team_id, opponent, "Opponent outside partition, neutral WP");
                        config.neutral_wp
                    }
                };
            }
            let owp = if entry.opponents.is_empty() {
                0.0
            } else {
                sum / entry.opponents.len() as f64
            };

            teams.insert(
                *team_id,
                ScheduleEntry {
                    wp: entry.wp,
                    fws_normalized: entry.fws_normalized,
                    owp,
                    opponents: entry.opponents.clone(),
                },
            );
        }

        ScheduleStage { teams }
    }
}

impl ScheduleStage {
    /// Opponent win percentage for a team, if it is in the partition
    pub fn owp(&self, team_id: TeamId) -> Option<f64> {
        self.teams.get(&team_id).map(|t| t.owp)
    }

    /// Compute the final stage: OOWP over the complete OWP map, then the
    /// APR composite and Power Index blend
    ///
    /// OOWP is a one-hop aggregate of opponents' OWP, not a fixed-point
    /// iteration; unknown opponents contribute the neutral value again.
    pub fn finalize(self, config: &RatingConfig) -> BTreeMap<TeamId, TeamRating> {
        let mut ratings = BTreeMap::new();

        for (team_id, entry) in &self.teams {
            let mut sum = 0.0;
            for opponent in &entry.opponents {
                sum += match self.teams.get(opponent) {
                    Some(opp) => opp.owp,
                    None => config.neutral_wp,
                };
            }
            let oowp = if entry.opponents.is_empty() {
                0.0
            } else {
                sum / entry.opponents.len() as f64
            };

            let apr = config.wp_weight * entry.wp
                + config.owp_weight * entry.owp
                + config.oowp_weight * oowp;
            let power_index =
                config.apr_blend * apr + config.fws_blend * entry.fws_normalized;

            ratings.insert(
                *team_id,
                TeamRating {
                    team_id: *team_id,
                    wp: entry.wp,
                    owp: entry.owp,
                    oowp,
                    apr,
                    fws_raw: entry.fws_normalized * CANONICAL_WEIGHT_SUM,
                    fws_normalized: entry.fws_normalized,
                    power_index,
                },
            );
        }

        ratings
    }
}

/// Run the full pipeline for a partition's aggregated stats
pub fn compute_ratings(
    stats: &BTreeMap<TeamId, TeamSeasonStats>,
    config: &RatingConfig,
) -> BTreeMap<TeamId, TeamRating> {
    compute_base(stats)
        .with_opponent_strength(config)
        .finalize(config)
}
