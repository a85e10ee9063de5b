//! Partition driver
//!
//! Orchestrates one (season, gender) partition end to end: aggregation,
//! the rating pipeline, ranking assembly, and output shaping. Partitions
//! are fully independent; each run is a pure function of its input records
//! and the supplied directory, with no state carried across partitions.

use crate::config::{RatingConfig, TiebreakConfig};
use crate::directory::TeamDirectory;
use crate::error::Result;
use crate::ingest::record::SeasonRecord;
use crate::ranking::{HeadToHead, RankingAssembler};
use crate::rating::pipeline::compute_ratings;
use crate::rating::stats::TeamSeasonStats;
use crate::types::{PartitionKey, PartitionRankings, RankedEntry, TeamId};
use crate::utils::current_timestamp;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Raw input for one partition: every team's season record
#[derive(Debug, Clone)]
pub struct PartitionInput {
    pub key: PartitionKey,
    pub records: BTreeMap<TeamId, SeasonRecord>,
}

/// The ranking engine: validated configuration plus the per-partition run
#[derive(Debug, Clone)]
pub struct RankingEngine {
    rating_config: RatingConfig,
    tiebreak_config: TiebreakConfig,
}

impl RankingEngine {
    /// Create an engine from validated configuration
    pub fn new(rating_config: RatingConfig, tiebreak_config: TiebreakConfig) -> Result<Self> {
        rating_config.validate()?;
        tiebreak_config.validate()?;

        Ok(Self {
            rating_config,
            tiebreak_config,
        })
    }

    /// Rank one partition
    pub fn rank_partition(
        &self,
        input: &PartitionInput,
        directory: &dyn TeamDirectory,
    ) -> Result<PartitionRankings> {
        // Single aggregation pass; teams without qualifying duals are
        // excluded from the partition entirely
        let mut stats: BTreeMap<TeamId, TeamSeasonStats> = BTreeMap::new();
        for (&team_id, record) in &input.records {
            let team_stats = TeamSeasonStats::collect(record, team_id);
            if !team_stats.has_duals() {
                debug!(team_id, partition = %input.key, "Excluding team without qualifying duals");
                continue;
            }
            stats.insert(team_id, team_stats);
        }

        let leagues: BTreeMap<TeamId, String> = stats
            .keys()
            .filter_map(|&id| directory.league(id).map(|league| (id, league)))
            .collect();

        for (team_id, team_stats) in stats.iter_mut() {
            if let Some(league) = leagues.get(team_id) {
                team_stats.tally_league(|opponent| leagues.get(&opponent) == Some(league));
            }
        }

        let h2h = HeadToHead::from_stats(&stats);
        let ratings = compute_ratings(&stats, &self.rating_config);

        let assembler = RankingAssembler::new(&self.tiebreak_config);
        let ordered = assembler.assemble(ratings.into_values().collect(), &h2h, &leagues);

        let entries = self.shape_entries(input.key, &ordered, &stats, &leagues, directory);

        info!(
            partition = %input.key,
            teams = entries.len(),
            boosted = entries.iter().filter(|e| e.boosted).count(),
            "Partition ranked"
        );

        Ok(PartitionRankings {
            key: input.key,
            generated_at: current_timestamp(),
            entries,
        })
    }

    /// Rank every partition, in key order
    pub fn rank_all(
        &self,
        inputs: &[PartitionInput],
        directory: &dyn TeamDirectory,
    ) -> Result<Vec<PartitionRankings>> {
        let mut results = Vec::with_capacity(inputs.len());
        for input in inputs {
            results.push(self.rank_partition(input, directory)?);
        }
        Ok(results)
    }

    /// Turn the finalized order into serializable entries
    ///
    /// Class and league ranks re-enumerate the already-final state order
    /// restricted to each group; they are never an independent sort.
    fn shape_entries(
        &self,
        key: PartitionKey,
        ordered: &[crate::ranking::OrderedTeam],
        stats: &BTreeMap<TeamId, TeamSeasonStats>,
        leagues: &BTreeMap<TeamId, String>,
        directory: &dyn TeamDirectory,
    ) -> Vec<RankedEntry> {
        let classifications: BTreeMap<TeamId, String> = stats
            .keys()
            .filter_map(|&id| directory.classification(id).map(|class| (id, class)))
            .collect();

        // Depth percentage and classification averages feed the FWS+ index
        let fws_pct: BTreeMap<TeamId, f64> = stats
            .iter()
            .map(|(&id, s)| {
                let played = s.flights_played();
                let pct = if played > 0 {
                    s.flights_won() as f64 / played as f64 * 100.0
                } else {
                    0.0
                };
                (id, pct)
            })
            .collect();

        let mut class_totals: BTreeMap<String, (f64, u32)> = BTreeMap::new();
        for team in ordered {
            if let Some(class) = classifications.get(&team.team_id()) {
                let entry = class_totals.entry(class.clone()).or_insert((0.0, 0));
                entry.0 += fws_pct[&team.team_id()];
                entry.1 += 1;
            }
        }

        let mut class_counters: BTreeMap<String, u32> = BTreeMap::new();
        let mut league_counters: BTreeMap<String, u32> = BTreeMap::new();
        let mut entries = Vec::with_capacity(ordered.len());

        for (idx, team) in ordered.iter().enumerate() {
            let team_id = team.team_id();
            let team_stats = &stats[&team_id];
            let info = directory.lookup(team_id);

            let classification = classifications.get(&team_id).cloned().unwrap_or_default();
            let league = leagues.get(&team_id).cloned().unwrap_or_default();

            let class_rank = if classification.is_empty() {
                None
            } else {
                let counter = class_counters.entry(classification.clone()).or_insert(0);
                *counter += 1;
                Some(*counter)
            };

            let league_rank = if league.is_empty() {
                None
            } else {
                let counter = league_counters.entry(league.clone()).or_insert(0);
                *counter += 1;
                Some(*counter)
            };

            let fws_plus = if classification.is_empty() {
                None
            } else {
                let (sum, count) = class_totals[&classification];
                let average = sum / f64::from(count);
                if average <= f64::EPSILON {
                    // A classification with no flight wins at all is scored
                    // as uniformly average
                    Some(100)
                } else {
                    Some((fws_pct[&team_id] / average * 100.0).round() as i64)
                }
            };

            entries.push(RankedEntry {
                season: key.season,
                gender: key.gender,
                team_id,
                name: directory.display_name(team_id),
                city: info.map(|i| i.city).unwrap_or_default(),
                classification,
                league,
                rating: team.rating.clone(),
                record: team_stats.record_string(),
                league_record: team_stats.league_record_string(),
                matches_played: team_stats.flights_played(),
                opponents_count: team_stats.opponents.len(),
                state_rank: (idx + 1) as u32,
                class_rank,
                league_rank,
                fws_plus,
                boosted: team.boosted(),
                boost_reason: team.boost,
            });
        }

        entries
    }
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self {
            rating_config: RatingConfig::default(),
            tiebreak_config: TiebreakConfig::default(),
        }
    }
}
