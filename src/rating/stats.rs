//! Per-team season aggregation
//!
//! One pass over a team's extracted dual meets produces everything the
//! rating pipeline and the tiebreak ledger need. Stats are not mutated after
//! aggregation, except for the league-only tallies the driver fills in once
//! the directory is available.

use crate::ingest::extractor::extract_team_duals;
use crate::ingest::record::SeasonRecord;
use crate::types::{DualMeet, MeetResult, TeamId};
use crate::utils::format_record;
use std::collections::BTreeSet;

/// Aggregate season statistics for one team within one partition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamSeasonStats {
    pub team_id: TeamId,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub league_wins: u32,
    pub league_losses: u32,
    pub league_ties: u32,
    pub duals: Vec<DualMeet>,
    /// Distinct opponents faced; ordered so downstream float accumulation is
    /// deterministic
    pub opponents: BTreeSet<TeamId>,
}

impl TeamSeasonStats {
    /// Aggregate a team's qualifying duals from its raw season record
    pub fn collect(record: &SeasonRecord, team_id: TeamId) -> Self {
        let duals = extract_team_duals(record, team_id);

        let mut stats = Self {
            team_id,
            ..Self::default()
        };

        for dual in &duals {
            match dual.result {
                MeetResult::Win => stats.wins += 1,
                MeetResult::Loss => stats.losses += 1,
                MeetResult::Tie => stats.ties += 1,
            }
            stats.opponents.insert(dual.opponent);
        }

        stats.duals = duals;
        stats
    }

    /// Fill in the league-only record given a league membership test for
    /// opponents
    pub fn tally_league<F>(&mut self, is_league_opponent: F)
    where
        F: Fn(TeamId) -> bool,
    {
        self.league_wins = 0;
        self.league_losses = 0;
        self.league_ties = 0;

        for dual in &self.duals {
            if !is_league_opponent(dual.opponent) {
                continue;
            }
            match dual.result {
                MeetResult::Win => self.league_wins += 1,
                MeetResult::Loss => self.league_losses += 1,
                MeetResult::Tie => self.league_ties += 1,
            }
        }
    }

    /// Number of qualifying dual meets
    pub fn duals_played(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    /// A team with no qualifying duals is excluded from its partition
    pub fn has_duals(&self) -> bool {
        !self.duals.is_empty()
    }

    /// Individual flights contested across all duals
    pub fn flights_played(&self) -> usize {
        self.duals.iter().map(|d| d.flights.len()).sum()
    }

    /// Individual flights won across all duals
    pub fn flights_won(&self) -> usize {
        self.duals
            .iter()
            .flat_map(|d| &d.flights)
            .filter(|f| f.won)
            .count()
    }

    /// Dual-meet record string, e.g. "12-3" or "12-3-1"
    pub fn record_string(&self) -> String {
        format_record(self.wins, self.losses, self.ties)
    }

    /// League-only record string
    pub fn league_record_string(&self) -> String {
        format_record(self.league_wins, self.league_losses, self.league_ties)
    }
}
