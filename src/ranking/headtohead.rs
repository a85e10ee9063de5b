//! Head-to-head ledger
//!
//! Per ordered team pair: the meet-level record between the two and the
//! flight-weighted points earned in those specific meetings. Each entry is
//! built from the first team's own season stats, so both perspectives of a
//! series exist independently.

use crate::rating::stats::TeamSeasonStats;
use crate::types::{MeetResult, TeamId};
use std::collections::BTreeMap;

/// Record of one team's meetings against one opponent
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairRecord {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    /// Flight-weighted points earned across the meetings in this series
    pub fws_points: f64,
}

impl PairRecord {
    /// Strictly more wins than losses across the series
    pub fn has_clear_edge(&self) -> bool {
        self.wins > self.losses
    }

    /// Equal wins and losses with at least one decided meeting
    pub fn is_split(&self) -> bool {
        self.wins == self.losses && self.wins + self.losses > 0
    }
}

/// All head-to-head series within one partition
#[derive(Debug, Default)]
pub struct HeadToHead {
    pairs: BTreeMap<(TeamId, TeamId), PairRecord>,
}

impl HeadToHead {
    /// Build the ledger from every team's aggregated stats
    pub fn from_stats(stats: &BTreeMap<TeamId, TeamSeasonStats>) -> Self {
        let mut pairs: BTreeMap<(TeamId, TeamId), PairRecord> = BTreeMap::new();

        for (&team_id, team_stats) in stats {
            for dual in &team_stats.duals {
                let entry = pairs.entry((team_id, dual.opponent)).or_default();
                match dual.result {
                    MeetResult::Win => entry.wins += 1,
                    MeetResult::Loss => entry.losses += 1,
                    MeetResult::Tie => entry.ties += 1,
                }
                entry.fws_points += dual.earned_weight();
            }
        }

        Self { pairs }
    }

    /// The series record of `team` against `opponent`, if they met
    pub fn record(&self, team: TeamId, opponent: TeamId) -> Option<&PairRecord> {
        self.pairs.get(&(team, opponent))
    }

    /// Did `team` win the season series against `opponent` outright?
    pub fn has_clear_edge(&self, team: TeamId, opponent: TeamId) -> bool {
        self.record(team, opponent)
            .map(PairRecord::has_clear_edge)
            .unwrap_or(false)
    }

    /// Is the season series between the two split?
    pub fn is_split_series(&self, team: TeamId, opponent: TeamId) -> bool {
        self.record(team, opponent)
            .map(PairRecord::is_split)
            .unwrap_or(false)
    }

    /// Flight-weighted points `team` earned in its meetings with `opponent`
    pub fn meeting_fws(&self, team: TeamId, opponent: TeamId) -> f64 {
        self.record(team, opponent)
            .map(|r| r.fws_points)
            .unwrap_or(0.0)
    }
}
