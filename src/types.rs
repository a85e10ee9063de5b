//! Common types used throughout the rankings engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Externally assigned identifier for a school's tennis program
pub type TeamId = u32;

/// Season year (e.g. 2024)
pub type Season = u16;

/// Gender division a partition is computed for
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Gender {
    Boys,
    Girls,
}

impl Gender {
    /// Map the source data's numeric gender id (1 = Boys, 2 = Girls)
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Gender::Boys),
            2 => Some(Gender::Girls),
            _ => None,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Boys => write!(f, "Boys"),
            Gender::Girls => write!(f, "Girls"),
        }
    }
}

/// Category of an individual flight within a dual meet
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum MatchCategory {
    Singles,
    Doubles,
}

impl std::fmt::Display for MatchCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchCategory::Singles => write!(f, "Singles"),
            MatchCategory::Doubles => write!(f, "Doubles"),
        }
    }
}

/// Team-level outcome of a dual meet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeetResult {
    Win,
    Loss,
    Tie,
}

/// One individual contest within a dual meet, from the owning team's side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightResult {
    pub opponent: TeamId,
    pub category: MatchCategory,
    /// Flight label as it appears in the source data ("1".."4" are standard)
    pub flight: String,
    pub won: bool,
    pub weight: f64,
}

/// One qualifying dual meet: the team-level outcome plus the flights the
/// owning team contested in it. Flights stay grouped per meet because both
/// the proportional FWS and the split-series tiebreak are per-meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualMeet {
    pub opponent: TeamId,
    pub result: MeetResult,
    pub flights: Vec<FlightResult>,
}

impl DualMeet {
    /// Flight-weighted points the owning team earned in this meet
    pub fn earned_weight(&self) -> f64 {
        self.flights
            .iter()
            .filter(|f| f.won)
            .map(|f| f.weight)
            .sum()
    }

    /// Total weight of the flights actually contested in this meet
    pub fn available_weight(&self) -> f64 {
        self.flights.iter().map(|f| f.weight).sum()
    }
}

/// Identifies one independently computed ranking partition
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PartitionKey {
    pub season: Season,
    pub gender: Gender,
}

impl std::fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.season, self.gender)
    }
}

/// Team metadata supplied by the external directory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub name: String,
    pub city: String,
    pub classification: String,
    pub league: String,
}

/// Derived per-team rating values for one partition
///
/// Invariants: `apr = 0.25*wp + 0.50*owp + 0.25*oowp`,
/// `power_index = 0.5*apr + 0.5*fws_normalized`, and all percentage-like
/// fields lie in [0, 1]. `fws_raw` is a display-only rescale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRating {
    pub team_id: TeamId,
    pub wp: f64,
    pub owp: f64,
    pub oowp: f64,
    pub apr: f64,
    pub fws_raw: f64,
    pub fws_normalized: f64,
    pub power_index: f64,
}

/// Why a team was moved upward by the head-to-head tiebreak pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoostReason {
    None,
    League,
    Statewide,
    Both,
}

impl BoostReason {
    /// Merge a newly earned reason into an already recorded one
    pub fn combine(self, other: BoostReason) -> BoostReason {
        use BoostReason::*;
        match (self, other) {
            (None, r) | (r, None) => r,
            (League, League) => League,
            (Statewide, Statewide) => Statewide,
            _ => Both,
        }
    }
}

impl Default for BoostReason {
    fn default() -> Self {
        BoostReason::None
    }
}

/// One finalized ranking row, shaped for direct serialization downstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub season: Season,
    pub gender: Gender,
    pub team_id: TeamId,
    pub name: String,
    pub city: String,
    pub classification: String,
    pub league: String,
    pub rating: TeamRating,
    /// Dual-meet record, e.g. "12-3" or "12-3-1" with ties
    pub record: String,
    pub league_record: String,
    /// Individual flights contested across all qualifying duals
    pub matches_played: usize,
    pub opponents_count: usize,
    pub state_rank: u32,
    /// Rank within the team's classification; absent when the team has none
    pub class_rank: Option<u32>,
    pub league_rank: Option<u32>,
    /// Classification-relative depth index; 100 is exactly average
    pub fws_plus: Option<i64>,
    pub boosted: bool,
    pub boost_reason: BoostReason,
}

/// Finalized output for one (season, gender) partition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionRankings {
    pub key: PartitionKey,
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<RankedEntry>,
}
