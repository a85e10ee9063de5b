//! Raw season record definitions and deserialization
//!
//! These structs mirror the upstream match-history payload one team's season
//! arrives as: a list of meets, each with a title, the two school groups, and
//! a match sheet keyed by category. Nested fields are default-tolerant so a
//! malformed meet or flight degrades to a skip instead of failing the whole
//! record; only a malformed top-level document is an error.

use crate::error::{RankingError, Result};
use crate::types::TeamId;
use serde::{Deserialize, Serialize};

/// One team's raw match history for a single (season, gender)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeasonRecord {
    #[serde(default)]
    pub meets: Vec<Meet>,
}

/// A single meet as reported upstream; may or may not be a dual
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub schools: MeetSchools,
    #[serde(default)]
    pub matches: MatchSheet,
}

/// Winner-side and loser-side team groups of a meet
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeetSchools {
    #[serde(default)]
    pub winners: Vec<SchoolSide>,
    #[serde(default)]
    pub losers: Vec<SchoolSide>,
}

/// One school on either side of a meet, with its optional team score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolSide {
    pub id: TeamId,
    #[serde(default)]
    pub score: Option<f64>,
}

/// Flight entries keyed by match category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchSheet {
    #[serde(default, rename = "Singles")]
    pub singles: Vec<FlightEntry>,
    #[serde(default, rename = "Doubles")]
    pub doubles: Vec<FlightEntry>,
}

/// One contested flight within a meet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightEntry {
    /// Flight label; upstream omits it for some legacy meets
    #[serde(default = "default_flight_label")]
    pub flight: String,
    #[serde(default, rename = "matchTeams")]
    pub match_teams: Vec<MatchTeam>,
}

fn default_flight_label() -> String {
    "1".to_string()
}

/// One side of a flight, with its roster
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchTeam {
    #[serde(default, rename = "isWinner")]
    pub is_winner: bool,
    #[serde(default)]
    pub players: Vec<RosterPlayer>,
}

/// A rostered player; the school linkage is what the extractor needs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterPlayer {
    #[serde(default, rename = "schoolId")]
    pub school_id: Option<TeamId>,
}

impl SeasonRecord {
    /// Parse a raw season record, failing fast on a malformed document
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| {
            RankingError::InvalidSeasonRecord {
                reason: format!("Failed to deserialize season record: {}", e),
            }
            .into()
        })
    }
}
