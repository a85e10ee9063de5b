//! Team directory lookup
//!
//! The engine consumes team metadata (display name, classification, league)
//! from an externally supplied directory. Unknown ids are tolerated: the
//! team renders with a fallback label and its classification- and
//! league-derived features stay empty.

use crate::types::{TeamId, TeamInfo};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Trait for team metadata lookups
pub trait TeamDirectory: Send + Sync {
    /// Get the metadata for a team, if the directory knows it
    fn lookup(&self, team_id: TeamId) -> Option<TeamInfo>;

    /// Display name with the fallback label for unknown teams
    fn display_name(&self, team_id: TeamId) -> String {
        self.lookup(team_id)
            .map(|info| info.name)
            .unwrap_or_else(|| format!("School {}", team_id))
    }

    /// League label, if known and non-empty
    fn league(&self, team_id: TeamId) -> Option<String> {
        self.lookup(team_id)
            .map(|info| info.league)
            .filter(|league| !league.is_empty())
    }

    /// Classification label, if known and non-empty
    fn classification(&self, team_id: TeamId) -> Option<String> {
        self.lookup(team_id)
            .map(|info| info.classification)
            .filter(|class| !class.is_empty())
    }
}

/// One row of the externally maintained team listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub classification: String,
    #[serde(default)]
    pub league: String,
}

/// In-memory directory built from a loaded team listing
#[derive(Debug, Clone, Default)]
pub struct StaticTeamDirectory {
    teams: HashMap<TeamId, TeamInfo>,
}

impl StaticTeamDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from listing rows; later rows win on duplicate ids
    pub fn from_entries(entries: Vec<DirectoryEntry>) -> Self {
        let mut teams = HashMap::new();
        for entry in entries {
            teams.insert(
                entry.id,
                TeamInfo {
                    name: entry.name,
                    city: entry.city,
                    classification: entry.classification,
                    league: entry.league,
                },
            );
        }
        Self { teams }
    }

    /// Add or replace one team's metadata
    pub fn insert(&mut self, team_id: TeamId, info: TeamInfo) {
        self.teams.insert(team_id, info);
    }

    /// Number of known teams
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

impl TeamDirectory for StaticTeamDirectory {
    fn lookup(&self, team_id: TeamId) -> Option<TeamInfo> {
        self.teams.get(&team_id).cloned()
    }
}
