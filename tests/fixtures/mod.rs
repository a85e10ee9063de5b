//! Shared fixtures for integration tests
//!
//! Builders for raw meets, partitions, and directories, shaped like the
//! upstream match-history payloads.

use baseline_rankings::directory::{DirectoryEntry, StaticTeamDirectory};
use baseline_rankings::engine::PartitionInput;
use baseline_rankings::ingest::record::{
    FlightEntry, MatchTeam, Meet, MeetSchools, RosterPlayer, SchoolSide,
};
use baseline_rankings::ingest::SeasonRecord;
use baseline_rankings::types::{Gender, MatchCategory, PartitionKey, TeamId};
use std::collections::BTreeMap;

/// One side of a flight with a single rostered player
pub fn roster(team_id: TeamId, won: bool) -> MatchTeam {
    MatchTeam {
        is_winner: won,
        players: vec![RosterPlayer {
            school_id: Some(team_id),
        }],
    }
}

/// Build a dual meet; each flight is (category, label, winner of the flight)
pub fn dual_meet(winner: TeamId, loser: TeamId, flights: &[(MatchCategory, &str, TeamId)]) -> Meet {
    let mut meet = Meet {
        title: format!("School {} vs School {}", winner, loser),
        schools: MeetSchools {
            winners: vec![SchoolSide {
                id: winner,
                score: None,
            }],
            losers: vec![SchoolSide {
                id: loser,
                score: None,
            }],
        },
        ..Meet::default()
    };

    for &(category, label, flight_winner) in flights {
        let flight_loser = if flight_winner == winner { loser } else { winner };
        let entry = FlightEntry {
            flight: label.to_string(),
            match_teams: vec![roster(flight_winner, true), roster(flight_loser, false)],
        };
        match category {
            MatchCategory::Singles => meet.matches.singles.push(entry),
            MatchCategory::Doubles => meet.matches.doubles.push(entry),
        }
    }

    meet
}

/// A full eight-flight dual; `winner_flights` masks which of S1-S4, D1-D4
/// the meet winner took (true = winner won that flight)
pub fn full_dual(winner: TeamId, loser: TeamId, winner_flights: [bool; 8]) -> Meet {
    let labels = ["1", "2", "3", "4"];
    let mut flights = Vec::new();
    for (i, label) in labels.iter().enumerate() {
        let flight_winner = if winner_flights[i] { winner } else { loser };
        flights.push((MatchCategory::Singles, *label, flight_winner));
    }
    for (i, label) in labels.iter().enumerate() {
        let flight_winner = if winner_flights[i + 4] { winner } else { loser };
        flights.push((MatchCategory::Doubles, *label, flight_winner));
    }
    dual_meet(winner, loser, &flights)
}

/// Distribute meets into each participant's season record
pub fn partition_from_meets(key: PartitionKey, meets: Vec<Meet>) -> PartitionInput {
    let mut records: BTreeMap<TeamId, SeasonRecord> = BTreeMap::new();
    for meet in meets {
        for school in meet
            .schools
            .winners
            .iter()
            .chain(meet.schools.losers.iter())
        {
            records
                .entry(school.id)
                .or_default()
                .meets
                .push(meet.clone());
        }
    }
    PartitionInput { key, records }
}

pub fn boys_2024() -> PartitionKey {
    PartitionKey {
        season: 2024,
        gender: Gender::Boys,
    }
}

pub fn directory_entry(id: TeamId, name: &str, class: &str, league: &str) -> DirectoryEntry {
    DirectoryEntry {
        id,
        name: name.to_string(),
        city: String::new(),
        classification: class.to_string(),
        league: league.to_string(),
    }
}

/// A directory that cycles teams through two classifications and three
/// leagues, for invariant tests over generated partitions
pub fn synthetic_directory(team_ids: &[TeamId]) -> StaticTeamDirectory {
    let classes = ["6A", "5A"];
    let leagues = ["Intermountain", "Mt Hood", "Pacific"];
    let entries = team_ids
        .iter()
        .enumerate()
        .map(|(i, &id)| {
            directory_entry(
                id,
                &format!("School {}", id),
                classes[i % classes.len()],
                leagues[i % leagues.len()],
            )
        })
        .collect();
    StaticTeamDirectory::from_entries(entries)
}
