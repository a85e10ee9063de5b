//! Match extraction from raw season records
//!
//! Pure transform from one team's raw meet collection to its qualifying dual
//! meets: the dual filter, opponent identification, team-level outcome, and
//! the per-flight results the rating pipeline consumes. Malformed meets are
//! skipped for the team rather than failing the partition.

use crate::ingest::record::{FlightEntry, Meet, MeetSchools, SeasonRecord};
use crate::rating::weights::flight_weight;
use crate::types::{DualMeet, FlightResult, MatchCategory, MeetResult, TeamId};
use tracing::debug;

/// Title fragments that mark multi-team or championship events
const NON_DUAL_TITLE_MARKERS: [&str; 3] = ["State Championship", "District", "Tournament"];

/// Check whether a meet qualifies as a dual match
///
/// A dual has exactly one team on each side and a title that does not mark a
/// tournament, district meet, state championship, or numbered multi-team
/// event.
pub fn is_dual_meet(meet: &Meet) -> bool {
    if NON_DUAL_TITLE_MARKERS
        .iter()
        .any(|marker| meet.title.contains(marker))
    {
        return false;
    }

    if is_numbered_event_title(&meet.title) {
        return false;
    }

    meet.schools.winners.len() == 1 && meet.schools.losers.len() == 1
}

/// Multi-team listings arrive titled like "Event 5.2"
fn is_numbered_event_title(title: &str) -> bool {
    title.contains("Event") && title.contains('.')
}

/// Extract all qualifying dual meets for one team from its season record
pub fn extract_team_duals(record: &SeasonRecord, team_id: TeamId) -> Vec<DualMeet> {
    let mut duals = Vec::new();

    for meet in &record.meets {
        if !is_dual_meet(meet) {
            continue;
        }

        match extract_dual(meet, team_id) {
            Some(dual) => duals.push(dual),
            None => {
                debug!(
                    team_id,
                    title = %meet.title,
                    "Skipping meet without identifiable opponent"
                );
            }
        }
    }

    duals
}

fn extract_dual(meet: &Meet, team_id: TeamId) -> Option<DualMeet> {
    let (result, opponent) = classify_sides(&meet.schools, team_id)?;

    let mut flights = Vec::new();
    let sheet = &meet.matches;
    for (category, entries) in [
        (MatchCategory::Singles, &sheet.singles),
        (MatchCategory::Doubles, &sheet.doubles),
    ] {
        for entry in entries {
            if let Some(won) = flight_outcome(entry, team_id) {
                flights.push(FlightResult {
                    opponent,
                    category,
                    flight: entry.flight.clone(),
                    won,
                    weight: flight_weight(category, &entry.flight),
                });
            }
        }
    }

    Some(DualMeet {
        opponent,
        result,
        flights,
    })
}

/// Determine which side the team sat on and who the opponent was
///
/// The team-level result is independent of the individual flight outcomes.
/// Equal team scores on both sides mark a tie; otherwise side membership
/// decides. A meet the team appears in on neither side has no identifiable
/// opponent.
fn classify_sides(schools: &MeetSchools, team_id: TeamId) -> Option<(MeetResult, TeamId)> {
    let winner = schools.winners.first()?;
    let loser = schools.losers.first()?;

    let (mine, theirs, on_winner_side) = if winner.id == team_id {
        (winner, loser, true)
    } else if loser.id == team_id {
        (loser, winner, false)
    } else {
        return None;
    };

    let result = match (mine.score, theirs.score) {
        (Some(a), Some(b)) if a == b => MeetResult::Tie,
        _ if on_winner_side => MeetResult::Win,
        _ => MeetResult::Loss,
    };

    Some((result, theirs.id))
}

/// A flight counts as played iff the team's id appears on a roster; `won`
/// comes from that side's winner flag
fn flight_outcome(entry: &FlightEntry, team_id: TeamId) -> Option<bool> {
    for side in &entry.match_teams {
        if side
            .players
            .iter()
            .any(|player| player.school_id == Some(team_id))
        {
            return Some(side.is_winner);
        }
    }
    None
}
