//! Ranking assembly and head-to-head tiebreaks
//!
//! Baseline: a stable descending sort on Power Index (exact ties keep the
//! deterministic input order — an arbitrary but documented choice). Two
//! adjustment phases follow, both guarded by the shared cycle-avoidance
//! graph:
//!
//! 1. League enforcement: a team that won its season series against a league
//!    rival is bubbled to the position immediately above it, in repeated
//!    passes until none apply. The graph makes reversals unrepeatable, which
//!    is what terminates non-transitive series.
//! 2. Proximity pass: one left-to-right walk over adjacent pairs; when the
//!    Power Index gap is inside the statewide threshold or the pair are
//!    close league rivals, the lower team swaps up on a clear head-to-head
//!    edge, or on higher per-meeting FWS when the series is split.

use crate::config::TiebreakConfig;
use crate::ranking::graph::BeatsGraph;
use crate::ranking::headtohead::HeadToHead;
use crate::types::{BoostReason, TeamId, TeamRating};
use crate::utils::within_proximity;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// A rated team in its final position, with tiebreak provenance
#[derive(Debug, Clone)]
pub struct OrderedTeam {
    pub rating: TeamRating,
    pub boost: BoostReason,
}

impl OrderedTeam {
    fn new(rating: TeamRating) -> Self {
        Self {
            rating,
            boost: BoostReason::None,
        }
    }

    pub fn team_id(&self) -> TeamId {
        self.rating.team_id
    }

    pub fn boosted(&self) -> bool {
        self.boost != BoostReason::None
    }
}

/// Orders a partition's rated teams
#[derive(Debug)]
pub struct RankingAssembler<'a> {
    config: &'a TiebreakConfig,
}

impl<'a> RankingAssembler<'a> {
    pub fn new(config: &'a TiebreakConfig) -> Self {
        Self { config }
    }

    /// Produce the final total order for one partition
    ///
    /// `leagues` maps each team with a known league to its league label;
    /// teams without one only participate in the statewide condition.
    pub fn assemble(
        &self,
        ratings: Vec<TeamRating>,
        h2h: &HeadToHead,
        leagues: &BTreeMap<TeamId, String>,
    ) -> Vec<OrderedTeam> {
        let mut order: Vec<OrderedTeam> = ratings.into_iter().map(OrderedTeam::new).collect();

        order.sort_by(|a, b| {
            b.rating
                .power_index
                .partial_cmp(&a.rating.power_index)
                .unwrap_or(Ordering::Equal)
        });

        let mut graph = BeatsGraph::new();
        self.enforce_league_head_to_head(&mut order, h2h, leagues, &mut graph);
        self.proximity_pass(&mut order, h2h, leagues, &mut graph);

        order
    }

    /// Phase 1: bubble league series winners above the rivals they beat
    fn enforce_league_head_to_head(
        &self,
        order: &mut Vec<OrderedTeam>,
        h2h: &HeadToHead,
        leagues: &BTreeMap<TeamId, String>,
        graph: &mut BeatsGraph,
    ) {
        let league_names: BTreeSet<&str> = leagues.values().map(String::as_str).collect();
        // The graph guarantees settling; the cap only guards degenerate data
        let max_passes = order.len() * order.len() + 1;
        let mut passes = 0;

        loop {
            let mut moved = false;

            for league in &league_names {
                let members: Vec<TeamId> = order
                    .iter()
                    .map(OrderedTeam::team_id)
                    .filter(|id| leagues.get(id).map(String::as_str) == Some(*league))
                    .collect();

                for &winner in &members {
                    for &loser in &members {
                        if winner == loser || !h2h.has_clear_edge(winner, loser) {
                            continue;
                        }

                        let (Some(winner_pos), Some(loser_pos)) =
                            (position(order, winner), position(order, loser))
                        else {
                            continue;
                        };
                        if winner_pos <= loser_pos {
                            continue;
                        }

                        if graph.would_close_cycle(winner, loser) {
                            debug!(
                                winner,
                                loser, "Skipping league adjustment that would close a cycle"
                            );
                            continue;
                        }

                        // Contiguous block shift: winner lands directly above
                        // the rival it beat
                        let team = order.remove(winner_pos);
                        order.insert(loser_pos, team);
                        order[loser_pos].boost =
                            order[loser_pos].boost.combine(BoostReason::League);
                        graph.record(winner, loser);
                        moved = true;

                        debug!(
                            winner,
                            loser,
                            league = *league,
                            "Applied league head-to-head adjustment"
                        );
                    }
                }
            }

            passes += 1;
            if !moved {
                break;
            }
            if passes > max_passes {
                warn!(passes, "League head-to-head enforcement did not settle");
                break;
            }
        }
    }

    /// Phase 2: one adjacent-pair walk under the proximity conditions
    fn proximity_pass(
        &self,
        order: &mut [OrderedTeam],
        h2h: &HeadToHead,
        leagues: &BTreeMap<TeamId, String>,
        graph: &mut BeatsGraph,
    ) {
        // League positions are a snapshot of the phase-1-adjusted order
        let league_positions = league_positions(order, leagues);

        let mut i = 0;
        while i + 1 < order.len() {
            let higher = order[i].team_id();
            let lower = order[i + 1].team_id();

            let statewide = within_proximity(
                order[i].rating.power_index,
                order[i + 1].rating.power_index,
                self.config.power_gap_threshold,
            );

            let league_cond = match (leagues.get(&higher), leagues.get(&lower)) {
                (Some(a), Some(b)) if a == b => {
                    match (league_positions.get(&higher), league_positions.get(&lower)) {
                        (Some(&pa), Some(&pb)) => {
                            pa.abs_diff(pb) <= self.config.league_rank_window as usize
                        }
                        _ => false,
                    }
                }
                _ => false,
            };

            if (statewide || league_cond) && self.lower_wins_series(h2h, lower, higher) {
                if graph.would_close_cycle(lower, higher) {
                    debug!(
                        winner = lower,
                        loser = higher,
                        "Skipping proximity swap that would close a cycle"
                    );
                } else {
                    order.swap(i, i + 1);
                    graph.record(lower, higher);

                    let reason = match (league_cond, statewide) {
                        (true, true) => BoostReason::Both,
                        (true, false) => BoostReason::League,
                        _ => BoostReason::Statewide,
                    };
                    order[i].boost = order[i].boost.combine(reason);

                    debug!(winner = lower, loser = higher, ?reason, "Applied proximity swap");
                }
            }

            i += 1;
        }
    }

    /// Does the lower-ranked team take the series against the higher one?
    ///
    /// A clear edge (more wins than losses) always does; a split series
    /// falls back to the flight-weighted score earned in those specific
    /// meetings, and an equal score defers to Power Index order.
    fn lower_wins_series(&self, h2h: &HeadToHead, lower: TeamId, higher: TeamId) -> bool {
        if h2h.has_clear_edge(lower, higher) {
            return true;
        }
        if h2h.is_split_series(lower, higher) {
            return h2h.meeting_fws(lower, higher) > h2h.meeting_fws(higher, lower);
        }
        false
    }
}

fn position(order: &[OrderedTeam], team_id: TeamId) -> Option<usize> {
    order.iter().position(|t| t.team_id() == team_id)
}

/// Index of each team within its league, following the given order
fn league_positions(
    order: &[OrderedTeam],
    leagues: &BTreeMap<TeamId, String>,
) -> BTreeMap<TeamId, usize> {
    let mut counters: BTreeMap<&str, usize> = BTreeMap::new();
    let mut positions = BTreeMap::new();

    for team in order {
        if let Some(league) = leagues.get(&team.team_id()) {
            let counter = counters.entry(league.as_str()).or_insert(0);
            positions.insert(team.team_id(), *counter);
            *counter += 1;
        }
    }

    positions
}
