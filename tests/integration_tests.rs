//! Integration tests for the rankings engine
//!
//! These tests exercise the full pipeline - extraction, rating, assembly,
//! and output shaping - over realistic raw season records, including the
//! worked single-meet example, head-to-head adjustments, determinism, and
//! the ranking invariants.

// Modules for organizing tests
mod fixtures;

use baseline_rankings::directory::StaticTeamDirectory;
use baseline_rankings::engine::{PartitionInput, RankingEngine};
use baseline_rankings::ingest::{SeasonSource, StaticSeasonSource};
use baseline_rankings::store::{InMemoryRankingStore, RankingStore};
use baseline_rankings::types::{BoostReason, Gender, PartitionKey, RankedEntry};

use fixtures::{
    boys_2024, directory_entry, dual_meet, full_dual, partition_from_meets, synthetic_directory,
};
use baseline_rankings::types::MatchCategory::{Doubles, Singles};

const EPS: f64 = 1e-9;

/// A mid-sized partition with a head-to-head cycle, a split series, and an
/// out-of-partition opponent; used by the determinism and invariant tests.
fn messy_partition() -> PartitionInput {
    let meets = vec![
        // Cycle: 101 beat 102, 102 beat 103, 103 beat 101
        full_dual(101, 102, [true, true, true, false, true, true, false, false]),
        full_dual(102, 103, [true, true, false, true, true, false, true, false]),
        full_dual(103, 101, [true, false, true, true, false, true, true, false]),
        // Split series between 104 and 105
        full_dual(104, 105, [true, true, true, false, true, false, false, false]),
        full_dual(105, 104, [true, true, false, false, true, true, false, false]),
        // Connectivity and depth spread
        full_dual(101, 104, [true, true, true, true, true, true, true, true]),
        full_dual(102, 106, [true, true, true, true, false, true, true, false]),
        full_dual(106, 105, [true, false, false, false, true, false, false, false]),
        // 999 never appears as a record owner: unknown opponent for 106
        full_dual(106, 999, [true, true, false, false, false, false, false, false]),
    ];

    let mut input = partition_from_meets(boys_2024(), meets);
    input.records.remove(&999);
    input
}

/// One dual win over an unknown opponent, taking S1, S2 and D1: every
/// rating field has a hand-checked expected value.
#[test]
fn test_single_meet_worked_example() {
    let meet = full_dual(10, 99, [true, true, false, false, true, false, false, false]);
    let mut input = partition_from_meets(boys_2024(), vec![meet]);
    input.records.remove(&99);

    let engine = RankingEngine::default();
    let rankings = engine
        .rank_partition(&input, &StaticTeamDirectory::new())
        .unwrap();

    assert_eq!(rankings.entries.len(), 1);
    let entry = &rankings.entries[0];

    assert_eq!(entry.team_id, 10);
    assert_eq!(entry.record, "1-0");
    assert_eq!(entry.matches_played, 8);
    assert_eq!(entry.opponents_count, 1);
    assert_eq!(entry.state_rank, 1);
    assert!(!entry.boosted);

    let expected_fws = (1.00 + 0.75 + 1.00) / 3.95;
    assert!((entry.rating.wp - 1.0).abs() < EPS);
    assert!((entry.rating.owp - 0.5).abs() < EPS);
    assert!((entry.rating.oowp - 0.5).abs() < EPS);
    assert!((entry.rating.apr - 0.625).abs() < EPS);
    assert!((entry.rating.fws_normalized - expected_fws).abs() < EPS);
    assert!((entry.rating.fws_raw - 2.75).abs() < EPS);
    assert!((entry.rating.power_index - (0.5 * 0.625 + 0.5 * expected_fws)).abs() < EPS);
    assert!((entry.rating.power_index - 0.660601).abs() < 1e-5);
}

/// Teams whose only appearances are tournaments or multi-team events are
/// absent from the partition output.
#[test]
fn test_team_with_only_non_dual_meets_is_absent() {
    let mut tournament = full_dual(3, 4, [true; 8]);
    tournament.title = "Districts Tournament".to_string();
    let mut event = full_dual(3, 5, [true; 8]);
    event.title = "Event 7.1".to_string();

    let meets = vec![full_dual(1, 2, [true; 8]), tournament, event];
    let input = partition_from_meets(boys_2024(), meets);

    let engine = RankingEngine::default();
    let rankings = engine
        .rank_partition(&input, &StaticTeamDirectory::new())
        .unwrap();

    let ids: Vec<u32> = rankings.entries.iter().map(|e| e.team_id).collect();
    assert_eq!(ids, vec![1, 2]);
}

/// A league series winner ends up directly above the rival it beat even
/// when its Power Index is far lower.
#[test]
fn test_league_series_winner_ranked_above_rival() {
    let meets = vec![
        // 2 won the meet against 1, but 1 took the heavy flights
        dual_meet(
            2,
            1,
            &[
                (Singles, "1", 1),
                (Singles, "2", 1),
                (Singles, "3", 2),
                (Singles, "4", 2),
                (Doubles, "1", 1),
                (Doubles, "2", 2),
                (Doubles, "3", 2),
                (Doubles, "4", 2),
            ],
        ),
        full_dual(1, 3, [true; 8]),
        full_dual(1, 4, [true; 8]),
        dual_meet(2, 4, &[(Singles, "1", 2)]),
    ];

    let directory = StaticTeamDirectory::from_entries(vec![
        directory_entry(1, "One", "6A", "Intermountain"),
        directory_entry(2, "Two", "6A", "Intermountain"),
        directory_entry(3, "Three", "6A", ""),
        directory_entry(4, "Four", "6A", ""),
    ]);

    let input = partition_from_meets(boys_2024(), meets);
    let engine = RankingEngine::default();
    let rankings = engine.rank_partition(&input, &directory).unwrap();

    let two = rankings.entries.iter().find(|e| e.team_id == 2).unwrap();
    let one = rankings.entries.iter().find(|e| e.team_id == 1).unwrap();

    // Sanity: 1 carries the higher raw Power Index
    assert!(one.rating.power_index > two.rating.power_index);
    // But 2 won the series and shares the league
    assert_eq!(two.state_rank, 1);
    assert_eq!(one.state_rank, 2);
    assert!(two.boosted);
    assert_eq!(two.boost_reason, BoostReason::League);
    assert_eq!(two.league_rank, Some(1));
    assert_eq!(one.league_rank, Some(2));
}

/// Identical input produces bit-for-bit identical output.
#[test]
fn test_repeated_runs_are_identical() {
    let engine = RankingEngine::default();
    let input = messy_partition();
    let directory = synthetic_directory(&[101, 102, 103, 104, 105, 106]);

    let first = engine.rank_partition(&input, &directory).unwrap();
    let second = engine.rank_partition(&input, &directory).unwrap();

    let first_json = serde_json::to_string(&first.entries).unwrap();
    let second_json = serde_json::to_string(&second.entries).unwrap();
    assert_eq!(first_json, second_json);
}

/// Outside applied swaps, the final order is a descending Power Index sort.
#[test]
fn test_power_index_non_increasing_outside_boosts() {
    let engine = RankingEngine::default();
    let input = messy_partition();
    let directory = synthetic_directory(&[101, 102, 103, 104, 105, 106]);

    let rankings = engine.rank_partition(&input, &directory).unwrap();
    assert!(!rankings.entries.is_empty());

    for pair in rankings.entries.windows(2) {
        if !pair[0].boosted && !pair[1].boosted {
            assert!(
                pair[0].rating.power_index >= pair[1].rating.power_index,
                "inversion without a boost: {} above {}",
                pair[0].team_id,
                pair[1].team_id
            );
        }
    }
}

/// Class and league ranks are restrictions of the state order, and every
/// rating field stays inside [0, 1].
#[test]
fn test_group_ranks_and_bounds() {
    let engine = RankingEngine::default();
    let input = messy_partition();
    let directory = synthetic_directory(&[101, 102, 103, 104, 105, 106]);

    let rankings = engine.rank_partition(&input, &directory).unwrap();

    let mut class_seen: std::collections::BTreeMap<&str, u32> = Default::default();
    let mut league_seen: std::collections::BTreeMap<&str, u32> = Default::default();

    for (idx, entry) in rankings.entries.iter().enumerate() {
        assert_eq!(entry.state_rank, (idx + 1) as u32);

        let class_counter = class_seen.entry(entry.classification.as_str()).or_insert(0);
        *class_counter += 1;
        assert_eq!(entry.class_rank, Some(*class_counter));

        let league_counter = league_seen.entry(entry.league.as_str()).or_insert(0);
        *league_counter += 1;
        assert_eq!(entry.league_rank, Some(*league_counter));

        for value in [
            entry.rating.wp,
            entry.rating.owp,
            entry.rating.oowp,
            entry.rating.apr,
            entry.rating.fws_normalized,
            entry.rating.power_index,
        ] {
            assert!((0.0..=1.0).contains(&value));
        }
    }
}

/// Full collaborator flow: a season source materializes records, the engine
/// ranks them, and the store serves the finalized partitions back.
#[tokio::test]
async fn test_source_engine_store_flow() {
    let mut source = StaticSeasonSource::new();
    let boys = partition_from_meets(boys_2024(), vec![full_dual(1, 2, [true; 8])]);
    for (team_id, record) in boys.records.clone() {
        source.insert_record(boys.key, team_id, record);
    }

    let girls_key = PartitionKey {
        season: 2024,
        gender: Gender::Girls,
    };
    let girls = partition_from_meets(girls_key, vec![full_dual(2, 1, [true; 8])]);
    for (team_id, record) in girls.records.clone() {
        source.insert_record(girls_key, team_id, record);
    }

    let engine = RankingEngine::default();
    let directory = StaticTeamDirectory::new();
    let store = InMemoryRankingStore::new();

    for key in source.partitions().await.unwrap() {
        let records = source.load_partition(key).await.unwrap();
        let rankings = engine
            .rank_partition(&PartitionInput { key, records }, &directory)
            .unwrap();
        store.store_partition(rankings).unwrap();
    }

    assert_eq!(store.partition_count().unwrap(), 2);

    let boys_out = store.get_partition(&boys.key).unwrap().unwrap();
    assert_eq!(boys_out.entries[0].team_id, 1);

    let girls_out = store.get_partition(&girls_key).unwrap().unwrap();
    assert_eq!(girls_out.entries[0].team_id, 2);
}

/// Concurrent partition execution matches sequential execution.
#[tokio::test]
async fn test_concurrent_partitions_match_sequential() {
    let engine = RankingEngine::default();
    let directory = synthetic_directory(&[101, 102, 103, 104, 105, 106]);

    let mut inputs = Vec::new();
    for season in [2023u16, 2024, 2025] {
        let mut input = messy_partition();
        input.key = PartitionKey {
            season,
            gender: Gender::Boys,
        };
        inputs.push(input);
    }

    let sequential: Vec<Vec<RankedEntry>> = inputs
        .iter()
        .map(|input| engine.rank_partition(input, &directory).unwrap().entries)
        .collect();

    let concurrent: Vec<Vec<RankedEntry>> = futures::future::join_all(
        inputs
            .iter()
            .map(|input| async { engine.rank_partition(input, &directory).unwrap().entries }),
    )
    .await;

    for (seq, conc) in sequential.iter().zip(&concurrent) {
        assert_eq!(
            serde_json::to_string(seq).unwrap(),
            serde_json::to_string(conc).unwrap()
        );
    }
}
