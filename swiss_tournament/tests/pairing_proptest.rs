//! Property-based tests for the pairing generator using proptest
//!
//! Standings are generated already sorted by wins (stable on ties), the way
//! the store hands them over.

use proptest::prelude::*;
use std::collections::HashMap;
use swiss_tournament::pairing::{PairingError, swiss_pairings};
use swiss_tournament::tournament::StandingsRow;

// Rows with unique ids, sorted by descending wins
fn rows_strategy(len: impl Strategy<Value = usize>) -> impl Strategy<Value = Vec<StandingsRow>> {
    len.prop_flat_map(|len| prop::collection::vec((0i64..8, 0i64..4, "[A-Z][a-z]{0,8}"), len))
        .prop_map(|entries| {
            let mut rows: Vec<StandingsRow> = entries
                .into_iter()
                .enumerate()
                .map(|(i, (wins, losses, name))| {
                    StandingsRow::new(i as i64 * 3 + 1, name, wins, wins + losses)
                })
                .collect();
            rows.sort_by(|a, b| b.wins.cmp(&a.wins));
            rows
        })
}

fn even_standings_strategy() -> impl Strategy<Value = Vec<StandingsRow>> {
    rows_strategy((0usize..=16).prop_map(|pairs| pairs * 2))
}

fn odd_standings_strategy() -> impl Strategy<Value = Vec<StandingsRow>> {
    rows_strategy((0usize..=16).prop_map(|pairs| pairs * 2 + 1))
}

proptest! {
    #[test]
    fn test_half_as_many_pairings_as_players(standings in even_standings_strategy()) {
        let pairings = swiss_pairings(&standings).unwrap();
        prop_assert_eq!(pairings.len(), standings.len() / 2);
    }

    #[test]
    fn test_every_player_paired_exactly_once(standings in even_standings_strategy()) {
        let pairings = swiss_pairings(&standings).unwrap();

        let mut paired: Vec<i64> = pairings
            .iter()
            .flat_map(|p| [p.player_a, p.player_b])
            .collect();
        let mut expected: Vec<i64> = standings.iter().map(|r| r.player_id).collect();
        paired.sort_unstable();
        expected.sort_unstable();

        prop_assert_eq!(paired, expected);
    }

    #[test]
    fn test_pairs_are_adjacent_in_rank(standings in even_standings_strategy()) {
        let pairings = swiss_pairings(&standings).unwrap();
        let position: HashMap<i64, usize> = standings
            .iter()
            .enumerate()
            .map(|(i, r)| (r.player_id, i))
            .collect();

        for (k, pairing) in pairings.iter().enumerate() {
            let a = position[&pairing.player_a];
            let b = position[&pairing.player_b];
            prop_assert_eq!(a, 2 * k);
            prop_assert_eq!(b, a + 1);
            prop_assert!(standings[a].wins >= standings[b].wins);
            prop_assert_eq!(&pairing.name_a, &standings[a].name);
            prop_assert_eq!(&pairing.name_b, &standings[b].name);
        }
    }

    #[test]
    fn test_pairing_is_deterministic(standings in even_standings_strategy()) {
        let first = swiss_pairings(&standings).unwrap();
        let second = swiss_pairings(&standings).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_odd_standings_rejected(standings in odd_standings_strategy()) {
        let err = swiss_pairings(&standings).unwrap_err();
        prop_assert_eq!(err, PairingError::OddPlayerCount(standings.len()));
    }
}

#[test]
fn test_four_player_example() {
    let standings = vec![
        StandingsRow::new(1, "A", 2, 2),
        StandingsRow::new(2, "B", 2, 2),
        StandingsRow::new(3, "C", 1, 2),
        StandingsRow::new(4, "D", 1, 2),
    ];

    let pairings = swiss_pairings(&standings).unwrap();
    let tuples: Vec<_> = pairings.iter().map(|p| p.as_tuple()).collect();

    assert_eq!(tuples, vec![(1, "A", 2, "B"), (3, "C", 4, "D")]);
}
