//! Property tests for the placement validator.

use proptest::prelude::*;

use crate::domain::cards::{CardId, Year, YearBook};
use crate::domain::identity::PlayerIdentity;
use crate::domain::placement::{evaluate, insert_at};
use crate::domain::state::TimelineEntry;
use crate::domain::test_state_helpers::T0;
use crate::domain::{test_gens, test_prelude};

fn build(years: &[Year]) -> (Vec<TimelineEntry>, YearBook) {
    let mut timeline = Vec::new();
    let mut book = YearBook::new();
    for (i, y) in years.iter().enumerate() {
        let id = CardId(format!("t{i}"));
        book.insert(id.clone(), *y);
        insert_at(&mut timeline, i, id, PlayerIdentity::user(1), T0);
    }
    (timeline, book)
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: the verdict matches a direct neighbour comparison.
    #[test]
    fn prop_verdict_matches_neighbours((years, candidate, boundary) in test_gens::placement_case()) {
        let (timeline, mut book) = build(&years);
        let cand = CardId::from("candidate");
        book.insert(cand.clone(), candidate);

        let check = evaluate(&timeline, &cand, boundary, &book).unwrap();
        let b = boundary as usize;
        let expected = if years.is_empty() {
            true
        } else {
            let before_ok = b == 0 || years[b - 1] <= candidate;
            let after_ok = b == years.len() || candidate <= years[b];
            before_ok && after_ok
        };
        prop_assert_eq!(check.is_correct, expected);
        prop_assert_eq!(check.position, if years.is_empty() { 0 } else { b });
        prop_assert_eq!(check.candidate_year, candidate);
    }

    /// Property: a sorted timeline always has a correct boundary, and
    /// inserting there keeps it sorted.
    #[test]
    fn prop_sorted_timeline_accepts_some_boundary(
        mut years in test_gens::timeline_years(12),
        candidate in test_gens::year(),
    ) {
        years.sort_unstable();
        let (mut timeline, mut book) = build(&years);
        let cand = CardId::from("candidate");
        book.insert(cand.clone(), candidate);

        let correct: Vec<u32> = (0..=years.len() as u32)
            .filter(|&b| evaluate(&timeline, &cand, b, &book).unwrap().is_correct)
            .collect();
        prop_assert!(!correct.is_empty());

        insert_at(&mut timeline, correct[0] as usize, cand, PlayerIdentity::user(2), T0);
        let placed: Vec<Year> = timeline.iter().map(|e| book.get(&e.card_id).unwrap()).collect();
        prop_assert!(placed.windows(2).all(|w| w[0] <= w[1]));
    }

    /// Property: insertion keeps positions contiguous and shifts later cards.
    #[test]
    fn prop_insert_renumbers((years, _candidate, boundary) in test_gens::placement_case()) {
        let (mut timeline, _) = build(&years);
        let before: Vec<CardId> = timeline.iter().map(|e| e.card_id.clone()).collect();
        insert_at(&mut timeline, boundary as usize, CardId::from("new"), PlayerIdentity::user(3), T0);

        for (idx, entry) in timeline.iter().enumerate() {
            prop_assert_eq!(entry.position as usize, idx);
        }
        prop_assert_eq!(&timeline[boundary as usize].card_id, &CardId::from("new"));
        let rest: Vec<CardId> = timeline
            .iter()
            .filter(|e| e.card_id.as_str() != "new")
            .map(|e| e.card_id.clone())
            .collect();
        prop_assert_eq!(rest, before);
    }
}
