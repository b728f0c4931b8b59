// Proptest generators for session and timeline states.
// Card ids are always distinct so generated sessions satisfy card uniqueness.

use proptest::prelude::*;

use crate::domain::cards::{CardId, Year, YearBook};

/// A year within the range the catalog realistically covers.
pub fn year() -> impl Strategy<Value = Year> {
    -3000i32..=2100
}

/// Timeline years in placement order, not necessarily sorted.
pub fn timeline_years(max_len: usize) -> impl Strategy<Value = Vec<Year>> {
    prop::collection::vec(year(), 0..=max_len)
}

/// A candidate year plus a timeline to place it in.
pub fn placement_case() -> impl Strategy<Value = (Vec<Year>, Year, u32)> {
    timeline_years(12).prop_flat_map(|years| {
        let len = years.len() as u32;
        (Just(years), year(), 0..=len)
    })
}

/// Catalog of `count` cards named `c0..` with random years.
pub fn catalog(count: usize) -> impl Strategy<Value = YearBook> {
    prop::collection::vec(year(), count).prop_map(|years| {
        years
            .into_iter()
            .enumerate()
            .map(|(i, y)| (CardId(format!("c{i}")), y))
            .collect()
    })
}

/// One step in a generated game.
#[derive(Debug, Clone, Copy)]
pub enum Step {
    /// Current seat plays hand slot `slot % hand_len` at boundary
    /// `boundary % (timeline_len + 1)`.
    Place { slot: usize, boundary: u32 },
    /// A seat (by join index, modulo player count) leaves.
    Leave { seat_index: usize },
}

pub fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        8 => (any::<usize>(), any::<u32>()).prop_map(|(slot, boundary)| Step::Place { slot, boundary }),
        1 => any::<usize>().prop_map(|seat_index| Step::Leave { seat_index }),
    ]
}

pub fn steps(max_len: usize) -> impl Strategy<Value = Vec<Step>> {
    prop::collection::vec(step(), 0..=max_len)
}
