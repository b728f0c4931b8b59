//! Synthetic card catalog for simulations.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use timeline_backend::catalog::CatalogEntry;
use timeline_backend::domain::Difficulty;

const CATEGORIES: [&str; 4] = ["history", "science", "arts", "sports"];

/// Year span each difficulty draws from. Harder decks cluster events closer
/// together, so neighbouring cards are easier to confuse.
fn year_span(difficulty: Difficulty) -> (i32, i32) {
    match difficulty {
        Difficulty::Easy => (-3000, 2025),
        Difficulty::Medium => (1000, 2025),
        Difficulty::Hard => (1900, 2025),
    }
}

/// `per_difficulty` cards for each difficulty, with years drawn from a
/// generator seeded by `seed`.
pub fn build_deck(per_difficulty: usize, seed: u64) -> Vec<CatalogEntry> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut entries = Vec::with_capacity(per_difficulty * 3);
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let (lo, hi) = year_span(difficulty);
        for n in 0..per_difficulty {
            entries.push(CatalogEntry::new(
                format!("{difficulty}-{n:04}"),
                rng.random_range(lo..=hi),
                difficulty,
                CATEGORIES[n % CATEGORIES.len()],
            ));
        }
    }
    entries
}
