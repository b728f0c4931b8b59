//! Player strategies.
//!
//! A strategy sees what a real player would see (the public view and its own
//! hand) and picks a card and a boundary.

use std::sync::Arc;

use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::Rng;
use timeline_backend::catalog::InMemoryCatalog;
use timeline_backend::domain::placement::is_chronological;
use timeline_backend::domain::snapshot::{HandView, SessionView};
use timeline_backend::domain::CardId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyKind {
    /// Knows every year and plays a correct placement whenever one exists.
    Oracle,
    /// Uniformly random card and boundary.
    Random,
}

impl StrategyKind {
    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Oracle => "oracle",
            StrategyKind::Random => "random",
        }
    }

    pub fn build(self, catalog: &Arc<InMemoryCatalog>) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Oracle => Box::new(Oracle {
                catalog: Arc::clone(catalog),
            }),
            StrategyKind::Random => Box::new(RandomPlayer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub card: CardId,
    pub position: u32,
}

pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// `None` only when the hand is empty.
    fn choose(&self, view: &SessionView, hand: &HandView, rng: &mut StdRng) -> Option<Move>;
}

pub struct RandomPlayer;

impl Strategy for RandomPlayer {
    fn name(&self) -> &'static str {
        StrategyKind::Random.name()
    }

    fn choose(&self, view: &SessionView, hand: &HandView, rng: &mut StdRng) -> Option<Move> {
        if hand.cards.is_empty() {
            return None;
        }
        let card = &hand.cards[rng.random_range(0..hand.cards.len())];
        let position = rng.random_range(0..=view.timeline.len() as u32);
        Some(Move {
            card: card.card_id.clone(),
            position,
        })
    }
}

pub struct Oracle {
    catalog: Arc<InMemoryCatalog>,
}

impl Oracle {
    /// First boundary where `year` sits in order with its neighbours.
    fn correct_boundary(&self, timeline_years: &[Option<i32>], year: i32) -> Option<u32> {
        (0..=timeline_years.len()).find_map(|b| {
            let before = if b == 0 { None } else { timeline_years[b - 1] };
            let after = timeline_years.get(b).copied().flatten();
            is_chronological(before, year, after).then_some(b as u32)
        })
    }
}

impl Strategy for Oracle {
    fn name(&self) -> &'static str {
        StrategyKind::Oracle.name()
    }

    fn choose(&self, view: &SessionView, hand: &HandView, rng: &mut StdRng) -> Option<Move> {
        let timeline_years: Vec<Option<i32>> = view
            .timeline
            .iter()
            .map(|e| self.catalog.year_of(&e.card_id))
            .collect();

        for drawn in &hand.cards {
            let Some(year) = self.catalog.year_of(&drawn.card_id) else {
                continue;
            };
            if let Some(position) = self.correct_boundary(&timeline_years, year) {
                return Some(Move {
                    card: drawn.card_id.clone(),
                    position,
                });
            }
        }

        // No card in hand resolves
        RandomPlayer.choose(view, hand, rng)
    }
}
