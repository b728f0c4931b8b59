//! Card identity and year types.
//!
//! The engine only needs a card's identifier and its chronological year;
//! titles, images and other catalog metadata stay with the catalog.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Chronological year of a historical event. Negative values are BCE.
pub type Year = i32;

/// Opaque catalog identifier of a card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A card dealt out of the draw pile.
///
/// `draw_order` is assigned once when the pile is seeded and never changes,
/// so initial deals can be reproduced and reviewed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawnCard {
    pub card_id: CardId,
    pub draw_order: u32,
}

/// A card together with the year the catalog resolved for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedCard {
    pub card_id: CardId,
    pub year: Year,
}

/// Years resolved by the catalog for the cards a single operation touches.
///
/// Built by the service after the catalog lookup and handed to the pure
/// domain handlers, which never perform I/O themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearBook {
    years: HashMap<CardId, Year>,
}

impl YearBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, card: CardId, year: Year) {
        self.years.insert(card, year);
    }

    pub fn get(&self, card: &CardId) -> Option<Year> {
        self.years.get(card).copied()
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

impl From<HashMap<CardId, Year>> for YearBook {
    fn from(years: HashMap<CardId, Year>) -> Self {
        Self { years }
    }
}

impl FromIterator<(CardId, Year)> for YearBook {
    fn from_iter<I: IntoIterator<Item = (CardId, Year)>>(iter: I) -> Self {
        Self {
            years: iter.into_iter().collect(),
        }
    }
}
