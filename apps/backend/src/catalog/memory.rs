//! In-process catalog backed by a fixed list of entries.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{CardCatalog, CatalogError};
use crate::domain::cards::{CardId, Year};
use crate::domain::state::Difficulty;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: CardId,
    pub year: Year,
    pub difficulty: Difficulty,
    pub category: String,
}

impl CatalogEntry {
    pub fn new(
        id: impl Into<CardId>,
        year: Year,
        difficulty: Difficulty,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            year,
            difficulty,
            category: category.into(),
        }
    }
}

pub struct InMemoryCatalog {
    entries: Vec<CatalogEntry>,
    years: HashMap<CardId, Year>,
    forgotten: Mutex<HashSet<CardId>>,
    rng: Mutex<StdRng>,
}

impl InMemoryCatalog {
    /// Catalog whose samples are shuffled by an RNG seeded with `seed`.
    pub fn new(entries: Vec<CatalogEntry>, seed: u64) -> Self {
        let years = entries.iter().map(|e| (e.id.clone(), e.year)).collect();
        Self {
            entries,
            years,
            forgotten: Mutex::new(HashSet::new()),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Catalog seeded from OS entropy.
    pub fn unseeded(entries: Vec<CatalogEntry>) -> Self {
        Self::new(entries, rand::random())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Make `card` unresolvable from now on. Sampling skips it too.
    pub fn forget(&self, card: &CardId) {
        self.forgotten.lock().insert(card.clone());
    }

    /// Year lookup that bypasses the async seam.
    pub fn year_of(&self, card: &CardId) -> Option<Year> {
        if self.forgotten.lock().contains(card) {
            return None;
        }
        self.years.get(card).copied()
    }
}

#[async_trait]
impl CardCatalog for InMemoryCatalog {
    async fn resolve_year(&self, card: &CardId) -> Result<Year, CatalogError> {
        self.year_of(card)
            .ok_or_else(|| CatalogError::UnknownCard(card.clone()))
    }

    async fn sample_by_difficulty(
        &self,
        difficulty: Difficulty,
        categories: &[String],
        count: usize,
    ) -> Result<Vec<CardId>, CatalogError> {
        let forgotten = self.forgotten.lock().clone();
        let mut matching: Vec<CardId> = self
            .entries
            .iter()
            .filter(|e| e.difficulty == difficulty)
            .filter(|e| categories.is_empty() || categories.contains(&e.category))
            .filter(|e| !forgotten.contains(&e.id))
            .map(|e| e.id.clone())
            .collect();

        matching.shuffle(&mut *self.rng.lock());
        matching.truncate(count);
        Ok(matching)
    }
}
