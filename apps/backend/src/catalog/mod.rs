//! Card catalog gateway.
//!
//! The engine never owns card content. It asks the catalog for a sample of
//! card ids when a session is created and for the years of the cards a
//! placement touches.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::cards::{CardId, Year, YearBook};
use crate::domain::state::Difficulty;

pub use memory::{CatalogEntry, InMemoryCatalog};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown card {0}")]
    UnknownCard(CardId),
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait CardCatalog: Send + Sync {
    /// Year of a single card.
    async fn resolve_year(&self, card: &CardId) -> Result<Year, CatalogError>;

    /// Years of several cards. Fails on the first card that cannot be
    /// resolved.
    async fn resolve_years(&self, cards: &[CardId]) -> Result<YearBook, CatalogError> {
        let mut book = YearBook::new();
        for card in cards {
            let year = self.resolve_year(card).await?;
            book.insert(card.clone(), year);
        }
        Ok(book)
    }

    /// Up to `count` distinct card ids matching the difficulty and, when
    /// `categories` is non-empty, one of the categories. Order is the deal
    /// order.
    async fn sample_by_difficulty(
        &self,
        difficulty: Difficulty,
        categories: &[String],
        count: usize,
    ) -> Result<Vec<CardId>, CatalogError>;
}
