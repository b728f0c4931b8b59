//! Draw pile: the ordered pool of undealt cards for one session.
//!
//! Cards leave from the front in `draw_order` and are never returned.

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::domain::cards::{CardId, DrawnCard};
use crate::errors::domain::{DomainError, InfraErrorKind};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawPile {
    cards: VecDeque<DrawnCard>,
}

impl DrawPile {
    /// Seed a pile from catalog card ids, keeping catalog order.
    ///
    /// `draw_order` counts up from 0. Repeated ids are dropped so a card can
    /// never be in two places at once.
    pub fn seed<I>(card_ids: I) -> Self
    where
        I: IntoIterator<Item = CardId>,
    {
        let mut seen = HashSet::new();
        let cards = card_ids
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .enumerate()
            .map(|(order, card_id)| DrawnCard {
                card_id,
                draw_order: order as u32,
            })
            .collect();
        Self { cards }
    }

    /// Deal `count` cards from the front, or nothing at all.
    pub fn deal(&mut self, count: usize) -> Result<Vec<DrawnCard>, DomainError> {
        if self.cards.len() < count {
            return Err(DomainError::infra(
                InfraErrorKind::InsufficientCards,
                format!(
                    "Draw pile holds {} cards, {count} needed for a hand",
                    self.cards.len()
                ),
            ));
        }
        Ok(self.cards.drain(..count).collect())
    }

    /// Pop the next card, if any remain.
    pub fn draw(&mut self) -> Option<DrawnCard> {
        self.cards.pop_front()
    }

    pub fn peek(&self) -> Option<&DrawnCard> {
        self.cards.front()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawnCard> {
        self.cards.iter()
    }
}
