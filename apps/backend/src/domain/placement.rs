//! Placement validation and timeline insertion.
//!
//! Wrong placements are scored, never rejected: the card always lands at the
//! requested boundary. Only structurally impossible boundaries are errors.

use time::OffsetDateTime;

use crate::domain::cards::{CardId, Year, YearBook};
use crate::domain::identity::PlayerIdentity;
use crate::domain::state::TimelineEntry;
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};

/// Result of checking a candidate against its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementCheck {
    pub is_correct: bool,
    /// Boundary the card will be inserted at.
    pub position: usize,
    pub candidate_year: Year,
}

/// Map a requested boundary onto the timeline.
///
/// An empty timeline accepts any request and places at 0.
pub fn resolve_boundary(timeline: &[TimelineEntry], requested: u32) -> Result<usize, DomainError> {
    if timeline.is_empty() {
        return Ok(0);
    }
    let requested = requested as usize;
    if requested > timeline.len() {
        return Err(DomainError::validation(
            ValidationKind::InvalidPosition,
            format!(
                "Boundary {requested} is outside 0..={}",
                timeline.len()
            ),
        ));
    }
    Ok(requested)
}

/// Cards whose years must be resolved to judge a placement: the candidate
/// followed by whichever neighbours exist at the boundary.
pub fn required_lookups(
    timeline: &[TimelineEntry],
    candidate: &CardId,
    requested: u32,
) -> Result<Vec<CardId>, DomainError> {
    let position = resolve_boundary(timeline, requested)?;
    let mut ids = vec![candidate.clone()];
    if position > 0 {
        ids.push(timeline[position - 1].card_id.clone());
    }
    if let Some(after) = timeline.get(position) {
        ids.push(after.card_id.clone());
    }
    Ok(ids)
}

/// Ties with either neighbour count as correct.
pub fn is_chronological(before: Option<Year>, candidate: Year, after: Option<Year>) -> bool {
    before.map_or(true, |b| b <= candidate) && after.map_or(true, |a| candidate <= a)
}

/// Judge a placement using years the caller has already resolved.
pub fn evaluate(
    timeline: &[TimelineEntry],
    candidate: &CardId,
    requested: u32,
    years: &YearBook,
) -> Result<PlacementCheck, DomainError> {
    let position = resolve_boundary(timeline, requested)?;
    let candidate_year = year_of(years, candidate)?;

    if timeline.is_empty() {
        return Ok(PlacementCheck {
            is_correct: true,
            position: 0,
            candidate_year,
        });
    }

    let before = match position {
        0 => None,
        p => Some(year_of(years, &timeline[p - 1].card_id)?),
    };
    let after = match timeline.get(position) {
        Some(entry) => Some(year_of(years, &entry.card_id)?),
        None => None,
    };

    Ok(PlacementCheck {
        is_correct: is_chronological(before, candidate_year, after),
        position,
        candidate_year,
    })
}

/// Insert a card at `position`, shifting every entry at or after it by one.
pub fn insert_at(
    timeline: &mut Vec<TimelineEntry>,
    position: usize,
    card_id: CardId,
    placed_by: PlayerIdentity,
    placed_at: OffsetDateTime,
) {
    debug_assert!(position <= timeline.len());
    for entry in timeline.iter_mut().skip(position) {
        entry.position += 1;
    }
    timeline.insert(
        position,
        TimelineEntry {
            card_id,
            position: position as u32,
            placed_by,
            placed_at,
        },
    );
}

fn year_of(years: &YearBook, card: &CardId) -> Result<Year, DomainError> {
    years.get(card).ok_or_else(|| {
        DomainError::infra(
            InfraErrorKind::CardResolutionFailed,
            format!("No year resolved for card {card}"),
        )
    })
}
