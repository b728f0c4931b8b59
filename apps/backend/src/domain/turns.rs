//! Turn scheduling over active seats.
//!
//! Seats are visited in join order (the order of `GameSession::players`),
//! skipping anyone who has left.

use crate::domain::state::{Player, SeatId};

/// Outcome of advancing the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAdvance {
    /// The seat that acts next.
    Next(SeatId),
    /// One or no active players remain; the session must end.
    End,
}

/// First active seat in join order.
pub fn first_active(players: &[Player]) -> Option<SeatId> {
    players.iter().find(|p| p.is_active).map(|p| p.seat)
}

/// Next seat after `current`, cyclically, among active players.
///
/// If `current` is no longer active (it just left) the turn goes to the
/// first active seat.
pub fn advance(players: &[Player], current: Option<SeatId>) -> TurnAdvance {
    let active: Vec<SeatId> = players
        .iter()
        .filter(|p| p.is_active)
        .map(|p| p.seat)
        .collect();

    if active.len() <= 1 {
        return TurnAdvance::End;
    }

    let idx = current.and_then(|seat| active.iter().position(|&s| s == seat));
    match idx {
        Some(i) => TurnAdvance::Next(active[(i + 1) % active.len()]),
        None => TurnAdvance::Next(active[0]),
    }
}
