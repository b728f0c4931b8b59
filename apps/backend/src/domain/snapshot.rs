//! Public snapshot API for observing a session without exposing hands.

use serde::{Deserialize, Serialize};

use crate::domain::cards::DrawnCard;
use crate::domain::identity::PlayerIdentity;
use crate::domain::state::{
    Difficulty, EndReason, GameSession, SeatId, SessionId, SessionStatus, TimelineEntry,
};
use crate::errors::domain::DomainError;
use crate::utils::room_code::RoomCode;

/// Public info about a single seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatPublic {
    pub seat: SeatId,
    pub identity: PlayerIdentity,
    pub is_active: bool,
    pub is_host: bool,
    pub hand_count: usize,
    pub score: i32,
    pub correct_placements: u32,
    pub incorrect_placements: u32,
}

/// What every participant may see.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub room_code: RoomCode,
    pub status: SessionStatus,
    pub version: u32,
    pub difficulty: Difficulty,
    pub categories: Vec<String>,
    pub max_players: u8,
    pub hand_size: u8,
    pub seats: Vec<SeatPublic>,
    pub timeline: Vec<TimelineEntry>,
    pub draw_pile_remaining: usize,
    pub current_seat: Option<SeatId>,
    pub winner: Option<PlayerIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_reason: Option<EndReason>,
}

/// A seat's private hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandView {
    pub seat: SeatId,
    pub cards: Vec<DrawnCard>,
    pub is_your_turn: bool,
}

impl GameSession {
    pub fn view(&self) -> SessionView {
        let host = self.host_seat();
        SessionView {
            session_id: self.id,
            room_code: self.room_code.clone(),
            status: self.status,
            version: self.version,
            difficulty: self.config.difficulty,
            categories: self.config.categories.clone(),
            max_players: self.config.max_players,
            hand_size: self.config.hand_size,
            seats: self
                .players
                .iter()
                .map(|p| SeatPublic {
                    seat: p.seat,
                    identity: p.identity.clone(),
                    is_active: p.is_active,
                    is_host: host == Some(p.seat),
                    hand_count: p.hand.len(),
                    score: p.score,
                    correct_placements: p.correct_placements,
                    incorrect_placements: p.incorrect_placements,
                })
                .collect(),
            timeline: self.timeline.clone(),
            draw_pile_remaining: self.draw_pile.len(),
            current_seat: self.current_seat,
            winner: self.winner.clone(),
            end_reason: self.end_reason,
        }
    }

    pub fn hand_view(&self, seat: SeatId) -> Result<HandView, DomainError> {
        let player = self.require_player(seat)?;
        Ok(HandView {
            seat,
            cards: player.hand.clone(),
            is_your_turn: self.current_seat == Some(seat),
        })
    }
}
