//! Lifecycle transitions reported to callers after each committed mutation.

use serde::{Deserialize, Serialize};

use crate::domain::cards::CardId;
use crate::domain::state::{GameSession, SeatId, SessionStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLifecycleView {
    pub version: u32,
    pub turn: Option<SeatId>,
    pub status: SessionStatus,
}

impl From<&GameSession> for SessionLifecycleView {
    fn from(session: &GameSession) -> Self {
        Self {
            version: session.version,
            turn: session.current_seat,
            status: session.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameTransition {
    /// Edge-triggered: the turn became a specific seat.
    TurnBecame { seat: SeatId },

    /// Edge-triggered: Waiting -> InProgress
    GameStarted,

    /// Edge-triggered: InProgress -> Completed
    GameEnded,

    /// Edge-triggered: any -> Abandoned
    GameAbandoned,

    /// Explicit: a player took a seat
    PlayerJoined { seat: SeatId },

    /// Explicit: a player left
    PlayerLeft { seat: SeatId },

    /// Explicit: a card landed on the timeline
    CardPlaced {
        seat: SeatId,
        card_id: CardId,
        position: u32,
        is_correct: bool,
    },
}

/// Derive domain transitions from before/after lifecycle state.
pub fn derive_game_transitions(
    before: &SessionLifecycleView,
    after: &SessionLifecycleView,
) -> Vec<GameTransition> {
    let mut transitions = Vec::new();

    // 1. Game start
    if before.status == SessionStatus::Waiting && after.status == SessionStatus::InProgress {
        transitions.push(GameTransition::GameStarted);
    }

    // 2. Turn change
    if let Some(seat) = after.turn {
        if before.turn != Some(seat) {
            transitions.push(GameTransition::TurnBecame { seat });
        }
    }

    // 3. Game end
    if before.status != SessionStatus::Completed && after.status == SessionStatus::Completed {
        transitions.push(GameTransition::GameEnded);
    }

    // 4. Game abandoned
    if before.status != SessionStatus::Abandoned && after.status == SessionStatus::Abandoned {
        transitions.push(GameTransition::GameAbandoned);
    }

    transitions
}
