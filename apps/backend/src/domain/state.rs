use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::cards::{CardId, DrawnCard};
use crate::domain::draw_pile::DrawPile;
use crate::domain::identity::PlayerIdentity;
use crate::domain::rules::{hand_size_range, player_count_range, DEFAULT_HAND_SIZE};
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind, ValidationKind};
use crate::utils::room_code::RoomCode;

/// Stable handle for a seat.
///
/// Handles are allocated in join order and never reused within a session, so
/// a seat keeps its identity when players ahead of it leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatId(u32);

impl SeatId {
    pub(crate) const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seat-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Overall session progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Created; players may join.
    Waiting,
    /// Turns are being played.
    InProgress,
    /// Ended by an emptied hand, attrition, or an external end.
    Completed,
    /// Closed by an administrative action.
    Abandoned,
}

impl SessionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::Abandoned)
    }
}

/// Why a completed session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    HandEmptied,
    Attrition,
    EndedExternally,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(s)
    }
}

/// Session configuration; immutable once the session exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub difficulty: Difficulty,
    pub categories: Vec<String>,
    pub max_players: u8,
    pub host: PlayerIdentity,
    pub hand_size: u8,
}

impl SessionConfig {
    pub fn new(
        difficulty: Difficulty,
        categories: Vec<String>,
        max_players: u8,
        host: PlayerIdentity,
    ) -> Self {
        Self {
            difficulty,
            categories,
            max_players,
            host,
            hand_size: DEFAULT_HAND_SIZE,
        }
    }

    pub fn with_hand_size(mut self, hand_size: u8) -> Self {
        self.hand_size = hand_size;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !player_count_range().contains(&self.max_players) {
            return Err(DomainError::validation(
                ValidationKind::InvalidConfig,
                format!(
                    "max_players must be within {}..={}, got {}",
                    player_count_range().start(),
                    player_count_range().end(),
                    self.max_players
                ),
            ));
        }
        if !hand_size_range().contains(&self.hand_size) {
            return Err(DomainError::validation(
                ValidationKind::InvalidConfig,
                format!(
                    "hand_size must be within {}..={}, got {}",
                    hand_size_range().start(),
                    hand_size_range().end(),
                    self.hand_size
                ),
            ));
        }
        Ok(())
    }
}

/// A seated player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub seat: SeatId,
    pub identity: PlayerIdentity,
    pub hand: Vec<DrawnCard>,
    pub is_active: bool,
    pub score: i32,
    pub correct_placements: u32,
    pub incorrect_placements: u32,
}

impl Player {
    pub(crate) fn new(seat: SeatId, identity: PlayerIdentity, hand: Vec<DrawnCard>) -> Self {
        Self {
            seat,
            identity,
            hand,
            is_active: true,
            score: 0,
            correct_placements: 0,
            incorrect_placements: 0,
        }
    }

    pub fn holds(&self, card: &CardId) -> bool {
        self.hand.iter().any(|c| &c.card_id == card)
    }
}

/// A card placed on the shared timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub card_id: CardId,
    pub position: u32,
    pub placed_by: PlayerIdentity,
    #[serde(with = "time::serde::rfc3339")]
    pub placed_at: OffsetDateTime,
}

/// The aggregate: one running instance of the timeline game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub id: SessionId,
    pub room_code: RoomCode,
    pub status: SessionStatus,
    pub config: SessionConfig,
    /// Join order; never reordered.
    pub players: Vec<Player>,
    /// Sorted by position; positions are `0..len`.
    pub timeline: Vec<TimelineEntry>,
    pub draw_pile: DrawPile,
    pub discarded: Vec<DrawnCard>,
    /// Whose turn it is. `Some` only while in progress.
    pub current_seat: Option<SeatId>,
    pub winner: Option<PlayerIdentity>,
    pub end_reason: Option<EndReason>,
    /// Bumped by the service on every committed mutation.
    pub version: u32,
    pub(crate) next_seat: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub started_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub ended_at: Option<OffsetDateTime>,
}

impl GameSession {
    pub fn player(&self, seat: SeatId) -> Option<&Player> {
        self.players.iter().find(|p| p.seat == seat)
    }

    pub(crate) fn player_mut(&mut self, seat: SeatId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.seat == seat)
    }

    pub fn require_player(&self, seat: SeatId) -> Result<&Player, DomainError> {
        self.player(seat).ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Player,
                format!("{seat} is not part of session {}", self.id),
            )
        })
    }

    pub fn seat_of(&self, identity: &PlayerIdentity) -> Option<SeatId> {
        self.players
            .iter()
            .find(|p| &p.identity == identity)
            .map(|p| p.seat)
    }

    pub fn require_seat_of(&self, identity: &PlayerIdentity) -> Result<SeatId, DomainError> {
        self.seat_of(identity).ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Player,
                format!("{identity} holds no seat in session {}", self.id),
            )
        })
    }

    /// Active seats in join order.
    pub fn active_seats(&self) -> Vec<SeatId> {
        self.players
            .iter()
            .filter(|p| p.is_active)
            .map(|p| p.seat)
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_active).count()
    }

    /// The host is the earliest-joined seat that is still active.
    pub fn host_seat(&self) -> Option<SeatId> {
        self.players.iter().find(|p| p.is_active).map(|p| p.seat)
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Active seat with the highest score; ties go to the earlier seat.
    pub fn highest_scoring_seat(&self) -> Option<SeatId> {
        let mut best: Option<&Player> = None;
        for p in self.players.iter().filter(|p| p.is_active) {
            match best {
                Some(b) if b.score >= p.score => {}
                _ => best = Some(p),
            }
        }
        best.map(|p| p.seat)
    }

    pub(crate) fn allocate_seat(&mut self) -> SeatId {
        let seat = SeatId::new(self.next_seat);
        self.next_seat += 1;
        seat
    }

    /// Check every structural invariant of the aggregate.
    pub fn validate_invariants(&self) -> Result<(), DomainError> {
        for (idx, entry) in self.timeline.iter().enumerate() {
            if entry.position as usize != idx {
                return Err(corruption(format!(
                    "timeline position {} found at index {idx}",
                    entry.position
                )));
            }
        }

        if self.players.len() > self.config.max_players as usize {
            return Err(corruption(format!(
                "{} players seated but max_players is {}",
                self.players.len(),
                self.config.max_players
            )));
        }

        match (self.status, self.current_seat) {
            (SessionStatus::InProgress, Some(seat)) => {
                let active = self.player(seat).is_some_and(|p| p.is_active);
                if !active {
                    return Err(corruption(format!("current {seat} is not an active player")));
                }
            }
            (SessionStatus::InProgress, None) => {
                return Err(corruption("in-progress session has no current seat"));
            }
            (_, Some(seat)) => {
                return Err(corruption(format!(
                    "current {seat} set while session is {:?}",
                    self.status
                )));
            }
            (_, None) => {}
        }

        let mut seen: HashSet<&CardId> = HashSet::new();
        let hands = self.players.iter().flat_map(|p| p.hand.iter());
        let piles = self.draw_pile.iter().chain(self.discarded.iter());
        let drawn_ids = hands.chain(piles).map(|c| &c.card_id);
        let placed_ids = self.timeline.iter().map(|e| &e.card_id);
        for id in drawn_ids.chain(placed_ids) {
            if !seen.insert(id) {
                return Err(corruption(format!("card {id} appears in more than one place")));
            }
        }

        Ok(())
    }
}

fn corruption(detail: impl Into<String>) -> DomainError {
    DomainError::infra(InfraErrorKind::DataCorruption, detail)
}
