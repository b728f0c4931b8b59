//! Error codes for the timeline session engine.
//!
//! This module defines all error codes surfaced to callers of the engine.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that the transport layer puts on the wire.

use core::fmt;

/// Centralized error codes for the timeline session engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Session lifecycle
    /// Session is not accepting joins (already started or closed)
    SessionNotJoinable,
    /// Session has reached its configured seat count
    SessionFull,
    /// Start attempted with fewer than two active players
    NotEnoughPlayers,
    /// Only the host may perform this operation
    NotHost,
    /// Operation not allowed in the session's current status
    PhaseMismatch,
    /// Session is completed or abandoned and can no longer change
    SessionClosed,
    /// Identity already holds a seat in this session
    AlreadyJoined,

    // Turn ownership
    /// Acting seat is not the current seat
    NotThisPlayersTurn,
    /// Acting seat has left the session
    PlayerNotActive,
    /// Referenced card is not in the acting player's hand
    CardNotInHand,

    // Request validation
    /// Session configuration rejected
    InvalidConfig,
    /// Timeline boundary out of range
    InvalidPosition,
    /// Guest display name rejected
    InvalidDisplayName,
    /// Room code is malformed
    InvalidRoomCode,
    /// General validation error
    ValidationError,

    // Resource not found
    /// Session not found
    SessionNotFound,
    /// No live session uses this room code
    RoomCodeNotFound,
    /// Identity holds no seat in this session
    PlayerNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Could not allocate a free room code
    RoomCodeExhausted,
    /// Generic conflict
    Conflict,

    // Catalog
    /// Card catalog could not resolve a card's year
    CardResolutionFailed,
    /// Card catalog cannot supply enough cards
    InsufficientCards,
    /// Card catalog is unreachable
    CatalogUnavailable,

    // System errors
    /// Configuration error
    ConfigError,
    /// Session state failed an invariant check
    DataCorruption,
    /// Internal error
    Internal,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SessionNotJoinable => "SESSION_NOT_JOINABLE",
            Self::SessionFull => "SESSION_FULL",
            Self::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",
            Self::NotHost => "NOT_HOST",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::SessionClosed => "SESSION_CLOSED",
            Self::AlreadyJoined => "ALREADY_JOINED",

            Self::NotThisPlayersTurn => "NOT_THIS_PLAYERS_TURN",
            Self::PlayerNotActive => "PLAYER_NOT_ACTIVE",
            Self::CardNotInHand => "CARD_NOT_IN_HAND",

            Self::InvalidConfig => "INVALID_CONFIG",
            Self::InvalidPosition => "INVALID_POSITION",
            Self::InvalidDisplayName => "INVALID_DISPLAY_NAME",
            Self::InvalidRoomCode => "INVALID_ROOM_CODE",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::RoomCodeNotFound => "ROOM_CODE_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::RoomCodeExhausted => "ROOM_CODE_EXHAUSTED",
            Self::Conflict => "CONFLICT",

            Self::CardResolutionFailed => "CARD_RESOLUTION_FAILED",
            Self::InsufficientCards => "INSUFFICIENT_CARDS",
            Self::CatalogUnavailable => "CATALOG_UNAVAILABLE",

            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
