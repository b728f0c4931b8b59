//! Domain layer: pure session logic types and helpers.

pub mod cards;
pub mod draw_pile;
pub mod game_transition;
pub mod identity;
pub mod placement;
pub mod rules;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod turns;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_props_invariants;
#[cfg(test)]
mod tests_props_placement;
#[cfg(test)]
mod tests_scoring;
#[cfg(test)]
mod tests_session_lifecycle;

// Re-exports for ergonomics
pub use cards::{CardId, DrawnCard, ResolvedCard, Year, YearBook};
pub use identity::{GuestName, PlayerIdentity, UserRef};
pub use session::{LeaveOutcome, PlacementOutcome};
pub use state::{
    Difficulty, EndReason, GameSession, Player, SeatId, SessionConfig, SessionId, SessionStatus,
    TimelineEntry,
};
