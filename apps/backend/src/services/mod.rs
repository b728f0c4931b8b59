pub mod sessions;

pub use sessions::{
    NewSession, PlaceCardResult, SessionMutationResult, SessionService, WinnerSelection,
};
