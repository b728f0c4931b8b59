//! Session service: the only place sessions are locked, looked up and
//! committed.
//!
//! Each session lives behind its own async mutex, held across the whole
//! read, catalog lookup, validate, mutate and commit sequence. Sessions never
//! share a lock with each other.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use time::OffsetDateTime;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};

use crate::catalog::CardCatalog;
use crate::config::EngineConfig;
use crate::domain::cards::{CardId, ResolvedCard};
use crate::domain::game_transition::{derive_game_transitions, GameTransition, SessionLifecycleView};
use crate::domain::identity::PlayerIdentity;
use crate::domain::rules::pile_request_size;
use crate::domain::snapshot::{HandView, SessionView};
use crate::domain::state::{Difficulty, GameSession, SeatId, SessionConfig, SessionId};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::utils::room_code::{generate_room_code, RoomCode};

type SessionHandle = Arc<Mutex<GameSession>>;

/// What a caller supplies to open a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub difficulty: Difficulty,
    pub categories: Vec<String>,
    pub max_players: u8,
    pub host: PlayerIdentity,
}

/// Who receives the winner bonus when a session is ended from outside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WinnerSelection {
    None,
    Seat(PlayerIdentity),
    /// Highest score after penalties; ties go to the earlier seat.
    HighestScore,
}

#[derive(Debug, Clone)]
pub struct SessionMutationResult {
    pub view: SessionView,
    pub old_version: u32,
    pub transitions: Vec<GameTransition>,
}

impl SessionMutationResult {
    pub fn final_version(&self) -> u32 {
        self.view.version
    }
}

#[derive(Debug, Clone)]
pub struct PlaceCardResult {
    pub is_correct: bool,
    pub resolved_card: ResolvedCard,
    pub acting_seat: SeatId,
    pub position: u32,
    pub session_ended: bool,
    pub drawn_card: Option<CardId>,
    pub view: SessionView,
    pub transitions: Vec<GameTransition>,
}

pub struct SessionService {
    catalog: Arc<dyn CardCatalog>,
    config: EngineConfig,
    sessions: DashMap<SessionId, SessionHandle>,
    room_codes: DashMap<RoomCode, SessionId>,
}

impl SessionService {
    pub fn new(catalog: Arc<dyn CardCatalog>, config: EngineConfig) -> Self {
        Self {
            catalog,
            config,
            sessions: DashMap::new(),
            room_codes: DashMap::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Open a waiting session, deal the host's hand and reserve a room code.
    pub async fn create(&self, request: NewSession) -> Result<SessionView, AppError> {
        let config = SessionConfig::new(
            request.difficulty,
            request.categories,
            request.max_players,
            request.host,
        )
        .with_hand_size(self.config.hand_size);
        config.validate()?;

        let wanted = pile_request_size(
            config.max_players,
            config.hand_size,
            self.config.draw_reserve_per_seat,
        );
        let cards = self
            .catalog
            .sample_by_difficulty(config.difficulty, &config.categories, wanted)
            .await?;
        debug!(
            difficulty = %config.difficulty,
            wanted,
            supplied = cards.len(),
            "Sampled catalog cards"
        );

        let id = SessionId::new();
        let room_code = self.reserve_room_code(id)?;
        let session = match GameSession::create(
            id,
            room_code.clone(),
            config,
            cards,
            OffsetDateTime::now_utc(),
        )
        .and_then(|s| s.validate_invariants().map(|_| s))
        {
            Ok(session) => session,
            Err(e) => {
                self.room_codes.remove_if(&room_code, |_, owner| *owner == id);
                warn!(session_id = %id, error = %e, "Session creation failed");
                return Err(e.into());
            }
        };

        let view = session.view();
        self.sessions.insert(id, Arc::new(Mutex::new(session)));
        info!(
            session_id = %id,
            room_code = %room_code,
            max_players = view.max_players,
            "Session created"
        );
        Ok(view)
    }

    /// Seat `identity` in the waiting session behind `room_code`.
    pub async fn join(
        &self,
        room_code: &str,
        identity: PlayerIdentity,
    ) -> Result<SessionMutationResult, AppError> {
        let code = RoomCode::parse(room_code)?;
        let id = self
            .room_codes
            .get(&code)
            .map(|entry| *entry.value())
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::RoomCode, format!("No open session {code}"))
            })?;

        let mut session = self.lock(id).await?;
        let (next, seat) = session.join(identity)?;
        let result = self.commit(&mut session, next, vec![GameTransition::PlayerJoined { seat }])?;
        info!(session_id = %id, room_code = %code, %seat, "Player joined");
        Ok(result)
    }

    pub async fn start(
        &self,
        session_id: SessionId,
        acting: &PlayerIdentity,
    ) -> Result<SessionMutationResult, AppError> {
        let mut session = self.lock(session_id).await?;
        let seat = session.require_seat_of(acting)?;
        let next = session.start(seat, OffsetDateTime::now_utc())?;
        let result = self.commit(&mut session, next, Vec::new())?;
        info!(
            session_id = %session_id,
            players = result.view.seats.len(),
            "Session started"
        );
        Ok(result)
    }

    /// Place `card` from the acting player's hand at timeline boundary
    /// `position`. Years are resolved while the session lock is held.
    pub async fn place_card(
        &self,
        session_id: SessionId,
        acting: &PlayerIdentity,
        card: &CardId,
        position: u32,
    ) -> Result<PlaceCardResult, AppError> {
        let mut session = self.lock(session_id).await?;
        let seat = session.require_seat_of(acting)?;

        let lookups = session.placement_lookups(seat, card, position)?;
        let years = self.catalog.resolve_years(&lookups).await.map_err(|e| {
            warn!(session_id = %session_id, %seat, card = %card, error = %e, "Card resolution failed");
            AppError::from(e)
        })?;

        let (next, outcome) =
            session.place_card(seat, card, position, &years, OffsetDateTime::now_utc())?;
        let placed = GameTransition::CardPlaced {
            seat,
            card_id: card.clone(),
            position: outcome.position,
            is_correct: outcome.is_correct,
        };
        let result = self.commit(&mut session, next, vec![placed])?;

        debug!(
            session_id = %session_id,
            %seat,
            card = %card,
            year = outcome.resolved_card.year,
            position = outcome.position,
            is_correct = outcome.is_correct,
            "Card placed"
        );
        if outcome.session_ended {
            info!(session_id = %session_id, winner = %seat, "Session completed by emptied hand");
        }

        Ok(PlaceCardResult {
            is_correct: outcome.is_correct,
            resolved_card: outcome.resolved_card,
            acting_seat: outcome.acting_seat,
            position: outcome.position,
            session_ended: outcome.session_ended,
            drawn_card: outcome.drawn_card,
            view: result.view,
            transitions: result.transitions,
        })
    }

    /// Mark the acting player as gone.
    ///
    /// Returns `None` when the last player leaves a waiting lobby: the session
    /// is dropped and its room code released.
    pub async fn leave(
        &self,
        session_id: SessionId,
        acting: &PlayerIdentity,
    ) -> Result<Option<SessionMutationResult>, AppError> {
        let mut session = self.lock(session_id).await?;
        let seat = session.require_seat_of(acting)?;
        let (next, outcome) = session.leave(seat, OffsetDateTime::now_utc())?;

        if !next.is_terminal() && next.active_count() == 0 {
            self.sessions.remove(&session_id);
            self.release_room_code(&next);
            *session = next;
            info!(session_id = %session_id, %seat, "Last player left lobby; session dropped");
            return Ok(None);
        }

        let result = self.commit(&mut session, next, vec![GameTransition::PlayerLeft { seat }])?;
        info!(
            session_id = %session_id,
            %seat,
            session_ended = outcome.session_ended,
            "Player left"
        );
        Ok(Some(result))
    }

    /// End an in-progress session from outside, applying final scoring.
    pub async fn end_game(
        &self,
        session_id: SessionId,
        winner: WinnerSelection,
    ) -> Result<SessionMutationResult, AppError> {
        let mut session = self.lock(session_id).await?;
        let now = OffsetDateTime::now_utc();

        let winner_seat = match &winner {
            WinnerSelection::None => None,
            WinnerSelection::Seat(identity) => Some(session.require_seat_of(identity)?),
            WinnerSelection::HighestScore => session.end_game(None, now)?.highest_scoring_seat(),
        };
        let next = session.end_game(winner_seat, now)?;
        let result = self.commit(&mut session, next, Vec::new())?;
        info!(
            session_id = %session_id,
            winner = ?winner_seat,
            "Session ended externally"
        );
        Ok(result)
    }

    /// Administrative close of a non-terminal session.
    pub async fn abandon(&self, session_id: SessionId) -> Result<SessionMutationResult, AppError> {
        let mut session = self.lock(session_id).await?;
        let next = session.abandon(OffsetDateTime::now_utc())?;
        let result = self.commit(&mut session, next, Vec::new())?;
        info!(session_id = %session_id, "Session abandoned");
        Ok(result)
    }

    pub async fn view(&self, session_id: SessionId) -> Result<SessionView, AppError> {
        let session = self.lock(session_id).await?;
        Ok(session.view())
    }

    /// Private hand of the acting player.
    pub async fn hand(
        &self,
        session_id: SessionId,
        acting: &PlayerIdentity,
    ) -> Result<HandView, AppError> {
        let session = self.lock(session_id).await?;
        let seat = session.require_seat_of(acting)?;
        Ok(session.hand_view(seat)?)
    }

    /// Look up a non-terminal session by its room code.
    pub async fn find_by_room_code(&self, room_code: &str) -> Result<SessionView, AppError> {
        let code = RoomCode::parse(room_code)?;
        let id = self
            .room_codes
            .get(&code)
            .map(|entry| *entry.value())
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::RoomCode, format!("No open session {code}"))
            })?;
        self.view(id).await
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn handle(&self, session_id: SessionId) -> Result<SessionHandle, AppError> {
        self.sessions
            .get(&session_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| session_not_found(session_id))
    }

    /// Lock a registered session.
    ///
    /// A session dropped from the registry while the caller waited for its
    /// lock is reported as not found.
    async fn lock(&self, session_id: SessionId) -> Result<OwnedMutexGuard<GameSession>, AppError> {
        let handle = self.handle(session_id)?;
        let guard = handle.clone().lock_owned().await;
        let registered = self
            .sessions
            .get(&session_id)
            .is_some_and(|entry| Arc::ptr_eq(entry.value(), &handle));
        if !registered {
            debug!(session_id = %session_id, "Session dropped while waiting for its lock");
            return Err(session_not_found(session_id));
        }
        Ok(guard)
    }

    fn reserve_room_code(&self, id: SessionId) -> Result<RoomCode, AppError> {
        self.reserve_room_code_with(id, generate_room_code)
    }

    fn reserve_room_code_with(
        &self,
        id: SessionId,
        mut generate: impl FnMut() -> RoomCode,
    ) -> Result<RoomCode, AppError> {
        for attempt in 1..=self.config.room_code_attempts {
            let code = generate();
            match self.room_codes.entry(code.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(id);
                    return Ok(code);
                }
                Entry::Occupied(_) => {
                    debug!(room_code = %code, attempt, "Room code collision");
                }
            }
        }
        Err(DomainError::conflict(
            ConflictKind::RoomCodeExhausted,
            format!(
                "No free room code after {} attempts",
                self.config.room_code_attempts
            ),
        )
        .into())
    }

    fn release_room_code(&self, session: &GameSession) {
        self.room_codes
            .remove_if(&session.room_code, |_, owner| *owner == session.id);
    }

    /// Validate and store `next` in place of `current`.
    fn commit(
        &self,
        current: &mut GameSession,
        mut next: GameSession,
        mut explicit: Vec<GameTransition>,
    ) -> Result<SessionMutationResult, AppError> {
        if let Err(e) = next.validate_invariants() {
            warn!(session_id = %current.id, error = %e, "Rejected commit");
            return Err(e.into());
        }

        let old_version = current.version;
        let before = SessionLifecycleView::from(&*current);
        next.version = old_version + 1;
        let after = SessionLifecycleView::from(&next);

        let mut transitions = derive_game_transitions(&before, &after);
        transitions.append(&mut explicit);

        if next.is_terminal() {
            self.release_room_code(&next);
        }

        *current = next;
        Ok(SessionMutationResult {
            view: current.view(),
            old_version,
            transitions,
        })
    }
}

fn session_not_found(session_id: SessionId) -> AppError {
    DomainError::not_found(
        NotFoundKind::Session,
        format!("Session {session_id} not found"),
    )
    .into()
}
