//! Session command handlers.
//!
//! Every handler borrows the current session and returns a new value; the
//! input is never touched, so a failed command leaves nothing half-applied.
//! Locking and persistence belong to the caller.

use time::OffsetDateTime;

use crate::domain::cards::{CardId, ResolvedCard, YearBook};
use crate::domain::draw_pile::DrawPile;
use crate::domain::identity::PlayerIdentity;
use crate::domain::placement;
use crate::domain::rules::minimum_pile_size;
use crate::domain::scoring::{apply_final_scoring, apply_placement};
use crate::domain::state::{
    EndReason, GameSession, Player, SeatId, SessionConfig, SessionId, SessionStatus,
};
use crate::domain::turns::{self, TurnAdvance};
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, ValidationKind};
use crate::utils::room_code::RoomCode;

/// Result of placing a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementOutcome {
    pub is_correct: bool,
    pub resolved_card: ResolvedCard,
    pub acting_seat: SeatId,
    /// Boundary the card landed at.
    pub position: u32,
    pub session_ended: bool,
    /// Replacement drawn after an incorrect placement.
    pub drawn_card: Option<CardId>,
}

/// Result of a player leaving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaveOutcome {
    pub seat: SeatId,
    pub session_ended: bool,
}

impl GameSession {
    /// Create a waiting session and deal the host's hand.
    ///
    /// `catalog_cards` seeds the draw pile in the order given; it must cover
    /// a full hand for every configured seat.
    pub fn create(
        id: SessionId,
        room_code: RoomCode,
        config: SessionConfig,
        catalog_cards: Vec<CardId>,
        now: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        config.validate()?;

        let mut draw_pile = DrawPile::seed(catalog_cards);
        let needed = minimum_pile_size(config.max_players, config.hand_size);
        if draw_pile.len() < needed {
            return Err(DomainError::infra(
                InfraErrorKind::InsufficientCards,
                format!(
                    "Catalog supplied {} distinct cards, {needed} needed for {} seats of {}",
                    draw_pile.len(),
                    config.max_players,
                    config.hand_size
                ),
            ));
        }

        let host_hand = draw_pile.deal(config.hand_size as usize)?;
        let host = config.host.clone();
        let mut session = Self {
            id,
            room_code,
            status: SessionStatus::Waiting,
            config,
            players: Vec::new(),
            timeline: Vec::new(),
            draw_pile,
            discarded: Vec::new(),
            current_seat: None,
            winner: None,
            end_reason: None,
            version: 0,
            next_seat: 0,
            created_at: now,
            started_at: None,
            ended_at: None,
        };
        let seat = session.allocate_seat();
        session.players.push(Player::new(seat, host, host_hand));
        Ok(session)
    }

    /// Seat a new player and deal their hand.
    pub fn join(&self, identity: PlayerIdentity) -> Result<(Self, SeatId), DomainError> {
        if self.status != SessionStatus::Waiting {
            return Err(DomainError::validation(
                ValidationKind::SessionNotJoinable,
                format!("Session {} is {:?}, not waiting", self.id, self.status),
            ));
        }
        if self.seat_of(&identity).is_some() {
            return Err(DomainError::conflict(
                ConflictKind::AlreadyJoined,
                format!("{identity} already holds a seat in session {}", self.id),
            ));
        }
        if self.players.len() >= self.config.max_players as usize {
            return Err(DomainError::conflict(
                ConflictKind::SessionFull,
                format!(
                    "Session {} already seats {} of {} players",
                    self.id,
                    self.players.len(),
                    self.config.max_players
                ),
            ));
        }

        let mut next = self.clone();
        let hand = next.draw_pile.deal(next.config.hand_size as usize)?;
        let seat = next.allocate_seat();
        next.players.push(Player::new(seat, identity, hand));
        Ok((next, seat))
    }

    /// Begin play. Only the host may start, and at least two players must
    /// still be active.
    pub fn start(&self, acting: SeatId, now: OffsetDateTime) -> Result<Self, DomainError> {
        self.ensure_open()?;
        if self.status != SessionStatus::Waiting {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                format!("Session {} has already started", self.id),
            ));
        }
        let player = self.require_player(acting)?;
        if !player.is_active {
            return Err(DomainError::validation(
                ValidationKind::PlayerNotActive,
                format!("{acting} has left the session"),
            ));
        }
        if self.host_seat() != Some(acting) {
            return Err(DomainError::validation(
                ValidationKind::NotHost,
                format!("{acting} is not the host of session {}", self.id),
            ));
        }
        if self.active_count() < 2 {
            return Err(DomainError::validation(
                ValidationKind::NotEnoughPlayers,
                format!(
                    "Session {} has {} active players, at least 2 required",
                    self.id,
                    self.active_count()
                ),
            ));
        }

        let mut next = self.clone();
        next.status = SessionStatus::InProgress;
        next.current_seat = turns::first_active(&next.players);
        next.started_at = Some(now);
        Ok(next)
    }

    /// Turn, activity and hand checks for a placement, without any lookup.
    pub fn ensure_can_place(&self, seat: SeatId, card: &CardId) -> Result<(), DomainError> {
        self.ensure_open()?;
        if self.status != SessionStatus::InProgress {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                format!("Session {} has not started", self.id),
            ));
        }
        let player = self.require_player(seat)?;
        if !player.is_active {
            return Err(DomainError::validation(
                ValidationKind::PlayerNotActive,
                format!("{seat} has left the session"),
            ));
        }
        if self.current_seat != Some(seat) {
            return Err(DomainError::validation(
                ValidationKind::NotThisPlayersTurn,
                format!("It is not {seat}'s turn"),
            ));
        }
        if !player.holds(card) {
            return Err(DomainError::validation(
                ValidationKind::CardNotInHand,
                format!("Card {card} is not in {seat}'s hand"),
            ));
        }
        Ok(())
    }

    /// Cards whose years a placement needs, after the same checks
    /// `place_card` performs.
    pub fn placement_lookups(
        &self,
        seat: SeatId,
        card: &CardId,
        position: u32,
    ) -> Result<Vec<CardId>, DomainError> {
        self.ensure_can_place(seat, card)?;
        placement::required_lookups(&self.timeline, card, position)
    }

    /// Place a card from `seat`'s hand at timeline boundary `position`.
    ///
    /// `years` must hold the candidate's year and those of its neighbours.
    pub fn place_card(
        &self,
        seat: SeatId,
        card: &CardId,
        position: u32,
        years: &YearBook,
        now: OffsetDateTime,
    ) -> Result<(Self, PlacementOutcome), DomainError> {
        self.ensure_can_place(seat, card)?;
        let check = placement::evaluate(&self.timeline, card, position, years)?;

        let mut next = self.clone();
        let replacement = if check.is_correct {
            None
        } else {
            next.draw_pile.draw()
        };
        let drawn_card = replacement.as_ref().map(|c| c.card_id.clone());

        let (identity, hand_empty) = {
            let player = next
                .player_mut(seat)
                .ok_or_else(|| DomainError::validation_other("Invariant violated: seat vanished"))?;
            let idx = player
                .hand
                .iter()
                .position(|c| &c.card_id == card)
                .ok_or_else(|| {
                    DomainError::validation(ValidationKind::CardNotInHand, "Card not in hand")
                })?;
            player.hand.remove(idx);
            apply_placement(player, check.is_correct);
            if let Some(c) = replacement {
                player.hand.push(c);
            }
            (player.identity.clone(), player.hand.is_empty())
        };

        placement::insert_at(
            &mut next.timeline,
            check.position,
            card.clone(),
            identity.clone(),
            now,
        );

        if hand_empty {
            next.finish(EndReason::HandEmptied, Some(identity), now);
        } else {
            next.advance_turn(now);
        }

        let outcome = PlacementOutcome {
            is_correct: check.is_correct,
            resolved_card: ResolvedCard {
                card_id: card.clone(),
                year: check.candidate_year,
            },
            acting_seat: seat,
            position: check.position as u32,
            session_ended: next.is_terminal(),
            drawn_card,
        };
        Ok((next, outcome))
    }

    /// Mark `seat` inactive; its hand is discarded.
    ///
    /// During play this may hand the turn on or, when one or no players
    /// remain, end the session without a winner.
    pub fn leave(&self, seat: SeatId, now: OffsetDateTime) -> Result<(Self, LeaveOutcome), DomainError> {
        self.ensure_open()?;
        let player = self.require_player(seat)?;
        if !player.is_active {
            return Err(DomainError::validation(
                ValidationKind::PlayerNotActive,
                format!("{seat} has already left"),
            ));
        }

        let mut next = self.clone();
        let hand = {
            let player = next
                .player_mut(seat)
                .ok_or_else(|| DomainError::validation_other("Invariant violated: seat vanished"))?;
            player.is_active = false;
            std::mem::take(&mut player.hand)
        };
        next.discarded.extend(hand);

        if next.status == SessionStatus::InProgress {
            if next.active_count() <= 1 {
                next.end_by_attrition(now);
            } else if next.current_seat == Some(seat) {
                next.advance_turn(now);
            }
        }

        let outcome = LeaveOutcome {
            seat,
            session_ended: next.is_terminal(),
        };
        Ok((next, outcome))
    }

    /// End an in-progress session from outside (time limit, host decision).
    ///
    /// Remaining players are penalised for unplayed cards; `winner`, when
    /// given, receives the winner bonus.
    pub fn end_game(&self, winner: Option<SeatId>, now: OffsetDateTime) -> Result<Self, DomainError> {
        self.ensure_open()?;
        if self.status != SessionStatus::InProgress {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                format!("Session {} is not in progress", self.id),
            ));
        }
        let winner_identity = match winner {
            Some(seat) => {
                let player = self.require_player(seat)?;
                if !player.is_active {
                    return Err(DomainError::validation(
                        ValidationKind::PlayerNotActive,
                        format!("{seat} has left and cannot be declared winner"),
                    ));
                }
                Some(player.identity.clone())
            }
            None => None,
        };

        let mut next = self.clone();
        apply_final_scoring(&mut next.players, winner);
        next.finish(EndReason::EndedExternally, winner_identity, now);
        Ok(next)
    }

    /// Administrative close.
    pub fn abandon(&self, now: OffsetDateTime) -> Result<Self, DomainError> {
        self.ensure_open()?;
        let mut next = self.clone();
        next.status = SessionStatus::Abandoned;
        next.current_seat = None;
        next.ended_at = Some(now);
        Ok(next)
    }

    fn ensure_open(&self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::validation(
                ValidationKind::SessionClosed,
                format!("Session {} is {:?}", self.id, self.status),
            ));
        }
        Ok(())
    }

    fn advance_turn(&mut self, now: OffsetDateTime) {
        match turns::advance(&self.players, self.current_seat) {
            TurnAdvance::Next(seat) => self.current_seat = Some(seat),
            TurnAdvance::End => self.end_by_attrition(now),
        }
    }

    fn end_by_attrition(&mut self, now: OffsetDateTime) {
        apply_final_scoring(&mut self.players, None);
        self.finish(EndReason::Attrition, None, now);
    }

    fn finish(&mut self, reason: EndReason, winner: Option<PlayerIdentity>, now: OffsetDateTime) {
        self.status = SessionStatus::Completed;
        self.current_seat = None;
        self.winner = winner;
        self.end_reason = Some(reason);
        self.ended_at = Some(now);
    }
}
