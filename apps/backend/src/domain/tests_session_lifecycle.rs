use crate::domain::state::{
    Difficulty, EndReason, GameSession, SessionConfig, SessionId, SessionStatus,
};
use crate::domain::test_state_helpers::{
    guest, hand_ids, host, ids, numbered_cards, room, started_session, waiting_session, T0,
};
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, ValidationKind};

#[test]
fn create_deals_host_hand_in_draw_order() {
    let session = waiting_session(3, 4, numbered_cards(12));
    assert_eq!(session.status, SessionStatus::Waiting);
    assert_eq!(session.players.len(), 1);
    let host_player = &session.players[0];
    assert_eq!(host_player.identity, host());
    let orders: Vec<u32> = host_player.hand.iter().map(|c| c.draw_order).collect();
    assert_eq!(orders, vec![0, 1, 2, 3]);
    assert_eq!(session.draw_pile.len(), 8);
    assert!(session.current_seat.is_none());
    session.validate_invariants().unwrap();
}

#[test]
fn create_rejects_bad_player_count() {
    let config = SessionConfig::new(Difficulty::Easy, vec![], 1, host());
    let err = GameSession::create(SessionId::new(), room(), config, numbered_cards(40), T0)
        .unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::InvalidConfig));
}

#[test]
fn create_fails_when_catalog_cannot_cover_every_seat() {
    let config = SessionConfig::new(Difficulty::Hard, vec!["science".into()], 4, host());
    // 4 seats x 4 cards = 16, only 15 distinct
    let mut pile = numbered_cards(15);
    pile.push(pile[0].clone());
    let err = GameSession::create(SessionId::new(), room(), config, pile, T0).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Infra(InfraErrorKind::InsufficientCards, _)
    ));
}

#[test]
fn join_deals_next_cards_and_assigns_new_seat() {
    let session = waiting_session(3, 2, numbered_cards(8));
    let (session, seat) = session.join(guest(1)).unwrap();
    assert_ne!(seat, session.players[0].seat);
    assert_eq!(hand_ids(&session, seat), ids(&["c2", "c3"]));
    assert_eq!(session.draw_pile.len(), 4);
    session.validate_invariants().unwrap();
}

#[test]
fn join_rejects_full_session() {
    let session = waiting_session(2, 2, numbered_cards(8));
    let (session, _) = session.join(guest(1)).unwrap();
    let err = session.join(guest(2)).unwrap_err();
    assert!(matches!(err, DomainError::Conflict(ConflictKind::SessionFull, _)));
}

#[test]
fn join_rejects_duplicate_identity() {
    let session = waiting_session(3, 2, numbered_cards(8));
    let err = session.join(host()).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::AlreadyJoined, _)
    ));
}

#[test]
fn join_rejects_started_session() {
    let (session, _) = started_session(2, 2, numbered_cards(8));
    let err = session.join(guest(9)).unwrap_err();
    assert_eq!(
        err.validation_kind(),
        Some(&ValidationKind::SessionNotJoinable)
    );
}

#[test]
fn failed_join_leaves_original_untouched() {
    let session = waiting_session(2, 2, numbered_cards(8));
    let before = session.clone();
    let _ = session.join(host());
    assert_eq!(session, before);
}

#[test]
fn start_requires_two_active_players() {
    let session = waiting_session(3, 2, numbered_cards(8));
    let host_seat = session.players[0].seat;
    let err = session.start(host_seat, T0).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::NotEnoughPlayers));

    // A guest who joined and left does not count
    let (session, guest_seat) = session.join(guest(1)).unwrap();
    let (session, _) = session.leave(guest_seat, T0).unwrap();
    assert_eq!(session.status, SessionStatus::Waiting);
    let err = session.start(host_seat, T0).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::NotEnoughPlayers));
}

#[test]
fn start_is_host_only() {
    let session = waiting_session(3, 2, numbered_cards(8));
    let (session, guest_seat) = session.join(guest(1)).unwrap();
    let err = session.start(guest_seat, T0).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::NotHost));
}

#[test]
fn host_role_passes_to_next_active_seat() {
    let session = waiting_session(3, 2, numbered_cards(8));
    let host_seat = session.players[0].seat;
    let (session, g1) = session.join(guest(1)).unwrap();
    let (session, _g2) = session.join(guest(2)).unwrap();
    let (session, _) = session.leave(host_seat, T0).unwrap();
    assert_eq!(session.host_seat(), Some(g1));
    let session = session.start(g1, T0).unwrap();
    assert_eq!(session.current_seat, Some(g1));
}

#[test]
fn start_sets_first_active_seat() {
    let (session, seats) = started_session(3, 2, numbered_cards(8));
    assert_eq!(session.status, SessionStatus::InProgress);
    assert_eq!(session.current_seat, Some(seats[0]));
    assert_eq!(session.started_at, Some(T0));
    session.validate_invariants().unwrap();
}

#[test]
fn start_twice_is_phase_mismatch() {
    let (session, seats) = started_session(2, 2, numbered_cards(8));
    let err = session.start(seats[0], T0).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::PhaseMismatch));
}

#[test]
fn attrition_ends_session_without_winner() {
    let (session, seats) = started_session(3, 2, numbered_cards(12));
    let (session, first) = session.leave(seats[1], T0).unwrap();
    assert!(!first.session_ended);
    assert_eq!(session.active_count(), 2);

    let (session, second) = session.leave(seats[2], T0).unwrap();
    assert!(second.session_ended);
    assert_eq!(session.status, SessionStatus::Completed);
    assert_eq!(session.end_reason, Some(EndReason::Attrition));
    assert!(session.winner.is_none());
    assert!(session.current_seat.is_none());
    session.validate_invariants().unwrap();
}

#[test]
fn leaving_current_seat_hands_turn_to_first_active() {
    let (session, seats) = started_session(3, 2, numbered_cards(12));
    // Move the turn to the middle seat first
    let session = {
        let mut s = session;
        s.current_seat = Some(seats[1]);
        s
    };
    let (session, outcome) = session.leave(seats[1], T0).unwrap();
    assert!(!outcome.session_ended);
    assert_eq!(session.current_seat, Some(seats[0]));
    session.validate_invariants().unwrap();
}

#[test]
fn leaving_discards_hand() {
    let (session, seats) = started_session(3, 2, numbered_cards(12));
    let leaving_hand = hand_ids(&session, seats[2]);
    let (session, _) = session.leave(seats[2], T0).unwrap();
    assert!(hand_ids(&session, seats[2]).is_empty());
    let discarded: Vec<_> = session.discarded.iter().map(|c| c.card_id.clone()).collect();
    assert_eq!(discarded, leaving_hand);
    session.validate_invariants().unwrap();
}

#[test]
fn leave_twice_is_player_not_active() {
    let (session, seats) = started_session(3, 2, numbered_cards(12));
    let (session, _) = session.leave(seats[2], T0).unwrap();
    let err = session.leave(seats[2], T0).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::PlayerNotActive));
}

#[test]
fn closed_sessions_are_immutable() {
    let (session, seats) = started_session(2, 2, numbered_cards(8));
    let session = session.abandon(T0).unwrap();
    assert_eq!(session.status, SessionStatus::Abandoned);

    for err in [
        session.leave(seats[0], T0).unwrap_err(),
        session.start(seats[0], T0).unwrap_err(),
        session.end_game(None, T0).unwrap_err(),
        session.abandon(T0).unwrap_err(),
    ] {
        assert_eq!(err.validation_kind(), Some(&ValidationKind::SessionClosed));
    }
    let err = session.join(guest(5)).unwrap_err();
    assert_eq!(
        err.validation_kind(),
        Some(&ValidationKind::SessionNotJoinable)
    );
}

#[test]
fn end_game_requires_in_progress() {
    let session = waiting_session(2, 2, numbered_cards(8));
    let err = session.end_game(None, T0).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::PhaseMismatch));
}

#[test]
fn end_game_rejects_departed_winner() {
    let (session, seats) = started_session(3, 2, numbered_cards(20));
    let (session, _) = session.leave(seats[1], T0).unwrap();
    let err = session.end_game(Some(seats[1]), T0).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::PlayerNotActive));

    let ended = session.end_game(Some(seats[2]), T0).unwrap();
    assert_eq!(ended.end_reason, Some(EndReason::EndedExternally));
    assert_eq!(ended.winner.as_ref(), Some(&ended.players[2].identity));
    ended.validate_invariants().unwrap();
}
