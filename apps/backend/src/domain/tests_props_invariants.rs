//! Property tests: random play never breaks the session's structural
//! invariants.

use proptest::prelude::*;

use crate::domain::cards::YearBook;
use crate::domain::state::{GameSession, SessionStatus};
use crate::domain::test_gens::{self, Step};
use crate::domain::test_prelude;
use crate::domain::test_state_helpers::{numbered_cards, started_session, T0};

const CARDS: usize = 40;

fn card_total(session: &GameSession) -> usize {
    session.players.iter().map(|p| p.hand.len()).sum::<usize>()
        + session.draw_pile.len()
        + session.discarded.len()
        + session.timeline.len()
}

fn apply(session: &GameSession, step: Step, years: &YearBook) -> Option<GameSession> {
    match step {
        Step::Place { slot, boundary } => {
            let seat = session.current_seat?;
            let hand = &session.player(seat)?.hand;
            let card = hand[slot % hand.len()].card_id.clone();
            let boundary = boundary % (session.timeline.len() as u32 + 1);
            let (next, outcome) = session
                .place_card(seat, &card, boundary, years, T0)
                .expect("legal placement");
            assert_eq!(outcome.acting_seat, seat);
            assert_eq!(next.timeline.len(), session.timeline.len() + 1);
            Some(next)
        }
        Step::Leave { seat_index } => {
            let seat = session.players[seat_index % session.players.len()].seat;
            session.leave(seat, T0).ok().map(|(next, _)| next)
        }
    }
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: invariants hold and no card is created or lost.
    #[test]
    fn prop_random_play_keeps_invariants(
        players in 2u8..=5,
        hand_size in 1u8..=4,
        years in test_gens::catalog(CARDS),
        steps in test_gens::steps(40),
    ) {
        let (mut session, _) = started_session(players, hand_size, numbered_cards(CARDS));
        let total = card_total(&session);
        prop_assert_eq!(total, CARDS);

        for step in steps {
            if session.is_terminal() {
                break;
            }
            let scores: Vec<i32> = session.players.iter().map(|p| p.score).collect();
            let Some(next) = apply(&session, step, &years) else { continue };

            prop_assert!(next.validate_invariants().is_ok(), "{:?}", next.validate_invariants());
            prop_assert_eq!(card_total(&next), total);
            prop_assert!(next.players.len() == session.players.len());
            if !next.is_terminal() {
                // Mid-game scores only ever grow
                for (p, before) in next.players.iter().zip(scores) {
                    prop_assert!(p.score >= before);
                }
            }
            session = next;
        }

        if session.status == SessionStatus::Completed {
            prop_assert!(session.current_seat.is_none());
            prop_assert!(session.end_reason.is_some());
        }
    }
}
