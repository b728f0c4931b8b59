use crate::domain::cards::DrawnCard;
use crate::domain::identity::PlayerIdentity;
use crate::domain::rules::{CORRECT_PLACEMENT_POINTS, UNPLAYED_CARD_PENALTY, WINNER_BONUS};
use crate::domain::scoring::{apply_final_scoring, apply_placement};
use crate::domain::state::{Player, SeatId};
use crate::domain::test_state_helpers::ids;

fn player(seat: u32, score: i32, hand: usize) -> Player {
    let cards = ids(&["a", "b", "c", "d", "e", "f", "g", "h"])
        .into_iter()
        .take(hand)
        .enumerate()
        .map(|(i, card_id)| DrawnCard {
            card_id,
            draw_order: i as u32,
        })
        .collect();
    let mut p = Player::new(SeatId::new(seat), PlayerIdentity::user(seat as i64 + 1), cards);
    p.score = score;
    p
}

#[test]
fn correct_placement_scores_points() {
    let mut p = player(0, 0, 3);
    apply_placement(&mut p, true);
    apply_placement(&mut p, true);
    assert_eq!(p.score, 2 * CORRECT_PLACEMENT_POINTS);
    assert_eq!(p.correct_placements, 2);
    assert_eq!(p.incorrect_placements, 0);
}

#[test]
fn incorrect_placement_only_counts() {
    let mut p = player(0, 30, 3);
    apply_placement(&mut p, false);
    assert_eq!(p.score, 30);
    assert_eq!(p.incorrect_placements, 1);
}

#[test]
fn unplayed_cards_are_penalised_and_floored() {
    let mut players = vec![player(0, 100, 2), player(1, 30, 2), player(2, 0, 0)];
    apply_final_scoring(&mut players, None);
    assert_eq!(players[0].score, 100 - 2 * UNPLAYED_CARD_PENALTY);
    assert_eq!(players[1].score, 0);
    assert_eq!(players[2].score, 0);
}

#[test]
fn winner_bonus_lands_after_penalty() {
    let mut players = vec![player(0, 10, 3), player(1, 50, 1)];
    apply_final_scoring(&mut players, Some(SeatId::new(0)));
    // Floor applies before the bonus
    assert_eq!(players[0].score, WINNER_BONUS);
    assert_eq!(players[1].score, 50 - UNPLAYED_CARD_PENALTY);
}

#[test]
fn departed_players_are_not_penalised() {
    let mut gone = player(1, 40, 3);
    gone.is_active = false;
    let mut players = vec![player(0, 40, 1), gone];
    apply_final_scoring(&mut players, None);
    assert_eq!(players[0].score, 40 - UNPLAYED_CARD_PENALTY);
    assert_eq!(players[1].score, 40);
}

#[test]
fn unknown_winner_seat_is_ignored() {
    let mut players = vec![player(0, 10, 0)];
    apply_final_scoring(&mut players, Some(SeatId::new(9)));
    assert_eq!(players[0].score, 10);
}
