use crate::domain::rules::{CORRECT_PLACEMENT_POINTS, UNPLAYED_CARD_PENALTY, WINNER_BONUS};
use crate::domain::state::{Player, SeatId};

/// Apply the per-placement score change to the acting player.
pub fn apply_placement(player: &mut Player, is_correct: bool) {
    if is_correct {
        player.score += CORRECT_PLACEMENT_POINTS;
        player.correct_placements += 1;
    } else {
        player.incorrect_placements += 1;
    }
}

/// End-of-game scoring for a session ended by time or attrition.
///
/// Every active player loses points for cards still in hand (floored at 0);
/// the externally chosen winner, if any, then receives the bonus.
pub fn apply_final_scoring(players: &mut [Player], winner: Option<SeatId>) {
    for p in players.iter_mut().filter(|p| p.is_active) {
        let penalty = UNPLAYED_CARD_PENALTY * p.hand.len() as i32;
        p.score = (p.score - penalty).max(0);
    }
    if let Some(seat) = winner {
        if let Some(p) = players.iter_mut().find(|p| p.seat == seat) {
            p.score += WINNER_BONUS;
        }
    }
}
