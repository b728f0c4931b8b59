use std::ops::RangeInclusive;

pub const MIN_PLAYERS: u8 = 2;
pub const MAX_PLAYERS: u8 = 8;

pub const DEFAULT_HAND_SIZE: u8 = 4;
pub const MAX_HAND_SIZE: u8 = 20;

/// Extra cards per seat requested from the catalog so incorrect placements
/// can be replenished.
pub const DEFAULT_DRAW_RESERVE_PER_SEAT: u8 = 4;

pub const CORRECT_PLACEMENT_POINTS: i32 = 10;
pub const UNPLAYED_CARD_PENALTY: i32 = 20;
pub const WINNER_BONUS: i32 = 500;

pub const ROOM_CODE_LEN: usize = 6;

pub fn player_count_range() -> RangeInclusive<u8> {
    MIN_PLAYERS..=MAX_PLAYERS
}

pub fn hand_size_range() -> RangeInclusive<u8> {
    1..=MAX_HAND_SIZE
}

/// Number of cards asked of the catalog when a session is created.
pub fn pile_request_size(max_players: u8, hand_size: u8, reserve_per_seat: u8) -> usize {
    max_players as usize * (hand_size as usize + reserve_per_seat as usize)
}

/// Minimum number of cards needed to deal every configured seat.
pub fn minimum_pile_size(max_players: u8, hand_size: u8) -> usize {
    max_players as usize * hand_size as usize
}
