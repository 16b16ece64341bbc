use uuid::Uuid;
use crate::game_state::Player;
use crate::result::TransitionError;

pub const MIN_PLAYERS: usize = 3;
pub const MAX_PLAYERS: usize = 6;
pub const DECK_SIZE: usize = 52;

/// Number of rounds played for a table of `player_count`: as many as a full deck can deal
/// with one more card each round.
pub fn total_rounds_for(player_count: usize) -> Result<u32, TransitionError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
        return Err(TransitionError::InvalidPlayerCount(player_count));
    }
    Ok((DECK_SIZE / player_count) as u32)
}

/// Cards dealt to each player in a 1-based round. The engine deals one more card every round.
pub fn cards_for_round(round_number: u32) -> u32 {
    round_number
}

/// Rise-then-fall schedule: 1, 2, .. up to the midpoint, then back down.
/// The transitions deal [`cards_for_round`] instead.
pub fn pyramid_cards_for_round(round_number: u32, max_rounds: u32) -> u32 {
    let midpoint = max_rounds.div_ceil(2);
    if round_number <= midpoint {
        round_number
    } else {
        (max_rounds + 1).saturating_sub(round_number)
    }
}

/// The seat after `previous` in the fixed seating order, wrapping around the table.
/// Falls back to the first seat when `previous` is not seated.
pub fn next_first_bidder(players: &[Player], previous: Uuid) -> Option<Uuid> {
    if players.is_empty() {
        return None;
    }
    let next = match players.iter().position(|p| p.id == previous) {
        Some(index) => (index + 1) % players.len(),
        None => 0,
    };
    Some(players[next].id)
}

/// First bidder of a 1-based round: seat `(round - 1) mod n`.
pub fn first_bidder_for_round(players: &[Player], round_number: u32) -> Option<Uuid> {
    if players.is_empty() {
        return None;
    }
    let index = (round_number.saturating_sub(1) as usize) % players.len();
    Some(players[index].id)
}
