//! This crate keeps score for the trick-taking card game Judgment. Individual cards are never
//! modeled: players bid how many tricks they will take, the table records how many they
//! actually took, and exact bids score `10 + tricks`.
//!
//! Round `n` deals `n` cards, trump rotates spades, hearts, clubs, diamonds, and the player who
//! bids first moves one seat around the table every round. The last bidder of a round may not
//! make the bids add up to the number of cards dealt.
//! ## Example usage
//! ```
//! use judgment::{Player, ScoreKeeper, Status};
//!
//! let players = vec![Player::new("Ann"), Player::new("Bob"), Player::new("Cy")];
//! let ids: Vec<_> = players.iter().map(|p| p.id).collect();
//!
//! let mut keeper = ScoreKeeper::new();
//! keeper.initialize_game(players).unwrap();
//!
//! // Round 1 deals one card. Ann and Bob bid 0 and 1, so Cy may not bid 0.
//! keeper.add_bid(ids[0], 0).unwrap();
//! keeper.add_bid(ids[1], 1).unwrap();
//! assert!(keeper.add_bid(ids[2], 0).is_err());
//! keeper.add_bid(ids[2], 1).unwrap();
//! assert_eq!(keeper.game().unwrap().status, Status::Playing);
//!
//! keeper.update_tricks(ids[0], 0).unwrap();
//! keeper.update_tricks(ids[1], 1).unwrap();
//! keeper.update_tricks(ids[2], 0).unwrap();
//! keeper.complete_round().unwrap();
//!
//! assert_eq!(keeper.player_score(ids[0]), Ok(10));
//! assert_eq!(keeper.player_score(ids[1]), Ok(11));
//! assert_eq!(keeper.player_score(ids[2]), Ok(0));
//! ```

pub mod cards;
pub mod config;
pub mod game_state;
pub mod result;
pub mod rules;
pub mod scoring;
pub mod session;
pub mod short_id;
pub mod storage;
pub mod validation;
mod transitions;

#[cfg(feature = "sqlite")]
pub mod sqlite_store;


use serde::{Serialize, Deserialize};
use uuid::Uuid;
pub use cards::*;
pub use game_state::*;
pub use result::*;

/// Commands accepted by [ScoreKeeper::play](struct.ScoreKeeper.html#method.play).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameTransition {
    Bid { player_id: Uuid, amount: i32 },
    Tricks { player_id: Uuid, tricks: i32 },
    CompleteRound,
    NextRound,
}

/// Owns at most one game and applies commands to it.
///
/// Every command checks all of its rules before touching the game, so a rejected command
/// leaves the state exactly as it was.
#[derive(Debug, Default)]
pub struct ScoreKeeper {
    game: Option<GameState>,
}

impl ScoreKeeper {
    pub fn new() -> ScoreKeeper {
        ScoreKeeper { game: None }
    }

    /// Wrap a previously saved game.
    pub fn from_game(game: GameState) -> ScoreKeeper {
        ScoreKeeper { game: Some(game) }
    }

    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    /// Replace the in-memory game wholesale.
    pub fn restore(&mut self, game: Option<GameState>) {
        self.game = game;
    }

    /// Start a new game, replacing any game in progress.
    pub fn initialize_game(&mut self, players: Vec<Player>) -> Result<&GameState, TransitionError> {
        let game = GameState::new(players)?;
        Ok(self.game.insert(game))
    }

    pub fn add_bid(&mut self, player_id: Uuid, amount: i32) -> Result<TransitionSuccess, TransitionError> {
        self.play(GameTransition::Bid { player_id, amount })
    }

    pub fn update_tricks(&mut self, player_id: Uuid, tricks: i32) -> Result<TransitionSuccess, TransitionError> {
        self.play(GameTransition::Tricks { player_id, tricks })
    }

    pub fn complete_round(&mut self) -> Result<TransitionSuccess, TransitionError> {
        self.play(GameTransition::CompleteRound)
    }

    pub fn start_next_round(&mut self) -> Result<TransitionSuccess, TransitionError> {
        self.play(GameTransition::NextRound)
    }

    /// Drop the game, whatever state it was in.
    pub fn reset_game(&mut self) -> TransitionSuccess {
        if let Some(game) = self.game.take() {
            log::info!("Game {} reset in round {}", game.id, game.current_round);
        }
        TransitionSuccess::Reset
    }

    /// Total score, recomputed from every round played so far.
    pub fn player_score(&self, player_id: Uuid) -> Result<u32, GetError> {
        let game = self.game.as_ref().ok_or(GetError::NoActiveGame)?;
        if game.player(player_id).is_none() {
            return Err(GetError::UnknownPlayer);
        }
        Ok(scoring::total_score(player_id, &game.rounds))
    }

    pub fn leaderboard(&self) -> Result<Vec<scoring::Standing>, GetError> {
        let game = self.game.as_ref().ok_or(GetError::NoActiveGame)?;
        Ok(scoring::leaderboard(&game.players, &game.rounds))
    }

    pub fn winner(&self) -> Result<Option<&Player>, GetError> {
        let game = self.game.as_ref().ok_or(GetError::NoActiveGame)?;
        Ok(scoring::winner(&game.players, &game.rounds))
    }

    /// The primary function used to progress the game. The expected order is:
    ///
    /// Bid * n -> Tricks * n (revisable) -> CompleteRound -> NextRound -> Bid * n -> ...
    pub fn play(&mut self, entry: GameTransition) -> Result<TransitionSuccess, TransitionError> {
        let game = self.game.as_mut().ok_or(TransitionError::NoActiveGame)?;
        let outcome = match entry {
            GameTransition::Bid { player_id, amount } => game.place_bid(player_id, amount),
            GameTransition::Tricks { player_id, tricks } => game.record_tricks(player_id, tricks),
            GameTransition::CompleteRound => game.complete_round(),
            GameTransition::NextRound => game.advance_round(),
        };
        if let Err(err) = &outcome {
            log::debug!("Rejected in round {}: {}", game.current_round, err);
        }
        outcome
    }
}
