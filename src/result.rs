use serde::{Serialize, Deserialize};
use thiserror::Error;
use uuid::Uuid;

/// Outcome of an accepted command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionSuccess {
    Bid,
    /// The last bid of the rotation was placed; the round is now being played.
    BiddingComplete,
    TricksRecorded,
    RoundComplete,
    /// The final round was completed.
    GameOver,
    NextRound,
    Reset,
}

/// Coarse classification of rejected commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidPlayerCount,
    IllegalTransition,
    ValidationFailure,
    IncompleteRound,
}

/// Why a command was rejected. A rejected command never changes state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum TransitionError {
    #[error("Error: Judgment needs 3 to 6 players, got {0}.")]
    InvalidPlayerCount(usize),
    #[error("Error: No game is in progress.")]
    NoActiveGame,
    #[error("Error: Attempted to bid while the round is not in the bidding stage.")]
    BidOutsideBidding,
    #[error("Error: Attempted to record tricks while the round is not being played.")]
    TricksOutsidePlaying,
    #[error("Error: Attempted to complete a round that is not being played.")]
    CompleteOutsidePlaying,
    #[error("Error: Attempted to start the next round before the current one ended.")]
    RoundNotEnded,
    #[error("Error: Attempted to play a completed game.")]
    CompletedGame,
    #[error("Error: Player {0} is not part of this game.")]
    UnknownPlayer(Uuid),
    #[error("Error: Player {0} has already bid this round.")]
    AlreadyBid(Uuid),
    #[error("Error: Player {player} bid out of turn, expected {expected}.")]
    OutOfTurn { player: Uuid, expected: Uuid },
    #[error("Error: Bid of {amount} is outside 0..={cards}.")]
    BidOutOfRange { amount: i32, cards: u32 },
    #[error("Error: The last bidder cannot make the total bids equal {cards}.")]
    LastBidMatchesCards { cards: u32 },
    #[error("Error: Player {0} has no bid this round.")]
    NoBidThisRound(Uuid),
    #[error("Error: Trick count of {tricks} is outside 0..={cards}.")]
    TricksOutOfRange { tricks: i32, cards: u32 },
    #[error("Error: Recording {tricks} tricks would bring the total to {total}, above {cards}.")]
    TricksExceedCards { tricks: u32, total: u32, cards: u32 },
    #[error("Error: Invalid player: {0}")]
    InvalidPlayer(String),
    #[error("Error: Tricks have not been recorded for every player.")]
    TricksMissing,
    #[error("Error: Recorded tricks total {total} but {cards} were dealt.")]
    TricksTotalMismatch { total: u32, cards: u32 },
}

impl TransitionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransitionError::InvalidPlayerCount(_) => ErrorKind::InvalidPlayerCount,
            TransitionError::NoActiveGame
            | TransitionError::BidOutsideBidding
            | TransitionError::TricksOutsidePlaying
            | TransitionError::CompleteOutsidePlaying
            | TransitionError::RoundNotEnded
            | TransitionError::CompletedGame => ErrorKind::IllegalTransition,
            TransitionError::UnknownPlayer(_)
            | TransitionError::AlreadyBid(_)
            | TransitionError::OutOfTurn { .. }
            | TransitionError::BidOutOfRange { .. }
            | TransitionError::LastBidMatchesCards { .. }
            | TransitionError::NoBidThisRound(_)
            | TransitionError::TricksOutOfRange { .. }
            | TransitionError::TricksExceedCards { .. }
            | TransitionError::InvalidPlayer(_) => ErrorKind::ValidationFailure,
            TransitionError::TricksMissing
            | TransitionError::TricksTotalMismatch { .. } => ErrorKind::IncompleteRound,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum GetError {
    #[error("Error: No game is in progress.")]
    NoActiveGame,
    #[error("Error: Attempted to retrieve an unknown player.")]
    UnknownPlayer,
}
