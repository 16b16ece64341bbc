use std::fmt;
use serde::{Serialize, Deserialize};

/// The four suits. Only used to name the trump of a round; individual cards are never modeled.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Spades,
    Hearts,
    Clubs,
    Diamonds,
}

impl fmt::Debug for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Suit::Spades => write!(f, "\u{2664}"),
            Suit::Hearts => write!(f, "\u{2661}"),
            Suit::Clubs => write!(f, "\u{2667}"),
            Suit::Diamonds => write!(f, "\u{2662}"),
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Suit::Spades => write!(f, "spades"),
            Suit::Hearts => write!(f, "hearts"),
            Suit::Clubs => write!(f, "clubs"),
            Suit::Diamonds => write!(f, "diamonds"),
        }
    }
}

/// Trump rotation, repeating every four rounds.
pub const TRUMP_SEQUENCE: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];

/// Trump suit for a 1-based round number.
pub fn trump_for_round(round_number: u32) -> Suit {
    let index = (round_number.saturating_sub(1) % 4) as usize;
    TRUMP_SEQUENCE[index]
}
