use serde::{Serialize, Deserialize};
use uuid::Uuid;
use crate::cards::Suit;

/// Where the game is in its round cycle. Setup happens before a `GameState` exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Bidding,
    Playing,
    RoundEnd,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    #[default]
    Active,
    Inactive,
}

/// A seat at the table. Scores are never stored here, see [`crate::scoring`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub status: PlayerStatus,
}

impl Player {
    pub fn new(name: &str) -> Player {
        Player::with_id(Uuid::new_v4(), name)
    }

    pub fn with_id(id: Uuid, name: &str) -> Player {
        Player {
            id,
            name: name.to_string(),
            status: PlayerStatus::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    pub player_id: Uuid,
    pub round_number: u32,
    pub amount: u32,
    /// Tricks actually won; `None` until recorded.
    pub tricks: Option<u32>,
}

impl Bid {
    pub fn is_perfect(&self) -> bool {
        self.tricks == Some(self.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub number: u32,
    pub trump: Suit,
    pub cards_per_player: u32,
    pub first_bidder: Uuid,
    /// In bidding order, starting from `first_bidder`.
    pub bids: Vec<Bid>,
    pub completed: bool,
}

impl Round {
    pub fn bid_for(&self, player_id: Uuid) -> Option<&Bid> {
        self.bids.iter().find(|b| b.player_id == player_id)
    }

    pub fn total_bids(&self) -> u32 {
        self.bids.iter().map(|b| b.amount).sum()
    }

    /// Sum of recorded tricks; unrecorded bids count as zero.
    pub fn total_tricks(&self) -> u32 {
        self.bids.iter().filter_map(|b| b.tricks).sum()
    }

    pub fn all_tricks_recorded(&self) -> bool {
        self.bids.iter().all(|b| b.tricks.is_some())
    }

    /// Recorded tricks of everyone except `player_id`.
    pub fn tricks_excluding(&self, player_id: Uuid) -> u32 {
        self.bids
            .iter()
            .filter(|b| b.player_id != player_id)
            .filter_map(|b| b.tricks)
            .sum()
    }

    /// Every player has a bid, every bid has tricks, and the tricks add up to the cards dealt.
    pub fn can_complete(&self, player_count: usize) -> bool {
        self.bids.len() == player_count
            && self.all_tricks_recorded()
            && self.total_tricks() == self.cards_per_player
    }

    /// A completed round whose tricks are consistent.
    pub fn is_complete(&self, player_count: usize) -> bool {
        self.completed && self.can_complete(player_count)
    }
}

/// The whole game. Only the transitions in [`crate::transitions`] mutate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub id: Uuid,
    pub players: Vec<Player>,
    /// 1-based.
    pub current_round: u32,
    pub max_rounds: u32,
    pub rounds: Vec<Round>,
    pub status: Status,
    pub started_at_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at_ms: Option<u64>,
}

impl GameState {
    pub fn player(&self, player_id: Uuid) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn seat_of(&self, player_id: Uuid) -> Option<usize> {
        self.players.iter().position(|p| p.id == player_id)
    }

    /// Case-insensitive lookup by display name.
    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        let wanted = name.trim().to_lowercase();
        self.players.iter().find(|p| p.name.to_lowercase() == wanted)
    }

    pub fn current(&self) -> Option<&Round> {
        let index = self.current_round.checked_sub(1)? as usize;
        self.rounds.get(index)
    }

    pub(crate) fn current_mut(&mut self) -> Option<&mut Round> {
        let index = self.current_round.checked_sub(1)? as usize;
        self.rounds.get_mut(index)
    }

    /// Bidding order for the current round: every seat, starting from the round's first bidder.
    pub fn bidding_order(&self) -> Vec<Uuid> {
        let Some(round) = self.current() else {
            return Vec::new();
        };
        let start = self.seat_of(round.first_bidder).unwrap_or(0);
        let n = self.players.len();
        (0..n).map(|offset| self.players[(start + offset) % n].id).collect()
    }

    /// Who is expected to bid next, while bidding.
    pub fn expected_bidder(&self) -> Option<Uuid> {
        if self.status != Status::Bidding {
            return None;
        }
        let placed = self.current()?.bids.len();
        self.bidding_order().get(placed).copied()
    }

    /// Whether `player_id` bids last in the current rotation.
    pub fn is_last_bidder(&self, player_id: Uuid) -> bool {
        self.bidding_order().last() == Some(&player_id)
    }

    pub fn is_final_round(&self) -> bool {
        self.current_round >= self.max_rounds
    }

    pub fn rounds_remaining(&self) -> u32 {
        self.max_rounds.saturating_sub(self.current_round)
    }
}
