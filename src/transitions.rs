use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;
use crate::cards::trump_for_round;
use crate::game_state::{Bid, GameState, Player, Round, Status};
use crate::result::{TransitionError, TransitionSuccess};
use crate::rules::{cards_for_round, next_first_bidder, total_rounds_for};
use crate::validation::validate_roster;

pub(crate) fn epoch_ms_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

fn new_round(number: u32, first_bidder: Uuid) -> Round {
    Round {
        number,
        trump: trump_for_round(number),
        cards_per_player: cards_for_round(number),
        first_bidder,
        bids: Vec::new(),
        completed: false,
    }
}

impl GameState {
    /// Start a game for a finalized roster, in round 1 with the first seat bidding first.
    pub fn new(players: Vec<Player>) -> Result<GameState, TransitionError> {
        let players = validate_roster(players)?;
        let max_rounds = total_rounds_for(players.len())?;
        let first_bidder = players[0].id;

        let game = GameState {
            id: Uuid::new_v4(),
            players,
            current_round: 1,
            max_rounds,
            rounds: vec![new_round(1, first_bidder)],
            status: Status::Bidding,
            started_at_ms: epoch_ms_now(),
            ended_at_ms: None,
        };
        log::info!("Game {} started with {} players over {} rounds", game.id, game.players.len(), max_rounds);
        Ok(game)
    }

    /// Place `player_id`'s bid for the current round.
    ///
    /// Bids are taken in seating rotation from the round's first bidder. The last bidder
    /// may not bring the total of all bids to exactly the number of cards dealt.
    pub fn place_bid(&mut self, player_id: Uuid, amount: i32) -> Result<TransitionSuccess, TransitionError> {
        match self.status {
            Status::Bidding => {},
            Status::Completed => return Err(TransitionError::CompletedGame),
            _ => return Err(TransitionError::BidOutsideBidding),
        }
        if self.player(player_id).is_none() {
            return Err(TransitionError::UnknownPlayer(player_id));
        }
        let expected = self.expected_bidder();
        let is_last = self.is_last_bidder(player_id);
        let player_count = self.players.len();
        let round = self.current().ok_or(TransitionError::NoActiveGame)?;

        if round.bid_for(player_id).is_some() {
            return Err(TransitionError::AlreadyBid(player_id));
        }
        if let Some(expected) = expected {
            if expected != player_id {
                return Err(TransitionError::OutOfTurn { player: player_id, expected });
            }
        }
        let cards = round.cards_per_player;
        let bid = match u32::try_from(amount) {
            Ok(bid) if bid <= cards => bid,
            _ => return Err(TransitionError::BidOutOfRange { amount, cards }),
        };
        if is_last && round.total_bids() + bid == cards {
            return Err(TransitionError::LastBidMatchesCards { cards });
        }

        let round_number = round.number;
        let round = self.current_mut().ok_or(TransitionError::NoActiveGame)?;
        round.bids.push(Bid {
            player_id,
            round_number,
            amount: bid,
            tricks: None,
        });
        log::debug!("Round {}: player {} bid {}", round_number, player_id, bid);

        if round.bids.len() == player_count {
            self.status = Status::Playing;
            return Ok(TransitionSuccess::BiddingComplete);
        }
        Ok(TransitionSuccess::Bid)
    }

    /// Record (or overwrite) the tricks `player_id` won this round.
    ///
    /// The tricks recorded across the table may never exceed the cards dealt.
    pub fn record_tricks(&mut self, player_id: Uuid, tricks: i32) -> Result<TransitionSuccess, TransitionError> {
        match self.status {
            Status::Playing => {},
            Status::Completed => return Err(TransitionError::CompletedGame),
            _ => return Err(TransitionError::TricksOutsidePlaying),
        }
        if self.player(player_id).is_none() {
            return Err(TransitionError::UnknownPlayer(player_id));
        }
        let round = self.current().ok_or(TransitionError::NoActiveGame)?;
        if round.bid_for(player_id).is_none() {
            return Err(TransitionError::NoBidThisRound(player_id));
        }
        let cards = round.cards_per_player;
        let won = match u32::try_from(tricks) {
            Ok(won) if won <= cards => won,
            _ => return Err(TransitionError::TricksOutOfRange { tricks, cards }),
        };
        let total = round.tricks_excluding(player_id) + won;
        if total > cards {
            return Err(TransitionError::TricksExceedCards { tricks: won, total, cards });
        }

        let round = self.current_mut().ok_or(TransitionError::NoActiveGame)?;
        if let Some(bid) = round.bids.iter_mut().find(|b| b.player_id == player_id) {
            bid.tricks = Some(won);
        }
        log::debug!("Round {}: player {} won {} tricks", round.number, player_id, won);
        Ok(TransitionSuccess::TricksRecorded)
    }

    /// Close the current round once every player's tricks are in and add up to the cards dealt.
    pub fn complete_round(&mut self) -> Result<TransitionSuccess, TransitionError> {
        match self.status {
            Status::Playing => {},
            Status::Completed => return Err(TransitionError::CompletedGame),
            _ => return Err(TransitionError::CompleteOutsidePlaying),
        }
        let player_count = self.players.len();
        let round = self.current().ok_or(TransitionError::NoActiveGame)?;
        if !round.can_complete(player_count) {
            if round.bids.len() != player_count || !round.all_tricks_recorded() {
                return Err(TransitionError::TricksMissing);
            }
            return Err(TransitionError::TricksTotalMismatch {
                total: round.total_tricks(),
                cards: round.cards_per_player,
            });
        }

        let is_final = self.is_final_round();
        let round = self.current_mut().ok_or(TransitionError::NoActiveGame)?;
        round.completed = true;
        log::debug!("Round {} completed", round.number);

        if is_final {
            self.status = Status::Completed;
            self.ended_at_ms = Some(epoch_ms_now());
            log::info!("Game {} completed after {} rounds", self.id, self.max_rounds);
            return Ok(TransitionSuccess::GameOver);
        }
        self.status = Status::RoundEnd;
        Ok(TransitionSuccess::RoundComplete)
    }

    /// Deal the next round: one more card, the next trump, and the next seat bids first.
    pub fn advance_round(&mut self) -> Result<TransitionSuccess, TransitionError> {
        match self.status {
            Status::RoundEnd => {},
            Status::Completed => return Err(TransitionError::CompletedGame),
            _ => return Err(TransitionError::RoundNotEnded),
        }
        if self.is_final_round() {
            return Err(TransitionError::CompletedGame);
        }
        let previous = self.current().ok_or(TransitionError::NoActiveGame)?.first_bidder;
        let first_bidder = next_first_bidder(&self.players, previous).ok_or(TransitionError::NoActiveGame)?;

        let number = self.current_round + 1;
        self.rounds.push(new_round(number, first_bidder));
        self.current_round = number;
        self.status = Status::Bidding;
        log::debug!("Round {} dealt, {} bids first", number, first_bidder);
        Ok(TransitionSuccess::NextRound)
    }
}
