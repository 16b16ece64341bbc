use serde::{Serialize, Deserialize};
use uuid::Uuid;
use crate::game_state::{Bid, GameState, Player, Round};

/// Bonus awarded on top of the tricks for hitting a bid exactly.
pub const PERFECT_BID_BONUS: u32 = 10;

/// A player's total for display, computed from the rounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub player_id: Uuid,
    pub name: String,
    pub total_score: u32,
    pub bid_matches: u32,
    pub rounds_scored: u32,
    /// Percentage of recorded rounds where the bid was hit, `None` before any tricks are recorded.
    pub success_rate: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStatistics {
    pub total_bids: u32,
    pub total_tricks: u32,
    pub overbid: bool,
    pub underbid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatistics {
    pub total_bids: u32,
    pub successful_bids: u32,
    pub average_score: Option<f64>,
    pub perfect_rounds: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundHighlight {
    pub round: u32,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStatistics {
    pub rounds_played: u32,
    pub rounds_remaining: u32,
    pub highest_scoring_round: Option<RoundHighlight>,
    pub leaderboard: Vec<Standing>,
}

/// `10 + tricks` for a perfect bid, otherwise nothing. Unrecorded tricks score nothing.
pub fn round_score(bid: &Bid) -> u32 {
    match bid.tricks {
        Some(tricks) if tricks == bid.amount => PERFECT_BID_BONUS + tricks,
        _ => 0,
    }
}

/// Sum of round scores across every round the player bid in, finished or not.
pub fn total_score(player_id: Uuid, rounds: &[Round]) -> u32 {
    rounds
        .iter()
        .filter_map(|r| r.bid_for(player_id))
        .map(round_score)
        .sum()
}

fn standing(player: &Player, rounds: &[Round]) -> Standing {
    let mut total_score = 0;
    let mut bid_matches = 0;
    let mut rounds_scored = 0;
    for bid in rounds.iter().filter_map(|r| r.bid_for(player.id)) {
        if bid.tricks.is_none() {
            continue;
        }
        rounds_scored += 1;
        if bid.is_perfect() {
            bid_matches += 1;
        }
        total_score += round_score(bid);
    }
    let success_rate = if rounds_scored > 0 {
        Some(bid_matches as f64 * 100.0 / rounds_scored as f64)
    } else {
        None
    };
    Standing {
        player_id: player.id,
        name: player.name.clone(),
        total_score,
        bid_matches,
        rounds_scored,
        success_rate,
    }
}

/// Players by total score, highest first. Ties keep seating order.
pub fn leaderboard(players: &[Player], rounds: &[Round]) -> Vec<Standing> {
    let mut standings: Vec<Standing> = players.iter().map(|p| standing(p, rounds)).collect();
    standings.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    standings
}

/// Highest total score; the earliest seat wins a tie.
pub fn winner<'a>(players: &'a [Player], rounds: &[Round]) -> Option<&'a Player> {
    let mut best: Option<(&Player, u32)> = None;
    for player in players {
        let score = total_score(player.id, rounds);
        match best {
            Some((_, top)) if score <= top => {},
            _ => best = Some((player, score)),
        }
    }
    best.map(|(player, _)| player)
}

/// Best scorer of a completed round, earliest bid winning a tie.
pub fn round_winner(round: &Round, players: &[Player]) -> Option<Uuid> {
    if !round.completed {
        return None;
    }
    let mut best: Option<(Uuid, u32)> = None;
    for bid in &round.bids {
        let score = round_score(bid);
        match best {
            Some((_, top)) if score <= top => {},
            _ => best = Some((bid.player_id, score)),
        }
    }
    best.map(|(id, _)| id).filter(|id| players.iter().any(|p| p.id == *id))
}

pub fn round_statistics(round: &Round) -> RoundStatistics {
    let total_bids = round.total_bids();
    RoundStatistics {
        total_bids,
        total_tricks: round.total_tricks(),
        overbid: total_bids > round.cards_per_player,
        underbid: total_bids < round.cards_per_player,
    }
}

pub fn player_statistics(player: &Player, rounds: &[Round]) -> PlayerStatistics {
    let bids: Vec<&Bid> = rounds.iter().filter_map(|r| r.bid_for(player.id)).collect();
    let scores: Vec<u32> = bids.iter().map(|b| round_score(b)).collect();
    let average_score = if bids.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<u32>() as f64 / bids.len() as f64)
    };
    PlayerStatistics {
        total_bids: bids.iter().map(|b| b.amount).sum(),
        successful_bids: bids.iter().filter(|b| b.is_perfect()).count() as u32,
        average_score,
        perfect_rounds: scores.iter().filter(|&&s| s > 0).count() as u32,
    }
}

pub fn game_statistics(game: &GameState) -> GameStatistics {
    let completed: Vec<&Round> = game.rounds.iter().filter(|r| r.completed).collect();

    let mut highest_scoring_round: Option<RoundHighlight> = None;
    for round in &completed {
        let score: u32 = round.bids.iter().map(round_score).sum();
        let top = highest_scoring_round.map(|h| h.score).unwrap_or(0);
        if score > top {
            highest_scoring_round = Some(RoundHighlight { round: round.number, score });
        }
    }

    GameStatistics {
        rounds_played: completed.len() as u32,
        rounds_remaining: game.rounds_remaining(),
        highest_scoring_round,
        leaderboard: leaderboard(&game.players, &game.rounds),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;
    use ntest::test_case;

    fn bid(player_id: Uuid, amount: u32, tricks: Option<u32>) -> Bid {
        Bid { player_id, round_number: 1, amount, tricks }
    }

    fn round(number: u32, completed: bool, bids: Vec<Bid>) -> Round {
        Round {
            number,
            trump: Suit::Spades,
            cards_per_player: number,
            first_bidder: bids[0].player_id,
            bids,
            completed,
        }
    }

    fn players(names: &[&str]) -> Vec<Player> {
        names.iter().map(|n| Player::new(n)).collect()
    }

    #[test_case(0, 0, 10)]
    #[test_case(1, 1, 11)]
    #[test_case(5, 5, 15)]
    #[test_case(2, 1, 0)]
    #[test_case(0, 3, 0)]
    fn round_score_rewards_exact_bids(amount: u32, tricks: u32, expected: u32) {
        assert_eq!(round_score(&bid(Uuid::nil(), amount, Some(tricks))), expected);
    }

    #[test]
    fn unrecorded_tricks_score_nothing() {
        assert_eq!(round_score(&bid(Uuid::nil(), 0, None)), 0);
    }

    #[test]
    fn total_includes_unfinished_rounds() {
        let p = players(&["A", "B", "C"]);
        let (a, b) = (p[0].id, p[1].id);
        let rounds = vec![
            round(1, true, vec![bid(a, 1, Some(1)), bid(b, 1, Some(0))]),
            round(2, false, vec![bid(a, 2, Some(2)), bid(b, 0, None)]),
        ];
        assert_eq!(total_score(a, &rounds), 11 + 12);
        assert_eq!(total_score(b, &rounds), 0);
        assert_eq!(total_score(p[2].id, &rounds), 0);
    }

    #[test]
    fn leaderboard_sorts_descending_and_keeps_seat_order_on_ties() {
        let p = players(&["A", "B", "C"]);
        let rounds = vec![round(1, true, vec![
            bid(p[0].id, 1, Some(0)),
            bid(p[1].id, 0, Some(0)),
            bid(p[2].id, 0, Some(1)),
        ])];
        let board = leaderboard(&p, &rounds);
        let names: Vec<&str> = board.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
        assert_eq!(board[0].total_score, 10);
        assert_eq!(board[0].success_rate, Some(100.0));
        assert_eq!(board[1].success_rate, Some(0.0));
    }

    #[test]
    fn winner_is_first_of_the_tied_leaders() {
        let p = players(&["A", "B", "C"]);
        let rounds = vec![round(1, true, vec![
            bid(p[0].id, 1, Some(0)),
            bid(p[1].id, 0, Some(0)),
            bid(p[2].id, 0, Some(1)),
        ])];
        assert_eq!(winner(&p, &rounds).map(|w| w.name.as_str()), Some("B"));
        assert_eq!(winner(&p, &[]).map(|w| w.name.as_str()), Some("A"));
        assert!(winner(&[], &rounds).is_none());
    }

    #[test]
    fn round_winner_requires_completion() {
        let p = players(&["A", "B"]);
        let bids = vec![bid(p[0].id, 0, Some(0)), bid(p[1].id, 2, Some(2))];
        assert_eq!(round_winner(&round(2, false, bids.clone()), &p), None);
        assert_eq!(round_winner(&round(2, true, bids), &p), Some(p[1].id));
    }

    #[test]
    fn round_statistics_flags_over_and_under_bidding() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let over = round_statistics(&round(2, false, vec![bid(a, 2, Some(1)), bid(b, 1, None)]));
        assert_eq!(over, RoundStatistics { total_bids: 3, total_tricks: 1, overbid: true, underbid: false });
        let under = round_statistics(&round(3, false, vec![bid(a, 1, None), bid(b, 1, None)]));
        assert!(under.underbid);
        assert!(!under.overbid);
    }

    #[test]
    fn player_statistics_average_over_bids() {
        let p = players(&["A"]);
        let a = p[0].id;
        assert_eq!(player_statistics(&p[0], &[]).average_score, None);
        let rounds = vec![
            round(1, true, vec![bid(a, 1, Some(1))]),
            round(2, true, vec![bid(a, 2, Some(0))]),
        ];
        let stats = player_statistics(&p[0], &rounds);
        assert_eq!(stats.total_bids, 3);
        assert_eq!(stats.successful_bids, 1);
        assert_eq!(stats.perfect_rounds, 1);
        assert_eq!(stats.average_score, Some(5.5));
    }
}
