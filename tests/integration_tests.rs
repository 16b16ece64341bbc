extern crate judgment;

use judgment::scoring;
use judgment::session::{Session, SessionError};
use judgment::sqlite_store::SqliteStore;
use judgment::storage::SnapshotStore;
use judgment::{ErrorKind, GameTransition, Player, ScoreKeeper, Status, TransitionError, TransitionSuccess};

/// Plays a whole four player game. From round 2 on the first bidder bids one and takes a
/// single trick; everyone else bids zero and the last seat in rotation takes the rest.
#[test]
fn full_game_through_public_api() {
    let players: Vec<Player> = ["North", "East", "South", "West"].iter().map(|n| Player::new(n)).collect();
    let mut k = ScoreKeeper::new();
    let max_rounds = k.initialize_game(players).unwrap().max_rounds;
    assert_eq!(max_rounds, 13);

    let mut last = None;
    while k.game().unwrap().status != Status::Completed {
        let game = k.game().unwrap();
        let order = game.bidding_order();
        let cards = game.current().unwrap().cards_per_player as i32;

        let lead = if cards > 1 { 1 } else { 0 };

        k.play(GameTransition::Bid { player_id: order[0], amount: lead }).unwrap();
        for &id in &order[1..] {
            k.play(GameTransition::Bid { player_id: id, amount: 0 }).unwrap();
        }
        k.play(GameTransition::Tricks { player_id: order[0], tricks: lead }).unwrap();
        k.play(GameTransition::Tricks { player_id: order[1], tricks: 0 }).unwrap();
        k.play(GameTransition::Tricks { player_id: order[2], tricks: 0 }).unwrap();
        k.play(GameTransition::Tricks { player_id: order[3], tricks: cards - lead }).unwrap();

        let outcome = k.play(GameTransition::CompleteRound).unwrap();
        if outcome == TransitionSuccess::RoundComplete {
            k.play(GameTransition::NextRound).unwrap();
        }
        last = Some(outcome);
    }
    assert_eq!(last, Some(TransitionSuccess::GameOver));

    let game = k.game().unwrap();
    assert_eq!(game.rounds.len(), 13);
    let stats = scoring::game_statistics(game);
    assert_eq!(stats.rounds_played, 13);
    assert_eq!(stats.rounds_remaining, 0);

    // Round 1 scores 10 for three seats, every later round 11 + 10 + 10.
    let board = k.leaderboard().unwrap();
    let total: u32 = board.iter().map(|s| s.total_score).sum();
    assert_eq!(total, 30 + 12 * 31);
    assert!(board.windows(2).all(|w| w[0].total_score >= w[1].total_score));
    let by_player: u32 = game.players.iter().map(|p| k.player_score(p.id).unwrap()).sum();
    assert_eq!(total, by_player);

    let err = k.play(GameTransition::NextRound).unwrap_err();
    assert_eq!(err, TransitionError::CompletedGame);
    assert_eq!(err.kind(), ErrorKind::IllegalTransition);
}

#[test]
fn sqlite_session_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.db");

    let players = vec![Player::new("Ann"), Player::new("Bob"), Player::new("Cy")];
    let ids: Vec<_> = players.iter().map(|p| p.id).collect();
    {
        let store = SqliteStore::open(&path).unwrap();
        let mut session = Session::open(store, "table-1").unwrap();
        session.initialize_game(players).unwrap();
        session.add_bid(ids[0], 0).unwrap();
        session.add_bid(ids[1], 1).unwrap();
        let err = session.add_bid(ids[2], 0).unwrap_err();
        assert!(matches!(err, SessionError::Transition(TransitionError::LastBidMatchesCards { cards: 1 })));
    }

    let store = SqliteStore::open(&path).unwrap();
    let mut session = Session::open(store, "table-1").unwrap();
    let game = session.game().unwrap();
    assert_eq!(game.rounds[0].bids.len(), 2);
    assert_eq!(game.expected_bidder(), Some(ids[2]));

    assert_eq!(session.add_bid(ids[2], 1).unwrap(), TransitionSuccess::BiddingComplete);
    session.update_tricks(ids[0], 0).unwrap();
    session.update_tricks(ids[1], 1).unwrap();
    session.update_tricks(ids[2], 0).unwrap();
    session.complete_round().unwrap();
    assert_eq!(session.player_score(ids[1]), Ok(11));

    // Another namespace in the same file is independent.
    let other = Session::open(SqliteStore::open(&path).unwrap(), "table-2").unwrap();
    assert!(other.game().is_none());

    session.reset_game().unwrap();
    assert_eq!(session.store().load("table-1").unwrap(), None);
}
