use thiserror::Error;
use uuid::Uuid;
use crate::storage::{SnapshotStore, StorageError};
use crate::{GameState, GameTransition, GetError, Player, ScoreKeeper, TransitionError, TransitionSuccess};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A [`ScoreKeeper`] whose game is snapshotted to a store after every accepted command.
///
/// Rejected commands never reach the store. Reset clears the stored snapshot.
pub struct Session<S: SnapshotStore> {
    keeper: ScoreKeeper,
    store: S,
    namespace: String,
}

impl<S: SnapshotStore> Session<S> {
    /// Restore whatever game the store holds for `namespace`.
    pub fn open(store: S, namespace: &str) -> Result<Self, StorageError> {
        let game = store.load(namespace)?;
        match &game {
            Some(g) => log::info!("Restored game {} in round {} from {}", g.id, g.current_round, namespace),
            None => log::debug!("No saved game in {}", namespace),
        }
        let mut keeper = ScoreKeeper::new();
        keeper.restore(game);
        Ok(Session {
            keeper,
            store,
            namespace: namespace.to_string(),
        })
    }

    pub fn game(&self) -> Option<&GameState> {
        self.keeper.game()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let saved = match self.keeper.game() {
            Some(game) => self.store.save(&self.namespace, game),
            None => self.store.clear(&self.namespace),
        };
        if let Err(err) = &saved {
            log::warn!("Could not persist {}: {}", self.namespace, err);
        }
        saved
    }

    /// Persist the accepted change, or put `before` back so memory matches the store again.
    fn commit(&mut self, before: Option<GameState>) -> Result<(), StorageError> {
        if let Err(err) = self.persist() {
            self.keeper.restore(before);
            return Err(err);
        }
        Ok(())
    }

    pub fn initialize_game(&mut self, players: Vec<Player>) -> Result<&GameState, SessionError> {
        let before = self.keeper.game().cloned();
        self.keeper.initialize_game(players)?;
        self.commit(before)?;
        self.keeper.game().ok_or(SessionError::Transition(TransitionError::NoActiveGame))
    }

    /// A command that could not be saved is undone and reported as a storage error.
    pub fn play(&mut self, entry: GameTransition) -> Result<TransitionSuccess, SessionError> {
        let before = self.keeper.game().cloned();
        let outcome = self.keeper.play(entry)?;
        self.commit(before)?;
        Ok(outcome)
    }

    pub fn add_bid(&mut self, player_id: Uuid, amount: i32) -> Result<TransitionSuccess, SessionError> {
        self.play(GameTransition::Bid { player_id, amount })
    }

    pub fn update_tricks(&mut self, player_id: Uuid, tricks: i32) -> Result<TransitionSuccess, SessionError> {
        self.play(GameTransition::Tricks { player_id, tricks })
    }

    pub fn complete_round(&mut self) -> Result<TransitionSuccess, SessionError> {
        self.play(GameTransition::CompleteRound)
    }

    pub fn start_next_round(&mut self) -> Result<TransitionSuccess, SessionError> {
        self.play(GameTransition::NextRound)
    }

    pub fn reset_game(&mut self) -> Result<TransitionSuccess, SessionError> {
        let before = self.keeper.game().cloned();
        let outcome = self.keeper.reset_game();
        self.commit(before)?;
        Ok(outcome)
    }

    pub fn player_score(&self, player_id: Uuid) -> Result<u32, GetError> {
        self.keeper.player_score(player_id)
    }
}
