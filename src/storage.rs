use std::collections::HashMap;
use thiserror::Error;
use crate::GameState;

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "judgement-game-storage";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Whole-game snapshots keyed by namespace. Saving replaces the previous snapshot.
pub trait SnapshotStore {
    fn load(&self, namespace: &str) -> Result<Option<GameState>, StorageError>;
    fn save(&mut self, namespace: &str, game: &GameState) -> Result<(), StorageError>;
    fn clear(&mut self, namespace: &str) -> Result<(), StorageError>;
}

/// Keeps serialized snapshots in memory, so the same encoding is exercised as on disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, namespace: &str) -> Result<Option<GameState>, StorageError> {
        match self.snapshots.get(namespace) {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, namespace: &str, game: &GameState) -> Result<(), StorageError> {
        let json = serde_json::to_string(game)?;
        self.snapshots.insert(namespace.to_string(), json);
        Ok(())
    }

    fn clear(&mut self, namespace: &str) -> Result<(), StorageError> {
        self.snapshots.remove(namespace);
        Ok(())
    }
}
