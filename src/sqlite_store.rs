use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use rusqlite::{Connection, OptionalExtension, params};
use crate::GameState;
use crate::storage::{SnapshotStore, StorageError};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS snapshots (
    namespace TEXT PRIMARY KEY,
    data TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);";

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Database(err.to_string())
    }
}

/// SQLite-backed snapshots, one row per namespace.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a SQLite database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        log::info!("Opening snapshot storage at: {:?}", path.as_ref());
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(SqliteStore { conn })
    }

    /// Create an in-memory database (useful for testing)
    pub fn open_in_memory() -> Result<Self, StorageError> {
        log::debug!("Creating in-memory snapshot storage");
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(SqliteStore { conn })
    }

    pub fn count(&self) -> Result<usize, StorageError> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM snapshots", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl SnapshotStore for SqliteStore {
    fn load(&self, namespace: &str) -> Result<Option<GameState>, StorageError> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT data FROM snapshots WHERE namespace = ?1",
                params![namespace],
                |row| row.get(0),
            )
            .optional()?;
        match json {
            Some(json) => {
                let game: GameState = serde_json::from_str(&json)?;
                log::debug!("Loaded game {} from namespace {}", game.id, namespace);
                Ok(Some(game))
            },
            None => Ok(None),
        }
    }

    fn save(&mut self, namespace: &str, game: &GameState) -> Result<(), StorageError> {
        let json = serde_json::to_string(game)?;
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;
        self.conn.execute(
            "INSERT OR REPLACE INTO snapshots (namespace, data, updated_at) VALUES (?1, ?2, ?3)",
            params![namespace, json, timestamp],
        )?;
        log::debug!("Saved game {} to namespace {}", game.id, namespace);
        Ok(())
    }

    fn clear(&mut self, namespace: &str) -> Result<(), StorageError> {
        let deleted = self.conn.execute("DELETE FROM snapshots WHERE namespace = ?1", params![namespace])?;
        if deleted > 0 {
            log::info!("Cleared snapshot in namespace {}", namespace);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Status};

    fn game() -> GameState {
        GameState::new(vec![Player::new("A"), Player::new("B"), Player::new("C"), Player::new("D")]).unwrap()
    }

    #[test]
    fn test_create_in_memory_storage() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_save_replaces_previous_snapshot() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let mut game = game();
        store.save("ns", &game).unwrap();

        let first = game.players[0].id;
        game.place_bid(first, 1).unwrap();
        store.save("ns", &game).unwrap();

        assert_eq!(store.count().unwrap(), 1);
        let loaded = store.load("ns").unwrap().unwrap();
        assert_eq!(loaded, game);
        assert_eq!(loaded.status, Status::Bidding);
        assert_eq!(loaded.rounds[0].bids.len(), 1);
    }

    #[test]
    fn test_load_missing_namespace() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.load("nothing").unwrap().is_none());
    }

    #[test]
    fn test_clear_snapshot() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.save("ns", &game()).unwrap();
        store.clear("ns").unwrap();
        store.clear("ns").unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_snapshot_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("judgment.db");
        let game = game();
        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.save("ns", &game).unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.load("ns").unwrap(), Some(game));
    }
}
