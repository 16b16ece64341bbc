use std::env;
use std::path::PathBuf;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use crate::storage::DEFAULT_NAMESPACE;

pub const NAMESPACE_VAR: &str = "JUDGMENT_NAMESPACE";
pub const DB_PATH_VAR: &str = "JUDGMENT_DB";
pub const DEFAULT_DB_PATH: &str = "judgment.db";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Where snapshots live and under which key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub namespace: String,
    pub db_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            namespace: DEFAULT_NAMESPACE.to_string(),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

impl Config {
    /// Defaults overridden by `JUDGMENT_NAMESPACE` and `JUDGMENT_DB`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        if let Some(namespace) = lookup(NAMESPACE_VAR) {
            config.namespace = namespace;
        }
        if let Some(path) = lookup(DB_PATH_VAR) {
            config.db_path = PathBuf::from(path);
        }
        config.validate()?;
        Ok(config)
    }

    /// Apply command line overrides on top of the environment.
    pub fn with_overrides(mut self, namespace: Option<String>, db_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        if let Some(namespace) = namespace {
            self.namespace = namespace;
        }
        if let Some(db_path) = db_path {
            self.db_path = db_path;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace.trim().is_empty() {
            return Err(ConfigError::Empty(NAMESPACE_VAR));
        }
        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::Empty(DB_PATH_VAR));
        }
        Ok(())
    }
}
