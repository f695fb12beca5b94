//! Store configuration.
//!
//! The store path and backup directory are explicit values handed to
//! `Store::new`; nothing in the crate reads process-global mutable
//! state. `StoreConfig::from_env` is the single place where the
//! environment is consulted, for deployments that configure the paths
//! externally.

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable overriding the store file path.
pub const STORE_PATH_ENV: &str = "RECORD_STORE_PATH";

/// Environment variable overriding the backup directory.
pub const BACKUP_DIR_ENV: &str = "RECORD_STORE_BACKUP_DIR";

/// Default store file, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = "environmental_data.json";

/// Default backup directory, relative to the working directory.
pub const DEFAULT_BACKUP_DIR: &str = "backups";

/// Configuration for a [`crate::store::Store`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path of the single store file holding all tables.
    pub store_path: PathBuf,
    /// Directory receiving timestamped pre-mutation copies.
    pub backup_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            backup_dir: PathBuf::from(DEFAULT_BACKUP_DIR),
        }
    }
}

impl StoreConfig {
    /// Create a config with explicit paths.
    pub fn new(store_path: impl Into<PathBuf>, backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
            backup_dir: backup_dir.into(),
        }
    }

    /// Build a config from the environment, falling back to the
    /// defaults for any variable that is unset.
    pub fn from_env() -> Self {
        let store_path = env::var(STORE_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORE_PATH));
        let backup_dir = env::var(BACKUP_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_BACKUP_DIR));
        Self {
            store_path,
            backup_dir,
        }
    }

    /// The store file path.
    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// The backup directory.
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }
}
