//! Store error taxonomy.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::backup::BackupError;
use crate::schema::SchemaError;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the store facade.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store file is exclusively held by another program. Retryable
    /// once the hold is released.
    #[error("store file '{path}' is held open by another program")]
    Conflict {
        /// The contested store file.
        path: PathBuf,
    },

    /// The store file is missing or unreadable on a read path. Read
    /// paths never reinitialize; an operator must intervene or issue a
    /// write.
    #[error("store file '{path}' is missing or not a readable store document")]
    Unavailable {
        /// The store file that could not be served.
        path: PathBuf,
    },

    /// Validation or table-lookup failure; see [`SchemaError`].
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The store document parsed but violates the store's structural
    /// rules, or a payload does not fit the addressed table.
    #[error("malformed store document: {0}")]
    Malformed(String),

    /// Unexpected I/O failure, fatal for the current operation.
    #[error("store I/O failure: {0}")]
    Io(#[from] io::Error),
}

impl From<BackupError> for StoreError {
    fn from(err: BackupError) -> Self {
        match err {
            BackupError::Io(io) => StoreError::Io(io),
        }
    }
}
