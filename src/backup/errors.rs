//! Backup errors.

use std::io;

use thiserror::Error;

/// Result type for backup operations.
pub type BackupResult<T> = Result<T, BackupError>;

/// Errors raised while snapshotting the store file.
///
/// Backups are best-effort: the store logs these and proceeds with the
/// primary operation.
#[derive(Debug, Error)]
pub enum BackupError {
    /// The backup directory could not be created or the copy failed.
    #[error("backup copy failed: {0}")]
    Io(#[from] io::Error),
}
