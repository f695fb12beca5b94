//! Backup manager: timestamped pre-mutation copies of the store file.
//!
//! Before any mutating operation the whole store file is copied into
//! the backup directory. Archives are never read back by the running
//! system; restoration is a manual, external operation. Collisions
//! within the same second overwrite, which is accepted.

mod errors;

pub use errors::{BackupError, BackupResult};

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

/// Timestamp layout embedded in archive filenames.
const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Creates timestamped full-file copies of the store.
#[derive(Debug, Clone)]
pub struct BackupManager {
    backup_dir: PathBuf,
}

impl BackupManager {
    /// A manager writing archives into `backup_dir`.
    pub fn new(backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            backup_dir: backup_dir.into(),
        }
    }

    /// The directory receiving archives.
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Create the backup directory if it does not exist yet.
    pub fn ensure_dir(&self) -> BackupResult<()> {
        fs::create_dir_all(&self.backup_dir)?;
        Ok(())
    }

    /// Copy the store file into a timestamped archive.
    ///
    /// Returns the archive path, or `None` when `store_path` does not
    /// exist yet; there is nothing to protect on first write.
    pub fn snapshot(&self, store_path: &Path) -> BackupResult<Option<PathBuf>> {
        if !store_path.exists() {
            return Ok(None);
        }
        self.ensure_dir()?;

        let archive = self.backup_dir.join(archive_name(store_path));
        fs::copy(store_path, &archive)?;
        Ok(Some(archive))
    }
}

/// Archive filename: `<basename>_backup_<YYYYMMDD_HHMMSS>.<ext>`.
fn archive_name(store_path: &Path) -> String {
    let stem = store_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "store".to_string());
    let stamp = Local::now().format(STAMP_FORMAT);
    match store_path.extension() {
        Some(ext) => format!("{}_backup_{}.{}", stem, stamp, ext.to_string_lossy()),
        None => format!("{}_backup_{}", stem, stamp),
    }
}
