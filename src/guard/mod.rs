//! File guard: external-hold detection and store validation.
//!
//! The guard answers two questions before the store touches its file:
//! is the file exclusively held by some other program, and does it
//! still parse as a store document. The write-path state machine that
//! consumes these answers lives in the store facade.

use std::env;
use std::fs;
use std::path::Path;

use crate::store::book::Book;

/// Environment variable naming a path the probe reports as held.
///
/// An external exclusive hold comes from another program, which a test
/// cannot portably arrange (on Unix the same-path rename succeeds even
/// while another process has the file open). Setting this variable to
/// a store path injects the hold instead.
pub const FORCE_HOLD_ENV: &str = "FIELDBOOK_FORCE_HOLD";

/// Probes for external exclusive holds and structural corruption.
pub struct FileGuard;

impl FileGuard {
    /// Whether `path` is exclusively held by another program.
    ///
    /// Probes with a same-path rename: the rename changes neither name
    /// nor content, but fails under the exclusive-lock semantics most
    /// platforms apply to files a spreadsheet application holds open.
    /// A missing path is never locked. This only detects external
    /// holders, not concurrent callers of this crate.
    pub fn is_locked(path: &Path) -> bool {
        if !path.exists() {
            return false;
        }
        if forced_hold(path) {
            return true;
        }
        fs::rename(path, path).is_err()
    }

    /// Whether `path` exists and fully parses as a store document.
    ///
    /// Write paths reinitialize when this is false; read paths surface
    /// the failure instead.
    pub fn is_valid(path: &Path) -> bool {
        path.exists() && Book::load(path).is_ok()
    }
}

/// Whether [`FORCE_HOLD_ENV`] names `path`.
///
/// Read on every probe rather than cached, so a test can set and clear
/// the hold within one process.
fn forced_hold(path: &Path) -> bool {
    env::var(FORCE_HOLD_ENV)
        .map(|forced| Path::new(&forced) == path)
        .unwrap_or(false)
}
