//! Structured logging for fieldbook.

mod logger;

pub use logger::{Logger, Severity};
