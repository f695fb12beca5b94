//! fieldbook - a spreadsheet-backed record store for periodic
//! environmental sensor readings (water / soil / air quality).
//!
//! One physical file holds a fixed set of named tables. Every table is
//! keyed by its `Date` column: submitting a record for an existing
//! calendar date replaces that row, and rows are kept in ascending date
//! order after every mutation. Before any mutation the whole store file
//! is copied into a timestamped backup.

pub mod backup;
pub mod config;
pub mod guard;
pub mod observability;
pub mod schema;
pub mod store;
