//! The table store: the facade consumed by the transport layer.
//!
//! Every operation opens the store file, completes its full
//! read-modify-write cycle, and closes it; no component holds a
//! long-lived handle, so the latest on-disk state is always observed.
//! Mutating operations follow a fixed sequence: check for an external
//! hold, reinitialize if the file is missing or corrupt, snapshot a
//! backup, mutate, then resort and save. Read paths never
//! reinitialize: a missing or corrupt store is surfaced instead of
//! silently replaced with an empty view.
//!
//! Mutating methods take `&mut self`: a `Store` shared across threads
//! must be wrapped in a `Mutex`, which makes write serialization the
//! explicit choice of the caller. The file guard only detects external
//! holders.

pub mod book;

mod errors;
mod export;
mod table;

pub use book::{Book, Cell, Column, Table};
pub use errors::{StoreError, StoreResult};
pub use export::Export;
pub use table::iso_date;

use std::collections::HashMap;
use std::path::Path;

use serde_json::{Map, Value};

use crate::backup::BackupManager;
use crate::config::StoreConfig;
use crate::guard::FileGuard;
use crate::observability::Logger;
use crate::schema::{RecordValidator, SchemaRegistry};

/// A materialized table: ordered columns and date-sorted rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    /// Ordered column names.
    pub columns: Vec<String>,
    /// Rows in ascending date order.
    pub rows: Vec<Vec<Cell>>,
}

/// The spreadsheet-backed record store.
#[derive(Debug)]
pub struct Store {
    config: StoreConfig,
    backups: BackupManager,
}

impl Store {
    /// Open a store over the configured paths.
    ///
    /// Creates the backup directory; the store file itself is only
    /// created by the first write.
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        let backups = BackupManager::new(config.backup_dir.clone());
        backups.ensure_dir()?;
        Ok(Self { config, backups })
    }

    /// The store file path.
    pub fn path(&self) -> &Path {
        self.config.store_path()
    }

    /// Write a fresh store containing every registered table with
    /// headers only.
    pub fn initialize_empty(&mut self) -> StoreResult<()> {
        Book::empty().save(self.path())?;
        Logger::info("STORE_INITIALIZED", &[("path", self.display_path())]);
        Ok(())
    }

    /// Validate and upsert one submitted record.
    ///
    /// The raw map must carry the table selector and a `Date` string;
    /// see [`RecordValidator`]. Submitting twice for the same calendar
    /// date leaves one row holding the later submission's values.
    pub fn submit_record(&mut self, raw: HashMap<String, String>) -> StoreResult<()> {
        let record = RecordValidator::validate(raw)?;

        let mut book = self.open_for_write()?;
        let table = book.table_mut(record.table()).ok_or_else(|| {
            StoreError::Malformed(format!(
                "table '{}' missing from store document",
                record.table()
            ))
        })?;

        table.upsert(&record);
        let dropped = table.resort();
        let table_name = table.name.clone();
        book.save(self.path())?;

        self.report_dropped(&table_name, dropped);
        Logger::info(
            "RECORD_UPSERTED",
            &[
                ("date", iso_date(record.date())),
                ("table", table_name),
            ],
        );
        Ok(())
    }

    /// Materialize a table for display, persisting the re-sorted
    /// order.
    pub fn read_for_display(&mut self, table_name: &str) -> StoreResult<TableView> {
        SchemaRegistry::table(table_name)?;

        let mut book = self.open_for_read()?;
        let table = book.table_mut(table_name).ok_or_else(|| {
            StoreError::Malformed(format!(
                "table '{}' missing from store document",
                table_name
            ))
        })?;

        let dropped = table.resort();
        let view = TableView {
            columns: table.column_names(),
            rows: table.rows.clone(),
        };
        book.save(self.path())?;

        self.report_dropped(table_name, dropped);
        Ok(view)
    }

    /// Replace a table wholesale with an edited payload.
    ///
    /// The submitted column list must equal the table's schema; rows
    /// get per-column all-or-nothing numeric coercion, then the table
    /// is rebuilt solely from the payload and re-sorted.
    pub fn bulk_replace(
        &mut self,
        table_name: &str,
        columns: &[String],
        rows: &[Vec<String>],
    ) -> StoreResult<()> {
        let schema = SchemaRegistry::table(table_name)?;
        let expected = schema.column_names();
        if columns != expected.as_slice() {
            return Err(crate::schema::SchemaError::ColumnMismatch {
                table: table_name.to_string(),
                expected,
            }
            .into());
        }

        let mut book = self.open_for_write()?;
        let mut replacement = Table::from_edit(table_name, columns, rows)?;
        let dropped = replacement.resort();
        let row_count = replacement.rows.len();
        book.replace_table(replacement);
        book.save(self.path())?;

        self.report_dropped(table_name, dropped);
        Logger::info(
            "TABLE_REPLACED",
            &[
                ("rows", row_count.to_string()),
                ("table", table_name.to_string()),
            ],
        );
        Ok(())
    }

    /// Export one table as a standalone store document.
    pub fn export_table(&self, table_name: &str) -> StoreResult<Export> {
        SchemaRegistry::table(table_name)?;
        let book = self.open_for_read()?;
        export::export_table(&book, table_name, self.path())
    }

    /// Export the whole store as a standalone document.
    pub fn export_all(&self) -> StoreResult<Export> {
        let book = self.open_for_read()?;
        export::export_all(&book, self.path())
    }

    /// Rows shaped for charting: date-sorted JSON objects keyed by
    /// column name, dates as `YYYY-MM-DD`, nulls as empty strings.
    ///
    /// Works on an in-memory copy; never persists.
    pub fn chart_data(&self, table_name: &str) -> StoreResult<Vec<Map<String, Value>>> {
        SchemaRegistry::table(table_name)?;

        let book = self.open_for_read()?;
        let mut table = book
            .table(table_name)
            .ok_or_else(|| {
                StoreError::Malformed(format!(
                    "table '{}' missing from store document",
                    table_name
                ))
            })?
            .clone();
        table.resort();

        let columns = table.column_names();
        let rows = table
            .rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .zip(row)
                    .map(|(column, cell)| (column.clone(), chart_value(cell)))
                    .collect()
            })
            .collect();
        Ok(rows)
    }

    /// Write-path entry: lock check, validity check with
    /// reinitialization, then backup. Returns the loaded document
    /// ready to mutate.
    fn open_for_write(&mut self) -> StoreResult<Book> {
        let path = self.config.store_path.clone();

        if FileGuard::is_locked(&path) {
            return Err(StoreError::Conflict { path });
        }

        if !FileGuard::is_valid(&path) {
            let existed = path.exists();
            Book::empty().save(&path)?;
            if existed {
                // Unreadable content is wiped; leaving it would wedge
                // every future write.
                Logger::warn("STORE_REINITIALIZED", &[("path", self.display_path())]);
            } else {
                Logger::info("STORE_INITIALIZED", &[("path", self.display_path())]);
            }
        }

        match self.backups.snapshot(&path) {
            Ok(Some(archive)) => Logger::info(
                "BACKUP_CREATED",
                &[("archive", archive.display().to_string())],
            ),
            Ok(None) => {}
            Err(err) => Logger::warn("BACKUP_FAILED", &[("reason", err.to_string())]),
        }

        Book::load(&path)
    }

    /// Read-path entry: a missing or unparseable store surfaces as
    /// unavailable, never triggers reinitialization.
    fn open_for_read(&self) -> StoreResult<Book> {
        let path = self.config.store_path();
        if !path.exists() {
            return Err(StoreError::Unavailable {
                path: path.to_path_buf(),
            });
        }
        Book::load(path).map_err(|_| StoreError::Unavailable {
            path: path.to_path_buf(),
        })
    }

    fn report_dropped(&self, table_name: &str, dropped: usize) {
        if dropped > 0 {
            Logger::warn(
                "ROWS_DROPPED",
                &[
                    ("count", dropped.to_string()),
                    ("table", table_name.to_string()),
                ],
            );
        }
    }

    fn display_path(&self) -> String {
        self.config.store_path().display().to_string()
    }
}

/// Chart form of a cell: numbers stay numbers, dates are already ISO
/// text after the resort, nulls become empty strings.
fn chart_value(cell: &Cell) -> Value {
    match cell {
        Cell::Null => Value::String(String::new()),
        Cell::Number(number) => {
            let value = Value::from(*number);
            if value.is_null() {
                // Non-finite numbers have no JSON form.
                Value::String(String::new())
            } else {
                value
            }
        }
        Cell::Text(text) => Value::String(text.clone()),
    }
}
