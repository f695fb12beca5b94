//! The store document: the serde data model of the store file.
//!
//! One `Book` holds the ordered list of named tables. Cells serialize
//! as plain JSON null / number / string; `Date` cells are ISO
//! `YYYY-MM-DD` strings re-coerced to `chrono::NaiveDate` whenever a
//! table is materialized. Column widths are cosmetic display hints and
//! carry no semantics.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::errors::{StoreError, StoreResult};
use crate::schema::{parse_date, SchemaRegistry, TableSchema, DATE_COLUMN};

/// Store document format version.
pub const FORMAT_VERSION: u32 = 1;

/// Narrowest cosmetic column width.
pub const MIN_COLUMN_WIDTH: usize = 12;

/// Cosmetic padding added to the widest content of a column.
pub const COLUMN_PADDING: usize = 2;

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// An empty cell.
    Null,
    /// A numeric measurement.
    Number(f64),
    /// Text, including the ISO form of `Date` cells.
    Text(String),
}

impl Cell {
    /// Whether the cell is empty.
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// The cell as a calendar date, if it parses as one.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Text(raw) => parse_date(raw),
            _ => None,
        }
    }

    /// Character length of the cell's display form, for column widths.
    pub fn display_len(&self) -> usize {
        match self {
            Cell::Null => 0,
            Cell::Number(number) => number.to_string().chars().count(),
            Cell::Text(text) => text.chars().count(),
        }
    }
}

/// A column header with its cosmetic display width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Header name.
    pub name: String,
    /// Display width, `max(content, header) + padding`, floored.
    pub width: usize,
}

impl Column {
    /// A fresh header-only column.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let width = header_width(&name);
        Self { name, width }
    }
}

/// One named table: ordered columns plus a row matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table name as addressed by callers.
    pub name: String,
    /// Ordered columns; the first is always `Date`.
    pub columns: Vec<Column>,
    /// Row matrix; every row has exactly one cell per column.
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// A headers-only table for `schema`.
    pub fn with_headers(schema: &TableSchema) -> Self {
        Self {
            name: schema.name.to_string(),
            columns: schema
                .columns
                .iter()
                .map(|column| Column::new(column.name))
                .collect(),
            rows: Vec::new(),
        }
    }

    /// Ordered column names.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

/// The whole store document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Document format version.
    pub format_version: u32,
    /// Tables in store order.
    pub tables: Vec<Table>,
}

impl Book {
    /// A fresh store document holding every registered table with
    /// headers only.
    pub fn empty() -> Self {
        Self {
            format_version: FORMAT_VERSION,
            tables: SchemaRegistry::tables()
                .iter()
                .map(Table::with_headers)
                .collect(),
        }
    }

    /// Parse and structurally validate the store file at `path`.
    ///
    /// # Errors
    ///
    /// [`StoreError::Io`] if the file cannot be read,
    /// [`StoreError::Malformed`] if it is not a valid store document.
    pub fn load(path: &Path) -> StoreResult<Self> {
        let bytes = fs::read(path)?;
        let book: Book = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Malformed(e.to_string()))?;
        book.check_structure()?;
        Ok(book)
    }

    /// Parse and validate a store document from an in-memory byte
    /// stream (an export, for instance).
    pub fn from_bytes(bytes: &[u8]) -> StoreResult<Self> {
        let book: Book =
            serde_json::from_slice(bytes).map_err(|e| StoreError::Malformed(e.to_string()))?;
        book.check_structure()?;
        Ok(book)
    }

    /// Serialize the document to the byte form used on disk and in
    /// exports.
    pub fn to_bytes(&self) -> StoreResult<Vec<u8>> {
        let mut bytes = serde_json::to_vec_pretty(self)
            .map_err(|e| StoreError::Malformed(e.to_string()))?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    /// Write the document to `path`, creating parent directories,
    /// then fsync.
    pub fn save(&self, path: &Path) -> StoreResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let bytes = self.to_bytes()?;
        let mut file = File::create(path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        Ok(())
    }

    /// Look up a table by name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Look up a table by name, mutably.
    pub fn table_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.name == name)
    }

    /// Replace the table with `table.name` wholesale, appending if the
    /// store somehow lacks it.
    pub fn replace_table(&mut self, table: Table) {
        match self.tables.iter_mut().find(|t| t.name == table.name) {
            Some(existing) => *existing = table,
            None => self.tables.push(table),
        }
    }

    /// Structural rules every store document must satisfy: every table
    /// keys on a leading `Date` column and every row matches its
    /// table's column count.
    fn check_structure(&self) -> StoreResult<()> {
        for table in &self.tables {
            let first = table.columns.first().ok_or_else(|| {
                StoreError::Malformed(format!("table '{}' has no columns", table.name))
            })?;
            if first.name != DATE_COLUMN {
                return Err(StoreError::Malformed(format!(
                    "table '{}' must key on a leading '{}' column",
                    table.name, DATE_COLUMN
                )));
            }
            for (index, row) in table.rows.iter().enumerate() {
                if row.len() != table.columns.len() {
                    return Err(StoreError::Malformed(format!(
                        "table '{}' row {} has {} cells, expected {}",
                        table.name,
                        index,
                        row.len(),
                        table.columns.len()
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Width of a headers-only column.
pub fn header_width(name: &str) -> usize {
    MIN_COLUMN_WIDTH.max(name.chars().count() + COLUMN_PADDING)
}
