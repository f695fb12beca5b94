//! Schema type definitions.
//!
//! Every table is an ordered list of typed columns. The first column of
//! every table is `Date` and serves as the table's unique key; all other
//! built-in columns hold numeric measurements. `Text` exists for
//! bulk-edited columns whose values resist numeric coercion.

use serde::{Deserialize, Serialize};

/// Name of the key column present in every table.
pub const DATE_COLUMN: &str = "Date";

/// Declared column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Calendar date, the table key. Time-of-day is discarded.
    Date,
    /// 64-bit floating point measurement.
    Number,
    /// Uncoerced text.
    Text,
}

impl ColumnType {
    /// Type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnType::Date => "date",
            ColumnType::Number => "number",
            ColumnType::Text => "text",
        }
    }
}

/// A single column declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    /// Column name as it appears in the table header.
    pub name: &'static str,
    /// Declared type.
    pub column_type: ColumnType,
}

impl ColumnDef {
    /// The `Date` key column.
    pub const fn date() -> Self {
        Self {
            name: DATE_COLUMN,
            column_type: ColumnType::Date,
        }
    }

    /// A numeric measurement column.
    pub const fn number(name: &'static str) -> Self {
        Self {
            name,
            column_type: ColumnType::Number,
        }
    }
}

/// A complete table schema: a name plus its ordered columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    /// Table name as addressed by callers.
    pub name: &'static str,
    /// Ordered column declarations; the first is always `Date`.
    pub columns: &'static [ColumnDef],
}

impl TableSchema {
    /// Ordered column names.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.to_string()).collect()
    }

    /// Whether `name` is one of this table's declared columns.
    pub fn declares(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }
}
