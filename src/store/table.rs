//! Table engine: upsert, resort, and bulk-replacement construction.
//!
//! All operations here work on an in-memory [`Table`]; the facade owns
//! loading and saving the surrounding store document.

use chrono::NaiveDate;

use super::book::{Cell, Column, Table, COLUMN_PADDING, MIN_COLUMN_WIDTH};
use super::errors::{StoreError, StoreResult};
use crate::schema::{FieldValue, TypedRecord, DATE_COLUMN};

impl Table {
    /// Insert-or-replace `record`, keyed by its calendar date.
    ///
    /// The first existing row with an equal date (in file order) is
    /// removed, then the record is appended with one cell per header:
    /// the date as ISO text, submitted numbers as numbers, everything
    /// else null. Callers resort afterwards.
    pub fn upsert(&mut self, record: &TypedRecord) {
        let date = record.date();
        if let Some(position) = self
            .rows
            .iter()
            .position(|row| row.first().and_then(Cell::as_date) == Some(date))
        {
            self.rows.remove(position);
        }

        let row = self
            .columns
            .iter()
            .map(|column| {
                if column.name == DATE_COLUMN {
                    Cell::Text(iso_date(date))
                } else {
                    match record.value(&column.name) {
                        Some(FieldValue::Number(number)) => Cell::Number(number),
                        Some(FieldValue::Null) | None => Cell::Null,
                    }
                }
            })
            .collect();
        self.rows.push(row);
    }

    /// Re-materialize the table in ascending date order.
    ///
    /// The `Date` column is coerced to calendar dates; rows whose date
    /// fails to parse are dropped. Dates are rewritten in ISO form and
    /// column widths are recomputed. Returns the number of dropped
    /// rows so the caller can surface the loss.
    pub fn resort(&mut self) -> usize {
        let before = self.rows.len();

        let mut dated: Vec<(NaiveDate, Vec<Cell>)> = Vec::with_capacity(before);
        for mut row in self.rows.drain(..) {
            if let Some(date) = row.first().and_then(Cell::as_date) {
                row[0] = Cell::Text(iso_date(date));
                dated.push((date, row));
            }
        }
        // Stable sort keeps file order among equal dates.
        dated.sort_by_key(|(date, _)| *date);

        self.rows = dated.into_iter().map(|(_, row)| row).collect();
        self.recompute_widths();

        before - self.rows.len()
    }

    /// Build a full replacement table from a bulk-edit payload.
    ///
    /// Numeric coercion is per-column and all-or-nothing: a non-Date
    /// column becomes numeric only when every non-empty value parses
    /// as a number, otherwise the whole column stays text. Empty
    /// strings become null in every column. The `Date` column is kept
    /// as text; the subsequent resort coerces and orders it.
    pub fn from_edit(
        name: &str,
        columns: &[String],
        rows: &[Vec<String>],
    ) -> StoreResult<Self> {
        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(StoreError::Malformed(format!(
                    "edit payload row {} has {} cells, expected {}",
                    index,
                    row.len(),
                    columns.len()
                )));
            }
        }

        let numeric: Vec<bool> = columns
            .iter()
            .enumerate()
            .map(|(index, column)| {
                column != DATE_COLUMN
                    && rows.iter().all(|row| {
                        let value = row[index].trim();
                        value.is_empty() || value.parse::<f64>().is_ok()
                    })
            })
            .collect();

        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(index, value)| {
                        let trimmed = value.trim();
                        if trimmed.is_empty() {
                            Cell::Null
                        } else if numeric[index] {
                            // Parse cannot fail here; the column scan
                            // above proved every non-empty value.
                            Cell::Number(trimmed.parse().unwrap_or(f64::NAN))
                        } else {
                            Cell::Text(value.clone())
                        }
                    })
                    .collect()
            })
            .collect();

        let mut table = Table {
            name: name.to_string(),
            columns: columns.iter().map(Column::new).collect(),
            rows,
        };
        table.recompute_widths();
        Ok(table)
    }

    /// Recompute every column's cosmetic display width:
    /// `max(widest cell, header) + padding`, floored.
    pub fn recompute_widths(&mut self) {
        for (index, column) in self.columns.iter_mut().enumerate() {
            let content = self
                .rows
                .iter()
                .map(|row| row[index].display_len())
                .max()
                .unwrap_or(0);
            let widest = content.max(column.name.chars().count());
            column.width = MIN_COLUMN_WIDTH.max(widest + COLUMN_PADDING);
        }
    }
}

/// ISO `YYYY-MM-DD` form of a date.
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
