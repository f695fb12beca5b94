//! Record validator.
//!
//! Converts an untyped submitted field map into a [`TypedRecord`]:
//! the table selector is extracted and resolved against the registry,
//! the `Date` field is parsed with a permissive date parser, and every
//! other field becomes either null (empty string) or a number. A field
//! that fails numeric conversion, or that the table's schema does not
//! declare, rejects the whole record naming that field. Validation
//! never touches the store file.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::errors::{SchemaError, SchemaResult};
use super::registry::SchemaRegistry;
use super::types::DATE_COLUMN;

/// Key carrying the table selector inside a submitted field map.
pub const TABLE_SELECTOR: &str = "table";

/// Date-only formats accepted by [`parse_date`].
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Datetime formats accepted by [`parse_date`]; time-of-day is discarded.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// A validated, typed field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    /// A parsed numeric measurement.
    Number(f64),
    /// An explicitly empty submission.
    Null,
}

/// A validated record, ready for upsert into its table.
///
/// Fields absent from the submission are simply absent here; the upsert
/// merge fills missing headers with null.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedRecord {
    table: String,
    date: NaiveDate,
    values: HashMap<String, FieldValue>,
}

impl TypedRecord {
    /// The table this record targets.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The calendar date the record is keyed on.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The typed value submitted for `column`, if any.
    pub fn value(&self, column: &str) -> Option<FieldValue> {
        self.values.get(column).copied()
    }
}

/// Validator turning raw submissions into [`TypedRecord`]s.
pub struct RecordValidator;

impl RecordValidator {
    /// Validate a raw field map.
    ///
    /// The map must carry the table selector under [`TABLE_SELECTOR`]
    /// and a `Date` field; both are removed from the field set during
    /// validation.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::UnknownTable`] if the selector is missing or
    ///   names no registered table
    /// - [`SchemaError::InvalidDate`] if `Date` is missing or fails
    ///   every accepted format
    /// - [`SchemaError::InvalidField`] for a non-numeric, non-empty
    ///   value or an undeclared field, naming the field
    pub fn validate(mut raw: HashMap<String, String>) -> SchemaResult<TypedRecord> {
        let table = raw.remove(TABLE_SELECTOR).unwrap_or_default();
        let schema = SchemaRegistry::table(&table)?;

        let date_raw = raw
            .remove(DATE_COLUMN)
            .ok_or(SchemaError::InvalidDate(None))?;
        let date =
            parse_date(&date_raw).ok_or_else(|| SchemaError::InvalidDate(Some(date_raw)))?;

        let mut values = HashMap::with_capacity(raw.len());
        for (field, value) in raw {
            if !schema.declares(&field) {
                return Err(SchemaError::InvalidField { field });
            }
            let typed = if value.is_empty() {
                FieldValue::Null
            } else {
                match value.trim().parse::<f64>() {
                    Ok(number) => FieldValue::Number(number),
                    Err(_) => return Err(SchemaError::InvalidField { field }),
                }
            };
            values.insert(field, typed);
        }

        Ok(TypedRecord {
            table: schema.name.to_string(),
            date,
            values,
        })
    }
}

/// Permissive calendar-date parser.
///
/// Accepts the common date and datetime layouts submitted by forms and
/// editors; any time-of-day component is discarded. Returns `None` when
/// no accepted layout matches.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime.date());
        }
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.date_naive());
    }
    None
}
