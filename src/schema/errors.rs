//! Schema and validation errors.

use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised by the schema registry and the record validator.
///
/// Validation errors always name the offending field, so the caller can
/// correct the input and resubmit. None of these are retryable as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The requested table is not in the registry.
    #[error("unknown table: '{0}'")]
    UnknownTable(String),

    /// The record's `Date` field is missing or unparseable.
    #[error("invalid or missing date: {0:?}")]
    InvalidDate(Option<String>),

    /// A non-Date field failed numeric conversion or is not declared by
    /// the table's schema.
    #[error("invalid input for '{field}': must be a number declared by the table")]
    InvalidField {
        /// The offending field name.
        field: String,
    },

    /// A bulk-edit payload's column list does not match the table's
    /// schema.
    #[error("column set does not match table '{table}': expected {expected:?}")]
    ColumnMismatch {
        /// The table being edited.
        table: String,
        /// The column names the schema requires, in order.
        expected: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_field_names_the_field() {
        let err = SchemaError::InvalidField {
            field: "Moisture".to_string(),
        };
        assert!(err.to_string().contains("Moisture"));
    }

    #[test]
    fn test_invalid_date_carries_raw_value() {
        let err = SchemaError::InvalidDate(Some("not-a-date".to_string()));
        assert!(err.to_string().contains("not-a-date"));
    }

    #[test]
    fn test_unknown_table_message() {
        let err = SchemaError::UnknownTable("Mystery".to_string());
        assert_eq!(err.to_string(), "unknown table: 'Mystery'");
    }
}
