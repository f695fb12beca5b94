//! Export construction.
//!
//! Exports are standalone store documents built in memory, independent
//! of the on-disk file, serialized to the same byte form: one table for
//! a single-table export, every table for the full export. The
//! suggested filename mirrors the store file's extension.

use std::path::Path;

use super::book::{Book, FORMAT_VERSION};
use super::errors::{StoreError, StoreResult};

/// A downloadable byte stream plus its suggested filename.
#[derive(Debug, Clone, PartialEq)]
pub struct Export {
    /// The serialized standalone store document.
    pub bytes: Vec<u8>,
    /// Suggested download filename.
    pub filename: String,
}

/// Build a standalone export of one table.
pub fn export_table(book: &Book, table_name: &str, store_path: &Path) -> StoreResult<Export> {
    let table = book.table(table_name).ok_or_else(|| {
        StoreError::Malformed(format!("table '{}' missing from store document", table_name))
    })?;
    let standalone = Book {
        format_version: FORMAT_VERSION,
        tables: vec![table.clone()],
    };
    Ok(Export {
        bytes: standalone.to_bytes()?,
        filename: format!(
            "{}.{}",
            table_name.replace(' ', "_"),
            file_extension(store_path)
        ),
    })
}

/// Build a standalone export of every table.
pub fn export_all(book: &Book, store_path: &Path) -> StoreResult<Export> {
    Ok(Export {
        bytes: book.to_bytes()?,
        filename: format!(
            "{}_full.{}",
            store_basename(store_path),
            file_extension(store_path)
        ),
    })
}

fn file_extension(store_path: &Path) -> String {
    store_path
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_else(|| "json".to_string())
}

fn store_basename(store_path: &Path) -> String {
    store_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "store".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RecordValidator;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn populated_book() -> Book {
        let mut book = Book::empty();
        let mut raw = HashMap::new();
        raw.insert("table".to_string(), "Soil Test".to_string());
        raw.insert("Date".to_string(), "2024-01-05".to_string());
        raw.insert("Moisture".to_string(), "30".to_string());
        let record = RecordValidator::validate(raw).unwrap();
        let table = book.table_mut("Soil Test").unwrap();
        table.upsert(&record);
        table.resort();
        book
    }

    #[test]
    fn test_export_table_is_standalone_document() {
        let book = populated_book();
        let export =
            export_table(&book, "Soil Test", &PathBuf::from("environmental_data.json")).unwrap();

        assert_eq!(export.filename, "Soil_Test.json");

        let parsed = Book::from_bytes(&export.bytes).unwrap();
        assert_eq!(parsed.tables.len(), 1);
        assert_eq!(parsed.tables[0], *book.table("Soil Test").unwrap());
    }

    #[test]
    fn test_export_all_carries_every_table() {
        let book = populated_book();
        let export = export_all(&book, &PathBuf::from("environmental_data.json")).unwrap();

        assert_eq!(export.filename, "environmental_data_full.json");

        let parsed = Book::from_bytes(&export.bytes).unwrap();
        assert_eq!(parsed, book);
    }

    #[test]
    fn test_export_missing_table_fails() {
        let mut book = Book::empty();
        book.tables.retain(|t| t.name != "Air Test");

        let err =
            export_table(&book, "Air Test", &PathBuf::from("data.json")).unwrap_err();
        assert!(matches!(err, StoreError::Malformed(_)));
    }
}
