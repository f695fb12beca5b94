//! Export and chart-shaping tests.
//!
//! Exports are standalone store documents: parsing the exported byte
//! stream must yield the same columns and rows the display path
//! returns at the same instant.

use std::collections::HashMap;

use fieldbook::config::StoreConfig;
use fieldbook::store::{Book, Store, StoreError};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn open_store(tmp: &TempDir) -> Store {
    let config = StoreConfig::new(
        tmp.path().join("environmental_data.json"),
        tmp.path().join("backups"),
    );
    Store::new(config).unwrap()
}

fn submit_soil(store: &mut Store, date: &str, moisture: &str) {
    let mut raw = HashMap::new();
    raw.insert("table".to_string(), "Soil Test".to_string());
    raw.insert("Date".to_string(), date.to_string());
    raw.insert("Moisture".to_string(), moisture.to_string());
    raw.insert("Light".to_string(), "5".to_string());
    raw.insert("Ph".to_string(), "6.5".to_string());
    store.submit_record(raw).unwrap();
}

// =============================================================================
// Round-Trip
// =============================================================================

/// Parsing an exported table yields the displayed columns and rows.
#[test]
fn test_export_table_round_trip_matches_display() {
    let tmp = TempDir::new().unwrap();
    let mut store = open_store(&tmp);
    submit_soil(&mut store, "2024-01-05", "30");
    submit_soil(&mut store, "2024-01-02", "28");

    let view = store.read_for_display("Soil Test").unwrap();
    let export = store.export_table("Soil Test").unwrap();

    let parsed = Book::from_bytes(&export.bytes).unwrap();
    assert_eq!(parsed.tables.len(), 1);

    let table = &parsed.tables[0];
    assert_eq!(table.name, "Soil Test");
    assert_eq!(table.column_names(), view.columns);
    assert_eq!(table.rows, view.rows);
}

/// The full export carries all three tables under the expected name.
#[test]
fn test_export_all_round_trip() {
    let tmp = TempDir::new().unwrap();
    let mut store = open_store(&tmp);
    submit_soil(&mut store, "2024-01-05", "30");

    let export = store.export_all().unwrap();
    assert_eq!(export.filename, "environmental_data_full.json");

    let parsed = Book::from_bytes(&export.bytes).unwrap();
    let names: Vec<_> = parsed.tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Water Test", "Soil Test", "Air Test"]);
    assert_eq!(parsed.table("Soil Test").unwrap().rows.len(), 1);
}

/// Single-table export filenames swap spaces for underscores.
#[test]
fn test_export_filename_shape() {
    let tmp = TempDir::new().unwrap();
    let mut store = open_store(&tmp);
    submit_soil(&mut store, "2024-01-05", "30");

    let export = store.export_table("Water Test").unwrap();
    assert_eq!(export.filename, "Water_Test.json");
}

/// Exports are built in memory and leave the store file untouched.
#[test]
fn test_export_does_not_touch_store_file() {
    let tmp = TempDir::new().unwrap();
    let mut store = open_store(&tmp);
    submit_soil(&mut store, "2024-01-05", "30");

    let before = std::fs::read(store.path()).unwrap();
    store.export_table("Soil Test").unwrap();
    store.export_all().unwrap();
    assert_eq!(std::fs::read(store.path()).unwrap(), before);
}

/// Exporting an unknown table fails without touching disk.
#[test]
fn test_export_unknown_table() {
    let tmp = TempDir::new().unwrap();
    let mut store = open_store(&tmp);
    submit_soil(&mut store, "2024-01-05", "30");

    let err = store.export_table("Fire Test").unwrap_err();
    assert!(matches!(err, StoreError::Schema(_)));
}

// =============================================================================
// Chart Shaping
// =============================================================================

/// Chart rows key cells by column name, normalize dates to ISO and
/// nulls to empty strings, and come back date-sorted.
#[test]
fn test_chart_rows_are_normalized_and_sorted() {
    let tmp = TempDir::new().unwrap();
    let mut store = open_store(&tmp);

    submit_soil(&mut store, "2024-03-01", "30");
    let mut raw = HashMap::new();
    raw.insert("table".to_string(), "Soil Test".to_string());
    raw.insert("Date".to_string(), "2024/01/05".to_string());
    raw.insert("Moisture".to_string(), String::new());
    store.submit_record(raw).unwrap();

    let rows = store.chart_data("Soil Test").unwrap();
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0]["Date"], "2024-01-05");
    assert_eq!(rows[1]["Date"], "2024-03-01");

    // Empty submission and never-submitted fields both chart as "".
    assert_eq!(rows[0]["Moisture"], "");
    assert_eq!(rows[0]["Light"], "");
    // Numbers stay numbers.
    assert_eq!(rows[1]["Moisture"], 30.0);
}
