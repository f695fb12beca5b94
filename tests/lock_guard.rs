//! Lock guard tests.
//!
//! While the store file is exclusively held elsewhere, every mutating
//! operation must return a conflict and leave the file byte-for-byte
//! unchanged. The hold is injected through the guard's environment
//! hook; a real external hold cannot be arranged portably from a test.

use std::collections::HashMap;
use std::env;
use std::fs;

use fieldbook::config::StoreConfig;
use fieldbook::guard::FORCE_HOLD_ENV;
use fieldbook::store::{Store, StoreError};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn soil_submission(date: &str, moisture: &str) -> HashMap<String, String> {
    let mut raw = HashMap::new();
    raw.insert("table".to_string(), "Soil Test".to_string());
    raw.insert("Date".to_string(), date.to_string());
    raw.insert("Moisture".to_string(), moisture.to_string());
    raw.insert("Light".to_string(), "5".to_string());
    raw.insert("Ph".to_string(), "6.5".to_string());
    raw
}

// =============================================================================
// Conflict On Held Store
// =============================================================================

/// Submits and bulk edits against a held store return `Conflict` and
/// leave the file untouched; releasing the hold lets writes through
/// again.
///
/// A single test owns the hold variable: parallel tests in this binary
/// would race on it.
#[test]
fn test_held_store_conflicts_and_stays_unchanged() {
    let tmp = TempDir::new().unwrap();
    let config = StoreConfig::new(
        tmp.path().join("environmental_data.json"),
        tmp.path().join("backups"),
    );
    let mut store = Store::new(config).unwrap();

    store
        .submit_record(soil_submission("2024-01-05", "30"))
        .unwrap();
    let before = fs::read(store.path()).unwrap();
    let backups_before = fs::read_dir(tmp.path().join("backups")).unwrap().count();

    env::set_var(FORCE_HOLD_ENV, store.path());

    let err = store
        .submit_record(soil_submission("2024-01-06", "31"))
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict { .. }));

    let columns = vec![
        "Date".to_string(),
        "Moisture".to_string(),
        "Light".to_string(),
        "Ph".to_string(),
    ];
    let rows = vec![vec![
        "2024-02-01".to_string(),
        "40".to_string(),
        "6".to_string(),
        "6.8".to_string(),
    ]];
    let err = store.bulk_replace("Soil Test", &columns, &rows).unwrap_err();
    assert!(matches!(err, StoreError::Conflict { .. }));

    // Byte-for-byte unchanged, and the conflict aborted before the
    // backup step ran.
    assert_eq!(fs::read(store.path()).unwrap(), before);
    assert_eq!(
        fs::read_dir(tmp.path().join("backups")).unwrap().count(),
        backups_before
    );

    // Reads are not guarded; the hold only blocks mutation.
    assert_eq!(store.read_for_display("Soil Test").unwrap().rows.len(), 1);

    env::remove_var(FORCE_HOLD_ENV);

    store
        .submit_record(soil_submission("2024-01-06", "31"))
        .unwrap();
    assert_eq!(store.read_for_display("Soil Test").unwrap().rows.len(), 2);
}
