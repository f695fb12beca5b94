//! The built-in table schemas.
//!
//! Table names are fixed and known in advance; addressing any other
//! name is an error. The registry is the single source of truth for
//! column sets: store initialization, record validation, and bulk-edit
//! column checks all consult it.

use super::errors::{SchemaError, SchemaResult};
use super::types::{ColumnDef, TableSchema};

const WATER_TEST_COLUMNS: &[ColumnDef] = &[
    ColumnDef::date(),
    ColumnDef::number("Fertile"),
    ColumnDef::number("PH"),
    ColumnDef::number("H2 - Ppb"),
    ColumnDef::number("ORP -Mv"),
    ColumnDef::number("Res"),
    ColumnDef::number("us/cm"),
    ColumnDef::number("TDS -ppm"),
    ColumnDef::number("Salt %"),
    ColumnDef::number("Salt sg"),
];

const SOIL_TEST_COLUMNS: &[ColumnDef] = &[
    ColumnDef::date(),
    ColumnDef::number("Moisture"),
    ColumnDef::number("Light"),
    ColumnDef::number("Ph"),
];

const AIR_TEST_COLUMNS: &[ColumnDef] = &[
    ColumnDef::date(),
    ColumnDef::number("Temperature"),
    ColumnDef::number("Humidity"),
    ColumnDef::number("Air pollution level"),
    ColumnDef::number("PM2.5 (AQI)"),
    ColumnDef::number("HCHO"),
    ColumnDef::number("TVOC"),
];

const TABLES: &[TableSchema] = &[
    TableSchema {
        name: "Water Test",
        columns: WATER_TEST_COLUMNS,
    },
    TableSchema {
        name: "Soil Test",
        columns: SOIL_TEST_COLUMNS,
    },
    TableSchema {
        name: "Air Test",
        columns: AIR_TEST_COLUMNS,
    },
];

/// Registry of the built-in table schemas.
pub struct SchemaRegistry;

impl SchemaRegistry {
    /// All table schemas, in store order.
    pub fn tables() -> &'static [TableSchema] {
        TABLES
    }

    /// Look up a table schema by name.
    pub fn table(name: &str) -> SchemaResult<&'static TableSchema> {
        TABLES
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| SchemaError::UnknownTable(name.to_string()))
    }

    /// Ordered `(name, type)` column list for a table.
    pub fn columns_for(name: &str) -> SchemaResult<&'static [ColumnDef]> {
        Ok(Self::table(name)?.columns)
    }

    /// Whether `name` is a registered table.
    pub fn contains(name: &str) -> bool {
        TABLES.iter().any(|t| t.name == name)
    }
}
