//! Schema registry and record validation.
//!
//! The registry fixes the three built-in tables and their ordered,
//! typed column lists. The validator converts untyped submissions into
//! typed records against those schemas, before anything touches the
//! store file.

mod errors;
mod registry;
mod types;
mod validator;

pub use errors::{SchemaError, SchemaResult};
pub use registry::SchemaRegistry;
pub use types::{ColumnDef, ColumnType, TableSchema, DATE_COLUMN};
pub use validator::{parse_date, FieldValue, RecordValidator, TypedRecord, TABLE_SELECTOR};
