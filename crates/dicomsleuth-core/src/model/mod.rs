/// Data model for DicomSleuth.
///
/// Re-exports the tag schema, the per-file record, and display helpers.
pub mod format;
pub mod record;
pub mod schema;

pub use record::{TagRecord, TagValue};
pub use schema::{FieldKind, FieldSpec, SchemaField, TagSchema, DEFAULT_SENTINEL};
