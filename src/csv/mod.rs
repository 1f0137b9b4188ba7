//! CSV import/export bridge
//!
//! Maps CSV text (comma separated, header row first) onto rows and the
//! column schema, and back.
//!
//! # Import
//!
//! ```text
//! header cell ──┬─ logical field (name/email/age/role/department/location)
//!               ├─ registered column (by id or label, case-insensitive)
//!               └─ extra field keyed by the literal header text
//! ```
//!
//! Import is all-or-nothing: a parse failure or an empty file leaves the
//! caller's rows untouched, since `parse_rows` only returns new rows.
//!
//! # Export
//!
//! Only visible columns are written, headed by their labels. Hidden
//! columns are dropped, so re-importing an export loses them.

mod export;
mod import;

pub use export::{export_csv, export_file_name, export_file_name_today};
pub use import::{ensure_csv_path, parse_rows, LOGICAL_FIELDS};
