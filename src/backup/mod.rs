//! Export and import of the whole budget document
//!
//! # Export format
//!
//! An export is the persisted document itself, pretty-printed, in a file named
//! `runora_budget_backup_<timestamp>.json`. Any export can be imported back.
//!
//! # Import rules
//!
//! - `budgets` and `expenses` must be objects keyed by `YYYY-MM`
//! - every `tags` entry needs a string `id` and `name`
//! - imported expenses must have a positive amount and sit in the bucket their
//!   date names
//! - a present field of the wrong type rejects the file
//! - unknown keys are ignored
//!
//! Nothing is merged unless the whole file passes.

mod export;
mod import;

pub use export::{export_document, export_file_name, EXPORT_FILE_PREFIX};
pub use import::{DocumentImport, ImportSummary};
