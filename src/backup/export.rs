//! Whole-document export
//!
//! Writes the document, pretty-printed, to a timestamped file so repeated
//! exports never overwrite each other.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{RunoraError, RunoraResult};
use crate::models::BudgetDocument;
use crate::storage::write_json_atomic;

/// Prefix of every export file name
pub const EXPORT_FILE_PREFIX: &str = "runora_budget_backup_";

/// File name for an export taken at `at`
///
/// The timestamp is ISO-8601 with `:` and `.` replaced by `-`, e.g.
/// `runora_budget_backup_2025-03-15T12-00-00-000Z.json`.
pub fn export_file_name(at: DateTime<Utc>) -> String {
    let stamp = at
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
        .replace([':', '.'], "-");
    format!("{}{}.json", EXPORT_FILE_PREFIX, stamp)
}

/// Export the document into `dir`, returning the path written
pub fn export_document(
    doc: &BudgetDocument,
    dir: &Path,
    at: DateTime<Utc>,
) -> RunoraResult<PathBuf> {
    let path = dir.join(export_file_name(at));
    write_json_atomic(&path, doc).map_err(|e| RunoraError::Export(e.to_string()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, MonthKey};
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_export_file_name() {
        let at = Utc.with_ymd_and_hms(2025, 3, 15, 9, 5, 7).unwrap();
        assert_eq!(
            export_file_name(at),
            "runora_budget_backup_2025-03-15T09-05-07-000Z.json"
        );
    }

    #[test]
    fn test_export_writes_document() {
        let temp_dir = TempDir::new().unwrap();
        let mut doc = BudgetDocument::seeded();
        doc.budgets
            .insert(MonthKey::parse("2025-03").unwrap(), Money::from_units(300));

        let at = Utc.with_ymd_and_hms(2025, 3, 15, 9, 5, 7).unwrap();
        let path = export_document(&doc, &temp_dir.path().join("out"), at).unwrap();

        assert!(path.starts_with(temp_dir.path().join("out")));
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\n  \"budgets\""));
        let back: BudgetDocument = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, doc);
    }
}
