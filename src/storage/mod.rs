//! Storage layer for Runora
//!
//! One JSON document, written atomically, with a storage trait at the seam so
//! the store can run against memory in tests.

pub mod document;
pub mod file_io;

pub use document::{DocumentStorage, JsonDocumentStorage, MemoryDocumentStorage};
pub use file_io::{read_json, read_json_value, write_json_atomic};

use crate::config::paths::RunoraPaths;
use crate::error::RunoraError;

/// Open the JSON document storage at the configured location
pub fn open_json_storage(paths: &RunoraPaths) -> Result<JsonDocumentStorage, RunoraError> {
    paths.ensure_directories()?;
    Ok(JsonDocumentStorage::new(paths.document_file()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = RunoraPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = open_json_storage(&paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert_eq!(storage.path(), paths.document_file());
        assert!(!paths.is_initialized());
    }
}
