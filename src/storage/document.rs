//! Budget document persistence
//!
//! The store talks to durable storage through [`DocumentStorage`]: load the
//! whole document, save the whole document. The JSON file backend is what the
//! app uses; the in-memory backend serves tests and embedders that persist
//! elsewhere.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{RunoraError, RunoraResult};
use crate::models::BudgetDocument;

use super::file_io::{read_json, write_json_atomic};

/// Whole-document load/save
pub trait DocumentStorage {
    /// Load the persisted document, `None` if nothing has been written yet
    fn load(&self) -> RunoraResult<Option<BudgetDocument>>;

    /// Overwrite the persisted document
    fn save(&mut self, doc: &BudgetDocument) -> RunoraResult<()>;

    /// Remove the persisted document
    fn clear(&mut self) -> RunoraResult<()>;

    /// Move an unreadable document out of the way so a fresh one can be
    /// written without destroying it
    ///
    /// Returns where the old copy now lives, if the backend has a location.
    fn set_aside(&mut self, at: DateTime<Utc>) -> RunoraResult<Option<PathBuf>>;
}

/// Document stored as a single JSON file
#[derive(Debug, Clone)]
pub struct JsonDocumentStorage {
    path: PathBuf,
}

impl JsonDocumentStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStorage for JsonDocumentStorage {
    fn load(&self) -> RunoraResult<Option<BudgetDocument>> {
        read_json(&self.path)
    }

    fn save(&mut self, doc: &BudgetDocument) -> RunoraResult<()> {
        write_json_atomic(&self.path, doc)
    }

    fn clear(&mut self) -> RunoraResult<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).map_err(|e| {
                RunoraError::Storage(format!("Failed to remove {}: {}", self.path.display(), e))
            })?;
        }
        Ok(())
    }

    /// `budget.json` -> `budget.json.corrupt-20250315T120000Z`
    fn set_aside(&mut self, at: DateTime<Utc>) -> RunoraResult<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let mut name: OsString = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("document"));
        name.push(format!(".corrupt-{}", at.format("%Y%m%dT%H%M%SZ")));
        let target = self.path.with_file_name(name);

        std::fs::rename(&self.path, &target).map_err(|e| {
            RunoraError::Storage(format!(
                "Failed to move {} aside: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(Some(target))
    }
}

/// Document kept in memory; can be told to fail writes
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStorage {
    doc: Option<BudgetDocument>,
    set_aside: Option<BudgetDocument>,
    fail_reads: bool,
    fail_writes: bool,
    saves: usize,
}

impl MemoryDocumentStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already-persisted document
    pub fn with_document(doc: BudgetDocument) -> Self {
        Self {
            doc: Some(doc),
            ..Self::default()
        }
    }

    /// Make every subsequent save fail
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Make loads fail as if the stored document were unreadable
    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// The document most recently moved aside as unreadable
    pub fn set_aside_document(&self) -> Option<&BudgetDocument> {
        self.set_aside.as_ref()
    }

    /// The last successfully saved document
    pub fn document(&self) -> Option<&BudgetDocument> {
        self.doc.as_ref()
    }

    /// Replace the stored document behind the store's back
    pub fn replace_document(&mut self, doc: BudgetDocument) {
        self.doc = Some(doc);
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl DocumentStorage for MemoryDocumentStorage {
    fn load(&self) -> RunoraResult<Option<BudgetDocument>> {
        if self.fail_reads {
            return Err(RunoraError::Storage("simulated read failure".into()));
        }
        Ok(self.doc.clone())
    }

    fn save(&mut self, doc: &BudgetDocument) -> RunoraResult<()> {
        if self.fail_writes {
            return Err(RunoraError::Storage("simulated write failure".into()));
        }
        self.doc = Some(doc.clone());
        self.saves += 1;
        Ok(())
    }

    fn clear(&mut self) -> RunoraResult<()> {
        self.doc = None;
        self.fail_reads = false;
        Ok(())
    }

    fn set_aside(&mut self, _at: DateTime<Utc>) -> RunoraResult<Option<PathBuf>> {
        if self.fail_writes {
            return Err(RunoraError::Storage("simulated write failure".into()));
        }
        self.set_aside = self.doc.take();
        self.fail_reads = false;
        Ok(None)
    }
}
