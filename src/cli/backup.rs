//! Export, import and reset commands

use std::path::{Path, PathBuf};

use crate::config::paths::RunoraPaths;
use crate::error::{RunoraError, RunoraResult};
use crate::storage::DocumentStorage;
use crate::store::Store;

/// Export the document, to `dir` or the configured export directory
pub fn handle_export_command<S: DocumentStorage>(
    store: &Store<S>,
    paths: &RunoraPaths,
    dir: Option<PathBuf>,
) -> RunoraResult<()> {
    let dir = dir.unwrap_or_else(|| store.settings().resolve_export_dir(paths));
    let path = store.export_data(&dir)?;
    println!("Data exported to {}", path.display());
    Ok(())
}

/// Import a previously exported (or hand-written) document
pub fn handle_import_command<S: DocumentStorage>(
    store: &mut Store<S>,
    file: &Path,
) -> RunoraResult<()> {
    let summary = store.import_data(file)?;

    if summary.fields.is_empty() {
        println!("Nothing to import from {}", file.display());
        return Ok(());
    }

    println!("Imported {}", summary.fields.join(", "));
    println!(
        "  {} budget(s), {} expense(s), {} tag(s)",
        summary.budgets, summary.expenses, summary.tags
    );
    if summary.dangling_tags_removed > 0 {
        println!(
            "  Dropped {} reference(s) to unknown tags",
            summary.dangling_tags_removed
        );
    }
    println!(
        "Remaining balance: {}",
        store
            .remaining_balance()
            .format_with_symbol(&store.document().symbol)
    );
    Ok(())
}

/// Delete all budgets, expenses and custom tags
pub fn handle_reset_command<S: DocumentStorage>(
    store: &mut Store<S>,
    confirmed: bool,
) -> RunoraResult<()> {
    if !confirmed {
        return Err(RunoraError::Validation(
            "Reset deletes all data; pass --yes to confirm".into(),
        ));
    }
    store.reset();
    println!("All data has been reset.");
    Ok(())
}
