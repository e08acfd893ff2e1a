//! Foreground/background hooks
//!
//! Coming to the foreground reloads from storage (the persisted copy wins over
//! memory) and applies any pending rollover. Going to the background flushes
//! the document unless it was written very recently.

use tracing::{debug, info};

use crate::services::RolloverPlan;
use crate::storage::DocumentStorage;

use super::Store;

impl<S: DocumentStorage> Store<S> {
    /// Reload from storage and run the rollover check
    pub fn on_foreground(&mut self) -> Option<RolloverPlan> {
        debug!("Store entering foreground");
        self.reload();
        self.check_and_update_budget()
    }

    /// Persist unless a write happened within the throttle window
    ///
    /// Returns whether a write was attempted.
    pub fn on_background(&mut self) -> bool {
        let throttle = self.settings.persist_throttle();
        if let Some(last) = self.last_persist {
            if last.elapsed() < throttle {
                debug!(?throttle, "Skipping background persist, written recently");
                return false;
            }
        }
        info!("Persisting budget document on background");
        self.persist();
        true
    }

    /// Replace memory with the persisted document
    pub fn reload(&mut self) {
        self.load_initial_data();
    }
}
