//! The budget store
//!
//! [`Store`] owns the in-memory [`BudgetDocument`] and is the only writer of
//! it. Every mutation validates its input, updates memory, recomputes the
//! remaining balance, and overwrites the persisted document.
//!
//! Failure policy:
//! - a rejected mutation is logged and returned as an error; the document is
//!   left exactly as it was;
//! - a failed persist is logged and swallowed; memory keeps the mutation and
//!   the next successful persist writes it out;
//! - an unreadable persisted document is moved aside before anything new is
//!   written; if it cannot be moved, persisting is refused for the session.
//!
//! The store is single-writer: it is owned by the composition root and
//! mutated through `&mut self`, so no locking is needed.

mod expenses;
mod lifecycle;
mod tags;

pub use tags::TagDeletion;

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::backup::{export_document, DocumentImport, ImportSummary};
use crate::config::settings::Settings;
use crate::error::{RunoraError, RunoraResult};
use crate::models::{BudgetDocument, Money, MonthKey};
use crate::services::{self, RolloverPlan};
use crate::storage::DocumentStorage;

/// Source of the current time
pub type Clock = Box<dyn Fn() -> DateTime<Utc>>;

/// Owner of the budget document
pub struct Store<S: DocumentStorage> {
    doc: BudgetDocument,
    storage: S,
    settings: Settings,
    clock: Clock,
    persist_blocked: bool,
    last_persist: Option<Instant>,
}

impl<S: DocumentStorage> Store<S> {
    /// Open the store: load (or create) the document and apply any pending
    /// monthly rollover
    pub fn open(storage: S, settings: Settings) -> Self {
        Self::open_with_clock(storage, settings, Box::new(Utc::now))
    }

    /// Open the store with a custom clock
    pub fn open_with_clock(storage: S, settings: Settings, clock: Clock) -> Self {
        let mut store = Self {
            doc: BudgetDocument::seeded(),
            storage,
            settings,
            clock,
            persist_blocked: false,
            last_persist: None,
        };
        store.load_initial_data();
        store.check_and_update_budget();
        store
    }

    /// The current document
    pub fn document(&self) -> &BudgetDocument {
        &self.doc
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// True when an unreadable document could not be moved aside, so
    /// nothing will be written this session
    pub fn is_persist_blocked(&self) -> bool {
        self.persist_blocked
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// The current calendar month (UTC)
    pub fn current_month(&self) -> MonthKey {
        MonthKey::from_datetime(self.now())
    }

    // === Storage boundary ===

    /// Replace memory with the persisted document, creating one if none exists
    ///
    /// A read failure is logged and leaves memory as it was. The unreadable
    /// copy is moved aside first so the next write cannot destroy it.
    fn load_initial_data(&mut self) {
        let mut needs_persist = false;

        match self.storage.load() {
            Ok(Some(doc)) => {
                debug!(
                    months = doc.budgets.len(),
                    tags = doc.tags.len(),
                    "Loaded budget document"
                );
                self.doc = doc;
            }
            Ok(None) => {
                info!("No budget document found, creating a new one");
                self.doc = BudgetDocument::seeded();
                needs_persist = true;
            }
            Err(e) => {
                error!(error = %e, "Failed to load budget document");
                let now = self.now();
                match self.storage.set_aside(now) {
                    Ok(moved) => {
                        warn!(
                            moved_to = ?moved.map(|p| p.display().to_string()),
                            "Moved unreadable budget document aside"
                        );
                        needs_persist = true;
                    }
                    Err(e) => {
                        error!(
                            error = %e,
                            "Could not move unreadable budget document aside, changes will not be saved"
                        );
                        self.persist_blocked = true;
                    }
                }
            }
        }

        if self.doc.seed_default_tags() {
            info!("Seeded default tags");
            needs_persist = true;
        }

        self.recompute();

        if needs_persist {
            self.persist();
        }
    }

    /// Write the whole document; failures are logged and swallowed
    ///
    /// Returns whether the write succeeded.
    fn persist(&mut self) -> bool {
        if self.persist_blocked {
            warn!("Not persisting: the stored budget document could not be read");
            return false;
        }
        match self.storage.save(&self.doc) {
            Ok(()) => {
                self.last_persist = Some(Instant::now());
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to persist budget document");
                false
            }
        }
    }

    /// Recompute the derived balance and store it on the document
    fn recompute(&mut self) -> Money {
        let balance = services::calculate_remaining_balance(&self.doc, self.current_month());
        self.doc.remaining_balance = balance;
        balance
    }

    /// Recompute and persist after a mutation, returning the new balance
    fn commit(&mut self) -> Money {
        let balance = self.recompute();
        self.persist();
        balance
    }

    /// Log a rejected mutation and hand the error back
    fn reject<T>(&self, err: RunoraError) -> RunoraResult<T> {
        warn!(error = %err, "Rejected store mutation");
        Err(err)
    }

    // === Budgets ===

    /// Set the budget for a month; the amount must be positive
    ///
    /// Returns the recomputed remaining balance.
    pub fn add_budget(&mut self, month: MonthKey, amount: Money) -> RunoraResult<Money> {
        if !amount.is_positive() {
            return self.reject(RunoraError::Validation(format!(
                "Budget must be a positive number (got {} for {})",
                amount, month
            )));
        }

        self.doc.budgets.insert(month, amount);
        debug!(%month, %amount, "Budget set");
        Ok(self.commit())
    }

    /// Overwrite the budget for a month; same rules as [`Store::add_budget`]
    pub fn update_budget(&mut self, month: MonthKey, amount: Money) -> RunoraResult<Money> {
        self.add_budget(month, amount)
    }

    /// Delete a month's explicit budget; the month falls back to the recurring
    /// budget
    pub fn remove_budget(&mut self, month: MonthKey) -> Money {
        if self.doc.budgets.remove(&month).is_some() {
            debug!(%month, "Budget removed");
        }
        self.commit()
    }

    /// The explicit budget for a month, if one is set
    pub fn get_budget(&self, month: MonthKey) -> Option<Money> {
        self.doc.budgets.get(&month).copied()
    }

    /// The budget that applies to a month (explicit, else recurring)
    pub fn effective_budget(&self, month: MonthKey) -> Money {
        services::effective_budget(&self.doc, month)
    }

    /// Sum of all explicit budgets
    pub fn total_budget(&self) -> Money {
        services::total_budget(&self.doc)
    }

    // === Derived values ===

    /// Derive the remaining balance from the document as it stands now
    pub fn calculate_remaining_balance(&self) -> Money {
        services::calculate_remaining_balance(&self.doc, self.current_month())
    }

    /// The balance last stored on the document
    pub fn remaining_balance(&self) -> Money {
        self.doc.remaining_balance
    }

    // === Rollover ===

    /// Apply the recurring monthly budget if this month hasn't had it yet
    ///
    /// Idempotent within a calendar month. Returns what was applied.
    pub fn check_and_update_budget(&mut self) -> Option<RolloverPlan> {
        let now = self.now();
        let plan = services::plan_rollover(&self.doc, now, self.settings.rollover_policy)?;

        // A zero recurring budget leaves the month as it is
        if plan.new_budget.is_positive() {
            info!(
                month = %plan.month,
                previous = ?plan.previous.map(|m| m.to_string()),
                new_budget = %plan.new_budget,
                "Applying monthly budget rollover"
            );
            self.doc.budgets.insert(plan.month, plan.new_budget);
        } else {
            debug!(month = %plan.month, "No monthly budget to roll over");
        }
        self.doc.last_budget_update = Some(now);
        self.commit();

        Some(plan)
    }

    // === Preferences ===

    pub fn set_symbol(&mut self, symbol: impl Into<String>) {
        self.doc.symbol = symbol.into();
        self.persist();
    }

    pub fn set_currency(&mut self, currency: impl Into<String>) {
        self.doc.currency = currency.into();
        self.persist();
    }

    pub fn set_region(&mut self, region: impl Into<String>) {
        self.doc.region = region.into();
        self.persist();
    }

    /// Switch the balance policy; returns the recomputed balance
    pub fn set_carry_over_budget(&mut self, carry_over: bool) -> Money {
        self.doc.carry_over_budget = carry_over;
        self.commit()
    }

    /// Set the recurring monthly budget (zero allowed, negative rejected)
    pub fn set_monthly_budget(&mut self, amount: Money) -> RunoraResult<Money> {
        if amount.is_negative() {
            return self.reject(RunoraError::Validation(format!(
                "Monthly budget cannot be negative (got {})",
                amount
            )));
        }
        self.doc.monthly_budget = amount;
        Ok(self.commit())
    }

    // === Reset ===

    /// Discard all data and start over with a fresh document
    pub fn reset(&mut self) {
        warn!("Resetting budget document");
        match self.storage.clear() {
            Ok(()) => self.persist_blocked = false,
            Err(e) => error!(error = %e, "Failed to clear persisted document"),
        }
        self.doc = BudgetDocument::seeded();
        self.commit();
    }

    // === Import / export ===

    /// Write the whole document to a timestamped JSON file in `dir`
    pub fn export_data(&self, dir: &Path) -> RunoraResult<PathBuf> {
        let path = export_document(&self.doc, dir, self.now())?;
        info!(path = %path.display(), "Exported budget document");
        Ok(path)
    }

    /// Validate a JSON file and merge it over the document
    ///
    /// All-or-nothing: any validation failure rejects the whole file and the
    /// document is unchanged.
    pub fn import_data(&mut self, path: &Path) -> RunoraResult<ImportSummary> {
        let import = match DocumentImport::from_file(path) {
            Ok(import) => import,
            Err(e) => return self.reject(e),
        };

        let summary = import.apply(&mut self.doc);
        if self.doc.seed_default_tags() {
            debug!("Imported document had no tags, seeded defaults");
        }
        self.commit();

        info!(
            path = %path.display(),
            fields = ?summary.fields,
            "Imported budget document"
        );
        Ok(summary)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::config::settings::RolloverPolicy;
    use crate::models::NewExpense;
    use crate::storage::{JsonDocumentStorage, MemoryDocumentStorage};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    #[test]
    fn test_first_open_seeds_and_persists() {
        let (store, _clock) = memory_store();
        let persisted = store.storage().document().unwrap();
        assert_eq!(persisted.tags.len(), 8);
        assert_eq!(store.document().tags.len(), 8);
        // Nothing to roll over with a zero monthly budget, but the check ran
        assert!(store.document().last_budget_update.is_some());
        assert!(store.get_budget(month("2025-03")).is_none());
    }

    #[test]
    fn test_add_budget_then_get() {
        let (mut store, _clock) = memory_store();
        for (m, units) in [("2025-01", 10), ("2025-03", 250), ("2026-12", 1)] {
            store.add_budget(month(m), Money::from_units(units)).unwrap();
            assert_eq!(store.get_budget(month(m)), Some(Money::from_units(units)));
        }
        assert_eq!(
            store.storage().document().unwrap().budgets.len(),
            3
        );
    }

    #[test]
    fn test_non_positive_budget_is_rejected() {
        let (mut store, _clock) = memory_store();
        store.add_budget(month("2025-03"), Money::from_units(100)).unwrap();
        let saves = store.storage().save_count();

        for amount in [Money::zero(), Money::from_cents(-1)] {
            let err = store.add_budget(month("2025-03"), amount).unwrap_err();
            assert!(err.is_validation());
            let err = store.update_budget(month("2025-04"), amount).unwrap_err();
            assert!(err.is_validation());
        }

        assert_eq!(store.get_budget(month("2025-03")), Some(Money::from_units(100)));
        assert_eq!(store.get_budget(month("2025-04")), None);
        assert_eq!(store.storage().save_count(), saves);
    }

    #[test]
    fn test_remove_budget_falls_back_to_monthly() {
        let (mut store, _clock) = memory_store();
        store.set_monthly_budget(Money::from_units(80)).unwrap();
        store.add_budget(month("2025-03"), Money::from_units(200)).unwrap();
        assert_eq!(store.remaining_balance(), Money::from_units(200));

        let balance = store.remove_budget(month("2025-03"));
        assert_eq!(balance, Money::from_units(80));
        assert!(store.get_budget(month("2025-03")).is_none());

        // Removing again is fine
        store.remove_budget(month("2025-03"));
    }

    #[test]
    fn test_balance_is_budget_minus_spending() {
        let (mut store, _clock) = memory_store();
        store.add_budget(month("2025-03"), Money::from_units(500)).unwrap();
        let mut total = Money::zero();
        for (day, cents) in [(1, 1250), (9, 4000), (20, 99)] {
            store
                .add_expense(
                    month("2025-03"),
                    NewExpense::new(march(day), "x", Money::from_cents(cents)),
                )
                .unwrap();
            total += Money::from_cents(cents);
        }

        assert_eq!(
            store.calculate_remaining_balance(),
            Money::from_units(500) - total
        );
        assert_eq!(store.remaining_balance(), store.calculate_remaining_balance());
    }

    #[test]
    fn test_carry_over_deficit_reduces_balance() {
        let (mut store, _clock) = memory_store();
        store.set_carry_over_budget(true);
        store.add_budget(month("2025-02"), Money::from_units(100)).unwrap();
        store.add_budget(month("2025-03"), Money::from_units(100)).unwrap();
        let feb = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();

        store
            .add_expense(month("2025-02"), NewExpense::new(feb, "x", Money::from_units(100)))
            .unwrap();
        store
            .add_expense(month("2025-03"), NewExpense::new(march(2), "y", Money::from_units(40)))
            .unwrap();
        let balanced = store.remaining_balance();
        assert_eq!(balanced, Money::from_units(60));

        store
            .add_expense(month("2025-02"), NewExpense::new(feb, "z", Money::from_units(30)))
            .unwrap();
        let with_deficit = store.remaining_balance();

        assert_eq!(with_deficit, Money::from_units(-30 + 60));
        assert!(with_deficit < balanced);
    }

    #[test]
    fn test_rollover_is_idempotent_within_month() {
        let clock = TestClock::at(2025, 3, 15);
        let mut doc = BudgetDocument::seeded();
        doc.monthly_budget = Money::from_units(100);
        let mut store = Store::open_with_clock(
            MemoryDocumentStorage::with_document(doc),
            Settings::default(),
            clock.boxed(),
        );

        // open() already rolled over once
        assert_eq!(store.get_budget(month("2025-03")), Some(Money::from_units(100)));
        assert!(store.check_and_update_budget().is_none());
        clock.set(2025, 3, 31);
        assert!(store.check_and_update_budget().is_none());
        assert_eq!(store.get_budget(month("2025-03")), Some(Money::from_units(100)));

        clock.set(2025, 4, 1);
        let plan = store.check_and_update_budget().unwrap();
        assert_eq!(plan.month, month("2025-04"));
        assert_eq!(store.get_budget(month("2025-04")), Some(Money::from_units(100)));
    }

    #[test]
    fn test_rollover_tops_up_existing_budget() {
        let clock = TestClock::at(2025, 2, 10);
        let mut store =
            Store::open_with_clock(MemoryDocumentStorage::new(), Settings::default(), clock.boxed());
        store.set_monthly_budget(Money::from_units(100)).unwrap();
        store.add_budget(month("2025-03"), Money::from_units(40)).unwrap();

        clock.set(2025, 3, 1);
        store.check_and_update_budget().unwrap();
        assert_eq!(store.get_budget(month("2025-03")), Some(Money::from_units(140)));
    }

    #[test]
    fn test_rollover_replace_policy() {
        let clock = TestClock::at(2025, 2, 10);
        let settings = Settings {
            rollover_policy: RolloverPolicy::Replace,
            ..Settings::default()
        };
        let mut store =
            Store::open_with_clock(MemoryDocumentStorage::new(), settings, clock.boxed());
        store.set_monthly_budget(Money::from_units(100)).unwrap();
        store.add_budget(month("2025-03"), Money::from_units(40)).unwrap();

        clock.set(2025, 3, 1);
        store.check_and_update_budget().unwrap();
        assert_eq!(store.get_budget(month("2025-03")), Some(Money::from_units(100)));
    }

    #[test]
    fn test_concrete_scenario() {
        let clock = TestClock::at(2025, 3, 15);
        let mut doc = BudgetDocument::default();
        doc.monthly_budget = Money::from_units(100);
        let mut store = Store::open_with_clock(
            MemoryDocumentStorage::with_document(doc),
            Settings::default(),
            clock.boxed(),
        );
        // open() ran the check; running it again must not stack another 100
        store.check_and_update_budget();
        assert_eq!(store.get_budget(month("2025-03")), Some(Money::from_units(100)));

        store
            .add_expense(month("2025-03"), NewExpense::new(march(15), "a", Money::from_units(30)))
            .unwrap();
        assert_eq!(store.calculate_remaining_balance(), Money::from_units(70));

        store
            .add_expense(month("2025-03"), NewExpense::new(march(15), "b", Money::from_units(80)))
            .unwrap();
        assert_eq!(store.calculate_remaining_balance(), Money::from_units(-10));
    }

    #[test]
    fn test_persist_failure_keeps_memory() {
        let (mut store, _clock) = memory_store();
        store.storage_mut().set_fail_writes(true);

        let balance = store.add_budget(month("2025-03"), Money::from_units(300)).unwrap();
        assert_eq!(balance, Money::from_units(300));
        assert_eq!(store.get_budget(month("2025-03")), Some(Money::from_units(300)));

        let persisted = store.storage().document().unwrap();
        assert!(persisted.budgets.is_empty());
    }

    #[test]
    fn test_negative_monthly_budget_rejected() {
        let (mut store, _clock) = memory_store();
        assert!(store.set_monthly_budget(Money::from_units(-5)).is_err());
        assert!(store.document().monthly_budget.is_zero());
        assert!(store.set_monthly_budget(Money::zero()).is_ok());
    }

    #[test]
    fn test_preferences_persist() {
        let (mut store, _clock) = memory_store();
        store.set_symbol("$");
        store.set_currency("dollars");
        store.set_region("United States");

        let persisted = store.storage().document().unwrap();
        assert_eq!(persisted.symbol, "$");
        assert_eq!(persisted.currency, "dollars");
        assert_eq!(persisted.region, "United States");
    }

    #[test]
    fn test_reset_starts_over() {
        let (mut store, _clock) = memory_store();
        store.add_budget(month("2025-03"), Money::from_units(300)).unwrap();
        store
            .add_expense(month("2025-03"), NewExpense::new(march(1), "x", Money::from_units(3)))
            .unwrap();
        store.add_tag("Pets", "#000", "🐶").unwrap();

        store.reset();

        assert!(store.document().budgets.is_empty());
        assert!(store.document().expenses.is_empty());
        assert_eq!(store.document().tags.len(), 8);
        assert!(store.storage().document().unwrap().budgets.is_empty());
    }

    #[test]
    fn test_export_then_import_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let (mut store, _clock) = memory_store();
        let food = store.document().tags[0].id.clone();
        store.add_budget(month("2025-03"), Money::from_units(400)).unwrap();
        store.add_budget(month("2025-02"), Money::from_cents(12345)).unwrap();
        store
            .add_expense(
                month("2025-03"),
                NewExpense::new(march(3), "Dinner", Money::from_cents(4550)).with_tags([food]),
            )
            .unwrap();
        store.add_tag("Pets", "#010203", "🐶").unwrap();
        let before = store.document().clone();

        let path = store.export_data(temp_dir.path()).unwrap();

        // Scribble over the state, then import the export back
        store.reset();
        store.add_budget(month("2025-03"), Money::from_units(1)).unwrap();
        let summary = store.import_data(&path).unwrap();

        assert_eq!(summary.dangling_tags_removed, 0);
        let after = store.document();
        assert_eq!(after.budgets, before.budgets);
        assert_eq!(after.expenses, before.expenses);
        assert_eq!(after.tags, before.tags);
        assert_eq!(store.remaining_balance(), Money::from_cents(35450));
    }

    #[test]
    fn test_rejected_import_changes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let (mut store, _clock) = memory_store();
        store.add_budget(month("2025-03"), Money::from_units(400)).unwrap();
        let before = store.document().clone();
        let saves = store.storage().save_count();

        let path = temp_dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"{"budgets": {"2025-04": 10}, "tags": [{"id": "t", "name": 3}]}"#,
        )
        .unwrap();

        let err = store.import_data(&path).unwrap_err();
        assert!(matches!(err, RunoraError::Import(_)));
        assert_eq!(store.document(), &before);
        assert_eq!(store.storage().save_count(), saves);

        let missing = store.import_data(&temp_dir.path().join("missing.json"));
        assert!(missing.is_err());
    }

    #[test]
    fn test_json_storage_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget.json");
        let clock = TestClock::at(2025, 3, 15);

        let mut store = Store::open_with_clock(
            JsonDocumentStorage::new(path.clone()),
            Settings::default(),
            clock.boxed(),
        );
        store.add_budget(month("2025-03"), Money::from_units(120)).unwrap();
        let expense = store
            .add_expense(month("2025-03"), NewExpense::new(march(4), "Tea", Money::from_cents(250)))
            .unwrap();
        let tags_before: Vec<_> = store.document().tags.iter().map(|t| t.id.clone()).collect();
        drop(store);

        let reopened = Store::open_with_clock(
            JsonDocumentStorage::new(path),
            Settings::default(),
            clock.boxed(),
        );
        assert_eq!(reopened.get_budget(month("2025-03")), Some(Money::from_units(120)));
        assert_eq!(reopened.get_expenses(month("2025-03")), &[expense][..]);
        let tags_after: Vec<_> = reopened.document().tags.iter().map(|t| t.id.clone()).collect();
        assert_eq!(tags_before, tags_after);
        assert_eq!(reopened.remaining_balance(), Money::from_cents(11750));
    }

    #[test]
    fn test_corrupt_document_is_moved_aside_not_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget.json");
        let original = r#"{ "budgets": {"2025-01": 500}, "expenses": "#;
        std::fs::write(&path, original).unwrap();
        let clock = TestClock::at(2025, 3, 15);

        let store = Store::open_with_clock(
            JsonDocumentStorage::new(path.clone()),
            Settings::default(),
            clock.boxed(),
        );
        assert_eq!(store.document().tags.len(), 8);
        assert!(!store.is_persist_blocked());

        let moved = temp_dir.path().join("budget.json.corrupt-20250315T120000Z");
        assert_eq!(std::fs::read_to_string(moved).unwrap(), original);
        // The fresh document is now readable in its place
        let fresh: BudgetDocument =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(fresh.budgets.is_empty());
    }

    #[test]
    fn test_unreadable_document_that_cannot_move_is_never_overwritten() {
        let clock = TestClock::at(2025, 3, 15);
        let mut kept = BudgetDocument::seeded();
        kept.monthly_budget = Money::from_units(100);
        kept.budgets.insert(month("2025-01"), Money::from_units(500));

        let mut storage = MemoryDocumentStorage::with_document(kept.clone());
        storage.set_fail_reads(true);
        storage.set_fail_writes(true);
        let mut store = Store::open_with_clock(storage, Settings::default(), clock.boxed());
        assert!(store.is_persist_blocked());

        store.storage_mut().set_fail_writes(false);
        store.add_budget(month("2025-03"), Money::from_units(20)).unwrap();
        store.on_background();

        assert_eq!(store.storage().save_count(), 0);
        assert_eq!(store.storage().document(), Some(&kept));

        // An explicit reset is allowed to start over
        store.reset();
        assert!(!store.is_persist_blocked());
        assert!(store.storage().document().unwrap().budgets.is_empty());
    }

    #[test]
    fn test_rollover_persists_once() {
        let clock = TestClock::at(2025, 3, 15);
        let mut doc = BudgetDocument::seeded();
        doc.monthly_budget = Money::from_units(100);
        doc.last_budget_update = Some(clock.0.get());
        let mut store = Store::open_with_clock(
            MemoryDocumentStorage::with_document(doc),
            Settings::default(),
            clock.boxed(),
        );
        let saves = store.storage().save_count();

        clock.set(2025, 4, 1);
        store.check_and_update_budget().unwrap();
        assert_eq!(store.storage().save_count(), saves + 1);
        assert_eq!(
            store.storage().document().unwrap().budgets.get(&month("2025-04")),
            Some(&Money::from_units(100))
        );
    }

    #[test]
    fn test_zero_monthly_budget_rollover_only_stamps() {
        let clock = TestClock::at(2025, 3, 15);
        let mut doc = BudgetDocument::seeded();
        doc.budgets.insert(month("2025-03"), Money::from_units(40));
        let settings = Settings {
            rollover_policy: RolloverPolicy::Replace,
            ..Settings::default()
        };
        let store = Store::open_with_clock(
            MemoryDocumentStorage::with_document(doc),
            settings,
            clock.boxed(),
        );

        assert_eq!(store.get_budget(month("2025-03")), Some(Money::from_units(40)));
        assert_eq!(store.storage().save_count(), 1);
        assert!(store
            .storage()
            .document()
            .unwrap()
            .last_budget_update
            .is_some());
    }
}
