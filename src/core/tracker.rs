//! Command facade tying the ledger to its environment.
//!
//! The UI adapter calls these explicit commands instead of mutating shared
//! state from widget callbacks. Every mutating command notifies registered
//! observers synchronously after the ledger changes, so list, totals, and
//! chart renderers can re-read fresh state before the call returns.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::errors::{TrackerError, ValidationError};
use crate::ledger::{filter, Ledger, SearchOutcome, Totals, Transaction, TransactionDraft};
use crate::storage::{
    csv_codec,
    snapshot::{self, Snapshot},
};

/// Suggested file names for the save/export dialogs.
pub const DEFAULT_SNAPSHOT_FILENAME: &str = "finance_data.json";
pub const DEFAULT_CSV_FILENAME: &str = "finance_data.csv";

/// What a file dialog is being opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilePurpose {
    Snapshot,
    Csv,
}

/// File-choice service provided by the environment. `None` means the user
/// dismissed the dialog; callers treat that as a no-op, not an error.
pub trait FileDialog {
    fn choose_open(&mut self, purpose: FilePurpose) -> Option<PathBuf>;
    fn choose_save(&mut self, purpose: FilePurpose, suggested_name: &str) -> Option<PathBuf>;
}

/// Yes/no confirmation service, asked before any operation that would discard
/// existing data.
pub trait ConfirmPrompt {
    fn confirm(&mut self, question: &str) -> bool;
}

/// Notified synchronously after every mutating command.
pub trait LedgerObserver {
    fn ledger_changed(&mut self, ledger: &Ledger);
}

/// How a dialog-driven command ended. A cancelled dialog or a declined
/// confirmation leaves the ledger untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Cancelled,
}

/// Owns the ledger, the single mutable source of truth, and exposes the
/// command surface a UI shell drives.
#[derive(Default)]
pub struct Tracker {
    ledger: Ledger,
    observers: Vec<Box<dyn LedgerObserver>>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer for mutation notifications.
    pub fn observe(&mut self, observer: Box<dyn LedgerObserver>) {
        self.observers.push(observer);
    }

    fn notify(&mut self) {
        for observer in &mut self.observers {
            observer.ledger_changed(&self.ledger);
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.transactions()
    }

    pub fn totals(&self) -> Totals {
        self.ledger.totals()
    }

    pub fn search(&self, query: &str) -> SearchOutcome<'_> {
        filter(self.ledger.transactions(), query)
    }

    /// Validates the draft, stamps it with today's date, and appends it.
    pub fn add_transaction(
        &mut self,
        draft: &TransactionDraft,
    ) -> Result<Transaction, ValidationError> {
        self.add_transaction_dated(draft, Local::now().date_naive())
    }

    /// As [`Tracker::add_transaction`], with an explicit entry date.
    pub fn add_transaction_dated(
        &mut self,
        draft: &TransactionDraft,
        date: NaiveDate,
    ) -> Result<Transaction, ValidationError> {
        let transaction = draft.validate(date)?;
        self.ledger.add(transaction.clone());
        self.notify();
        tracing::debug!(
            description = %transaction.description,
            amount = transaction.amount,
            kind = %transaction.kind,
            "transaction added"
        );
        Ok(transaction)
    }

    /// Empties the ledger. Asks for confirmation when there is data to
    /// discard; declining is a no-op.
    pub fn clear(&mut self, confirm: &mut dyn ConfirmPrompt) -> Outcome {
        if !self.ledger.is_empty() && !confirm.confirm("Clear all transactions?") {
            return Outcome::Cancelled;
        }
        self.ledger.clear();
        self.notify();
        tracing::info!("ledger cleared");
        Outcome::Completed
    }

    /// Writes a full snapshot to `path`. The ledger is not mutated.
    pub fn save_snapshot_to(&self, path: &Path) -> Result<(), TrackerError> {
        let snapshot = Snapshot::of(&self.ledger, Local::now());
        snapshot::save_snapshot_to_path(&snapshot, path)?;
        tracing::info!(path = %path.display(), transactions = self.ledger.len(), "snapshot saved");
        Ok(())
    }

    /// Replaces ledger contents wholesale with the snapshot at `path`,
    /// trusting its declared totals. On any error the ledger is untouched.
    /// Returns the number of loaded transactions.
    pub fn load_snapshot_from(&mut self, path: &Path) -> Result<usize, TrackerError> {
        let snapshot = snapshot::load_snapshot_from_path(path)?;
        let count = snapshot.transactions.len();
        self.ledger.restore(
            snapshot.transactions,
            snapshot.total_income,
            snapshot.total_expenses,
        );
        self.notify();
        tracing::info!(path = %path.display(), transactions = count, "snapshot loaded");
        Ok(count)
    }

    /// Writes the transaction rows to `path` as CSV. Aggregates are not
    /// transported.
    pub fn export_csv_to(&self, path: &Path) -> Result<(), TrackerError> {
        csv_codec::export_csv_to_path(self.ledger.transactions(), path)?;
        tracing::info!(path = %path.display(), transactions = self.ledger.len(), "csv exported");
        Ok(())
    }

    /// Replaces ledger contents wholesale with the rows at `path`; aggregates
    /// are recomputed from the rows, never read from the file. A bad row
    /// aborts before the ledger changes; no partial import. Returns the
    /// number of imported transactions.
    pub fn import_csv_from(&mut self, path: &Path) -> Result<usize, TrackerError> {
        let transactions = csv_codec::import_csv_from_path(path)?;
        let count = transactions.len();
        self.ledger.replace_all(transactions);
        self.notify();
        tracing::info!(path = %path.display(), transactions = count, "csv imported");
        Ok(count)
    }

    /// Dialog-driven save: asks the environment where to write, then saves.
    pub fn save_snapshot(&mut self, dialog: &mut dyn FileDialog) -> Result<Outcome, TrackerError> {
        let Some(path) = dialog.choose_save(FilePurpose::Snapshot, DEFAULT_SNAPSHOT_FILENAME)
        else {
            return Ok(Outcome::Cancelled);
        };
        self.save_snapshot_to(&path)?;
        Ok(Outcome::Completed)
    }

    /// Dialog-driven load: confirms the discard when data exists, then asks
    /// the environment which file to read.
    pub fn load_snapshot(
        &mut self,
        dialog: &mut dyn FileDialog,
        confirm: &mut dyn ConfirmPrompt,
    ) -> Result<Outcome, TrackerError> {
        if !self.ledger.is_empty()
            && !confirm.confirm("Loading will replace the current transactions. Continue?")
        {
            return Ok(Outcome::Cancelled);
        }
        let Some(path) = dialog.choose_open(FilePurpose::Snapshot) else {
            return Ok(Outcome::Cancelled);
        };
        self.load_snapshot_from(&path)?;
        Ok(Outcome::Completed)
    }

    /// Dialog-driven CSV export.
    pub fn export_csv(&mut self, dialog: &mut dyn FileDialog) -> Result<Outcome, TrackerError> {
        let Some(path) = dialog.choose_save(FilePurpose::Csv, DEFAULT_CSV_FILENAME) else {
            return Ok(Outcome::Cancelled);
        };
        self.export_csv_to(&path)?;
        Ok(Outcome::Completed)
    }

    /// Dialog-driven CSV import, confirmed like a load.
    pub fn import_csv(
        &mut self,
        dialog: &mut dyn FileDialog,
        confirm: &mut dyn ConfirmPrompt,
    ) -> Result<Outcome, TrackerError> {
        if !self.ledger.is_empty()
            && !confirm.confirm("Importing will replace the current transactions. Continue?")
        {
            return Ok(Outcome::Cancelled);
        }
        let Some(path) = dialog.choose_open(FilePurpose::Csv) else {
            return Ok(Outcome::Cancelled);
        };
        self.import_csv_from(&path)?;
        Ok(Outcome::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TransactionKind;

    struct AlwaysYes;

    impl ConfirmPrompt for AlwaysYes {
        fn confirm(&mut self, _question: &str) -> bool {
            true
        }
    }

    struct AlwaysNo;

    impl ConfirmPrompt for AlwaysNo {
        fn confirm(&mut self, _question: &str) -> bool {
            false
        }
    }

    fn draft(description: &str, amount: &str, kind: TransactionKind) -> TransactionDraft {
        TransactionDraft::new(description, amount, kind)
    }

    #[test]
    fn totals_after_income_and_expense_adds() {
        let mut tracker = Tracker::new();
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        tracker
            .add_transaction_dated(&draft("Salary", "3000", TransactionKind::Income), date)
            .unwrap();
        tracker
            .add_transaction_dated(&draft("Rent", "1200", TransactionKind::Expense), date)
            .unwrap();

        let totals = tracker.totals();
        assert_eq!(
            (totals.income, totals.expenses, totals.net),
            (3000.0, 1200.0, 1800.0)
        );
    }

    #[test]
    fn invalid_draft_leaves_ledger_untouched() {
        let mut tracker = Tracker::new();
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        let err = tracker
            .add_transaction_dated(&draft("", "10", TransactionKind::Income), date)
            .unwrap_err();
        assert_eq!(err, ValidationError::EmptyDescription);
        assert!(tracker.transactions().is_empty());
        assert_eq!(tracker.ledger().revision(), 0);
    }

    #[test]
    fn declined_clear_is_a_noop() {
        let mut tracker = Tracker::new();
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        tracker
            .add_transaction_dated(&draft("Salary", "3000", TransactionKind::Income), date)
            .unwrap();

        assert_eq!(tracker.clear(&mut AlwaysNo), Outcome::Cancelled);
        assert_eq!(tracker.transactions().len(), 1);

        assert_eq!(tracker.clear(&mut AlwaysYes), Outcome::Completed);
        assert!(tracker.transactions().is_empty());
        let totals = tracker.totals();
        assert_eq!((totals.income, totals.expenses, totals.net), (0.0, 0.0, 0.0));
    }

    #[test]
    fn clearing_an_empty_ledger_needs_no_confirmation() {
        let mut tracker = Tracker::new();
        // AlwaysNo would cancel if it were consulted.
        assert_eq!(tracker.clear(&mut AlwaysNo), Outcome::Completed);
    }
}
