use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use finance_core::core::Tracker;
use finance_core::errors::TrackerError;
use finance_core::ledger::{TransactionDraft, TransactionKind};
use finance_core::storage::snapshot::Snapshot;
use tempfile::tempdir;

fn populated_tracker() -> Tracker {
    let mut tracker = Tracker::new();
    let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    tracker
        .add_transaction_dated(
            &TransactionDraft::new("Salary", "3000", TransactionKind::Income),
            date,
        )
        .expect("valid income");
    tracker
        .add_transaction_dated(
            &TransactionDraft::new("Rent, January", "1200", TransactionKind::Expense),
            date.succ_opt().unwrap(),
        )
        .expect("valid expense");
    tracker
}

fn tmp_collision_path(path: &Path) -> std::path::PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}

#[test]
fn snapshot_file_round_trip_reproduces_the_ledger() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("finance_data.json");

    let tracker = populated_tracker();
    tracker.save_snapshot_to(&path).expect("save snapshot");

    let mut restored = Tracker::new();
    let count = restored.load_snapshot_from(&path).expect("load snapshot");

    assert_eq!(count, 2);
    assert_eq!(restored.transactions(), tracker.transactions());
    let totals = restored.totals();
    assert_eq!((totals.income, totals.expenses, totals.net), (3000.0, 1200.0, 1800.0));
}

#[test]
fn loading_trusts_declared_aggregates_verbatim() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("inconsistent.json");
    // Totals deliberately disagree with the single row.
    fs::write(
        &path,
        r#"{
            "transactions": [
                {"date": "2025-01-02", "description": "Rent", "amount": 1200.0, "type": "Expense"}
            ],
            "total_income": 500.0,
            "total_expenses": 7.0,
            "saved_date": "2025-01-02 10:00:00"
        }"#,
    )
    .unwrap();

    let mut tracker = Tracker::new();
    tracker.load_snapshot_from(&path).expect("load snapshot");

    let totals = tracker.totals();
    assert_eq!((totals.income, totals.expenses, totals.net), (500.0, 7.0, 493.0));
}

#[test]
fn loading_a_minimal_snapshot_defaults_the_missing_keys() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("minimal.json");
    fs::write(&path, r#"{"transactions": []}"#).unwrap();

    let snapshot = finance_core::storage::snapshot::load_snapshot_from_path(&path).unwrap();
    assert_eq!(snapshot.total_income, 0.0);
    assert_eq!(snapshot.total_expenses, 0.0);
    assert_eq!(snapshot.saved_date, "Unknown");
}

#[test]
fn malformed_snapshot_aborts_and_leaves_the_ledger_untouched() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("broken.json");
    fs::write(&path, "{ this is not json").unwrap();

    let mut tracker = populated_tracker();
    let err = tracker.load_snapshot_from(&path).expect_err("load must fail");
    assert!(matches!(err, TrackerError::Format(_)), "unexpected error: {err:?}");

    assert_eq!(tracker.transactions().len(), 2);
    assert_eq!(tracker.totals().net, 1800.0);
}

#[test]
fn missing_snapshot_file_is_an_io_error() {
    let temp = tempdir().unwrap();
    let mut tracker = Tracker::new();
    let err = tracker
        .load_snapshot_from(&temp.path().join("nope.json"))
        .expect_err("load must fail");
    assert!(matches!(err, TrackerError::Io(_)), "unexpected error: {err:?}");
}

#[test]
fn csv_file_round_trip_reproduces_rows_and_recomputes_totals() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("finance_data.csv");

    let tracker = populated_tracker();
    tracker.export_csv_to(&path).expect("export csv");

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("date,description,amount,type\n"));
    // Embedded comma in the description stays quoted.
    assert!(text.contains("\"Rent, January\""));

    let mut imported = Tracker::new();
    let count = imported.import_csv_from(&path).expect("import csv");
    assert_eq!(count, 2);
    assert_eq!(imported.transactions(), tracker.transactions());
    let totals = imported.totals();
    assert_eq!((totals.income, totals.expenses, totals.net), (3000.0, 1200.0, 1800.0));
}

#[test]
fn bad_csv_row_aborts_the_whole_import() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("broken.csv");
    fs::write(
        &path,
        "date,description,amount,type\n2025-02-01,Coffee,lots,Expense\n",
    )
    .unwrap();

    let mut tracker = populated_tracker();
    let err = tracker.import_csv_from(&path).expect_err("import must fail");
    assert!(matches!(err, TrackerError::Format(_)), "unexpected error: {err:?}");

    // No partial import: the previous contents survive.
    assert_eq!(tracker.transactions().len(), 2);
    assert_eq!(tracker.totals().net, 1800.0);
}

#[test]
fn atomic_save_failure_preserves_original_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("finance_data.json");

    let tracker = populated_tracker();
    tracker.save_snapshot_to(&path).expect("initial save");
    let original = fs::read_to_string(&path).expect("read original file");

    // Create a directory that collides with the temp file name to force the
    // write to fail mid-save.
    let tmp_path = tmp_collision_path(&path);
    fs::create_dir_all(&tmp_path).unwrap();

    let mut changed = populated_tracker();
    changed
        .add_transaction_dated(
            &TransactionDraft::new("Bonus", "500", TransactionKind::Income),
            NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
        )
        .unwrap();
    let result = changed.save_snapshot_to(&path);
    assert!(result.is_err(), "expected save to fail when temp path is a directory");

    let current = fs::read_to_string(&path).expect("read after failure");
    assert_eq!(
        current, original,
        "atomic save failure must not corrupt the original file"
    );

    let _ = fs::remove_dir_all(&tmp_path);
}

#[test]
fn saved_snapshot_always_contains_all_four_keys() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("empty.json");

    Tracker::new().save_snapshot_to(&path).expect("save empty ledger");

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    for key in ["transactions", "total_income", "total_expenses", "saved_date"] {
        assert!(value.get(key).is_some(), "missing key `{key}`");
    }
    assert_ne!(value["saved_date"], "Unknown");
}

#[test]
fn snapshot_codec_and_ledger_agree_on_empty_state() {
    let snapshot = Snapshot::from_json(r#"{"transactions": []}"#).unwrap();
    let mut tracker = Tracker::new();
    let temp = tempdir().unwrap();
    let path = temp.path().join("empty.json");
    std::fs::write(&path, snapshot.to_json().unwrap()).unwrap();

    tracker.load_snapshot_from(&path).unwrap();
    assert!(tracker.transactions().is_empty());
    let totals = tracker.totals();
    assert_eq!((totals.income, totals.expenses, totals.net), (0.0, 0.0, 0.0));
}
