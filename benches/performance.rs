use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use finance_core::ledger::{filter, Ledger, Transaction, TransactionKind};
use finance_core::storage::snapshot::{load_snapshot_from_path, save_snapshot_to_path, Snapshot};
use tempfile::tempdir;

fn build_sample_ledger(txn_count: usize) -> Ledger {
    let mut ledger = Ledger::new();
    let start_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

    for idx in 0..txn_count {
        let date = start_date + Duration::days((idx % 365) as i64);
        let kind = if idx % 3 == 0 {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        };
        ledger.add(Transaction::new(
            date,
            format!("Entry {idx}"),
            50.0 + (idx % 100) as f64,
            kind,
        ));
    }
    ledger
}

fn bench_search(c: &mut Criterion) {
    let ledger = build_sample_ledger(black_box(10_000));

    c.bench_function("search_10k_by_description", |b| {
        b.iter(|| {
            let outcome = filter(ledger.transactions(), black_box("entry 99"));
            black_box(outcome);
        })
    });

    c.bench_function("search_10k_no_match", |b| {
        b.iter(|| {
            let outcome = filter(ledger.transactions(), black_box("unicorn"));
            black_box(outcome);
        })
    });
}

fn bench_snapshot_io(c: &mut Criterion) {
    let ledger = build_sample_ledger(black_box(10_000));
    let dir = tempdir().expect("tempdir");
    let file_path = dir.path().join("finance_data.json");
    let snapshot = Snapshot::of(&ledger, chrono::Local::now());

    c.bench_function("snapshot_save_10k", |b| {
        b.iter(|| {
            save_snapshot_to_path(&snapshot, &file_path).expect("save snapshot");
        })
    });

    save_snapshot_to_path(&snapshot, &file_path).expect("seed");

    c.bench_function("snapshot_load_10k", |b| {
        b.iter(|| {
            let loaded = load_snapshot_from_path(&file_path).expect("load snapshot");
            black_box(loaded);
        })
    });
}

criterion_group!(benches, bench_search, bench_snapshot_io);
criterion_main!(benches);
