use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::errors::FormatError;
use crate::ledger::{Ledger, Transaction};

use super::{write_atomic, Result};

const SAVED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Full-state JSON document: the transactions plus the declared aggregates
/// and a display-only save timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub total_income: f64,
    #[serde(default)]
    pub total_expenses: f64,
    #[serde(default = "unknown_saved_date")]
    pub saved_date: String,
}

fn unknown_saved_date() -> String {
    "Unknown".to_string()
}

impl Snapshot {
    /// Captures the ledger's current state, stamped with `saved_at`.
    pub fn of(ledger: &Ledger, saved_at: DateTime<Local>) -> Self {
        let totals = ledger.totals();
        Self {
            transactions: ledger.transactions().to_vec(),
            total_income: totals.income,
            total_expenses: totals.expenses,
            saved_date: saved_at.format(SAVED_DATE_FORMAT).to_string(),
        }
    }

    pub fn to_json(&self) -> std::result::Result<String, FormatError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a snapshot document. Only `transactions` is required; the other
    /// keys default to `0.0` / `0.0` / `"Unknown"`. Declared aggregates come
    /// back as-is; a snapshot saved inconsistent loads back inconsistent.
    pub fn from_json(document: &str) -> std::result::Result<Self, FormatError> {
        Ok(serde_json::from_str(document)?)
    }
}

pub fn save_snapshot_to_path(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let json = snapshot.to_json()?;
    write_atomic(path, &json)?;
    Ok(())
}

pub fn load_snapshot_from_path(path: &Path) -> Result<Snapshot> {
    let data = fs::read_to_string(path)?;
    Ok(Snapshot::from_json(&data)?)
}
