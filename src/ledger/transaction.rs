use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Direction of a transaction. The amount itself is always positive; the kind
/// alone carries the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TransactionKind {
    #[default]
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(format!("unknown transaction type `{other}`")),
        }
    }
}

/// A single ledger record. Immutable once created; the store only ever
/// appends, bulk-replaces, or clears.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
            kind,
        }
    }
}

/// Raw form input awaiting validation. `amount` stays a string until it has
/// been checked, mirroring what an entry widget hands over.
#[derive(Debug, Clone, Default)]
pub struct TransactionDraft {
    pub description: String,
    pub amount: String,
    pub kind: TransactionKind,
}

impl TransactionDraft {
    pub fn new(
        description: impl Into<String>,
        amount: impl Into<String>,
        kind: TransactionKind,
    ) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
            kind,
        }
    }

    /// Checks the draft and stamps it with `date`, yielding a well-formed
    /// transaction. Non-numeric and non-positive amounts are rejected with
    /// distinct reasons.
    pub fn validate(&self, date: NaiveDate) -> Result<Transaction, ValidationError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }

        let raw = self.amount.trim();
        let amount: f64 = raw
            .parse()
            .map_err(|_| ValidationError::AmountNotANumber(raw.to_string()))?;
        // f64::from_str accepts `inf` and `NaN`; neither is an amount.
        if !amount.is_finite() {
            return Err(ValidationError::AmountNotANumber(raw.to_string()));
        }
        if amount <= 0.0 {
            return Err(ValidationError::AmountNotPositive(amount));
        }

        Ok(Transaction::new(date, description, amount, self.kind))
    }
}
