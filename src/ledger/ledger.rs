use super::transaction::{Transaction, TransactionKind};

/// Aggregate totals derived from ledger contents. `net` is always computed on
/// demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

/// Ordered transaction store with running aggregates.
///
/// Insertion order is display order. Every mutation keeps `total_income` and
/// `total_expenses` equal to the sums over current contents, with one
/// documented exception: [`Ledger::restore`] trusts the declared totals of a
/// loaded snapshot so saved files round-trip exactly.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    total_income: f64,
    total_expenses: f64,
    revision: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transaction and bumps the matching aggregate. Observable by
    /// dependents immediately after return.
    pub fn add(&mut self, transaction: Transaction) {
        match transaction.kind {
            TransactionKind::Income => self.total_income += transaction.amount,
            TransactionKind::Expense => self.total_expenses += transaction.amount,
        }
        self.transactions.push(transaction);
        self.touch();
    }

    /// Empties the sequence and resets both aggregates to zero.
    pub fn clear(&mut self) {
        self.transactions.clear();
        self.total_income = 0.0;
        self.total_expenses = 0.0;
        self.touch();
    }

    /// Wholesale swap. Both aggregates are recomputed by summing the new
    /// contents; externally supplied totals are never trusted on this path
    /// (CSV import in particular supplies none).
    pub fn replace_all(&mut self, transactions: Vec<Transaction>) {
        self.total_income = sum_of(&transactions, TransactionKind::Income);
        self.total_expenses = sum_of(&transactions, TransactionKind::Expense);
        self.transactions = transactions;
        self.touch();
    }

    /// Wholesale swap that trusts the declared totals. Snapshot loads use
    /// this so a file that was saved inconsistent loads back inconsistent
    /// rather than being silently repaired.
    pub fn restore(
        &mut self,
        transactions: Vec<Transaction>,
        total_income: f64,
        total_expenses: f64,
    ) {
        self.transactions = transactions;
        self.total_income = total_income;
        self.total_expenses = total_expenses;
        self.touch();
    }

    /// Current contents in insertion order, as a read-only view.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn totals(&self) -> Totals {
        Totals {
            income: self.total_income,
            expenses: self.total_expenses,
            net: self.total_income - self.total_expenses,
        }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Monotonic mutation counter; dependents compare it to know when to
    /// refresh their projections.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

fn sum_of(transactions: &[Transaction], kind: TransactionKind) -> f64 {
    transactions
        .iter()
        .filter(|txn| txn.kind == kind)
        .map(|txn| txn.amount)
        .sum()
}
