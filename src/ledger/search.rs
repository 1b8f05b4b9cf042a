use super::transaction::Transaction;

/// Result of filtering the ledger for display.
///
/// `NoMatches` and `LedgerEmpty` are distinct so the list view can render
/// "no matches for X" separately from "no transactions yet".
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<'a> {
    Matches(Vec<&'a Transaction>),
    NoMatches { query: String },
    LedgerEmpty,
}

/// Case-insensitive substring filter over description, date, type, and the
/// decimal string form of the amount, in that order; any one match keeps the
/// row. An empty query matches everything, in original insertion order.
pub fn filter<'a>(transactions: &'a [Transaction], query: &str) -> SearchOutcome<'a> {
    if transactions.is_empty() {
        return SearchOutcome::LedgerEmpty;
    }

    let needle = query.to_lowercase();
    let matches: Vec<&Transaction> = transactions
        .iter()
        .filter(|txn| matches_query(txn, &needle))
        .collect();

    if matches.is_empty() {
        SearchOutcome::NoMatches {
            query: query.to_string(),
        }
    } else {
        SearchOutcome::Matches(matches)
    }
}

fn matches_query(txn: &Transaction, needle: &str) -> bool {
    txn.description.to_lowercase().contains(needle)
        || txn.date.to_string().contains(needle)
        || txn.kind.as_str().to_lowercase().contains(needle)
        || txn.amount.to_string().contains(needle)
}
