use std::fs;
use std::path::Path;

use crate::errors::FormatError;
use crate::ledger::Transaction;

use super::{write_atomic, Result};

const CSV_HEADER: [&str; 4] = ["date", "description", "amount", "type"];

/// Renders transactions as CSV under the standard header. Amounts stay plain
/// decimals with no currency symbol so the output remains machine-readable;
/// descriptions with embedded commas get standard quoting.
pub fn export_csv(transactions: &[Transaction]) -> std::result::Result<String, FormatError> {
    // The header is written explicitly so an empty ledger still exports one.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for transaction in transactions {
        writer.serialize(transaction)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| FormatError::Csv(csv::Error::from(err.into_error())))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Parses header plus rows into transactions. Fails on an absent or malformed
/// header, a short row, or a field that does not decode (a non-numeric
/// `amount`, an unknown `type`, a bad `date`). Aggregates are never read from
/// CSV; the caller rebuilds them.
pub fn import_csv(text: &str) -> std::result::Result<Vec<Transaction>, FormatError> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|field| field.trim().to_string())
        .collect();
    if headers != CSV_HEADER {
        return Err(FormatError::CsvHeader(headers.join(",")));
    }

    let mut transactions = Vec::new();
    for row in reader.deserialize() {
        transactions.push(row?);
    }
    Ok(transactions)
}

pub fn export_csv_to_path(transactions: &[Transaction], path: &Path) -> Result<()> {
    let text = export_csv(transactions)?;
    write_atomic(path, &text)?;
    Ok(())
}

pub fn import_csv_from_path(path: &Path) -> Result<Vec<Transaction>> {
    let text = fs::read_to_string(path)?;
    Ok(import_csv(&text)?)
}
