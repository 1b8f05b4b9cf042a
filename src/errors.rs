use thiserror::Error;

/// Rejection reasons for transaction input, reported inline at the input
/// point. The ledger is never touched when validation fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Description must not be empty.")]
    EmptyDescription,
    #[error("Amount `{0}` is not a valid number.")]
    AmountNotANumber(String),
    #[error("Amount must be greater than zero, got {0}.")]
    AmountNotPositive(f64),
}

/// Malformed persisted data. The offending operation aborts wholesale; no
/// partial import ever reaches the ledger.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid CSV document: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV header must be `date,description,amount,type`, got `{0}`")]
    CsvHeader(String),
}

/// Error type that captures common tracker failures.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
