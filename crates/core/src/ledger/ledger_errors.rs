use thiserror::Error;

/// Errors specific to the hour-balance ledgers.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Transaction not found: {0}")]
    NotFound(String),

    #[error("Invalid transaction kind: {0}")]
    InvalidKind(String),

    #[error("Invalid hours value: {0}")]
    InvalidHours(String),

    #[error("Invalid transaction data: {0}")]
    InvalidData(String),
}
