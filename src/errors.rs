use thiserror::Error;

use crate::domain::{AccountId, TransactionId};

/// Unified error type for journal validation, lookups, and period transitions.
#[derive(Debug, Error)]
pub enum AccountingError {
    #[error("Invalid transaction: {0}")]
    Validation(String),
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),
    #[error("Template not found: {0}")]
    TemplateNotFound(String),
    #[error("Fiscal period is not configured")]
    PeriodNotConfigured,
    #[error("Current period is already closed")]
    AlreadyClosed,
    #[error("Persistence error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, AccountingError>;

impl From<std::io::Error> for AccountingError {
    fn from(err: std::io::Error) -> Self {
        AccountingError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AccountingError {
    fn from(err: serde_json::Error) -> Self {
        AccountingError::Storage(err.to_string())
    }
}
