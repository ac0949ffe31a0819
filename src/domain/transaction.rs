use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::account::AccountId;

/// Monotonic identifier assigned by the journal on insert.
pub type TransactionId = u64;

/// One side of a transaction: a debit or credit amount against an account.
///
/// Exactly one of the two amounts is non-zero; the journal rejects anything
/// else before it is stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JournalEntry {
    pub entry_id: u32,
    pub account_id: AccountId,
    pub debit_amount: i64,
    pub credit_amount: i64,
}

impl JournalEntry {
    /// Creates a debit-side entry. The entry id is assigned on insert.
    pub fn debit(account_id: AccountId, amount: i64) -> Self {
        Self {
            entry_id: 0,
            account_id,
            debit_amount: amount,
            credit_amount: 0,
        }
    }

    /// Creates a credit-side entry. The entry id is assigned on insert.
    pub fn credit(account_id: AccountId, amount: i64) -> Self {
        Self {
            entry_id: 0,
            account_id,
            debit_amount: 0,
            credit_amount: amount,
        }
    }

    /// Debit minus credit; positive on the debit side.
    pub fn signed_amount(&self) -> i64 {
        self.debit_amount - self.credit_amount
    }
}

/// A balanced set of journal entries recorded on one calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub transaction_id: TransactionId,
    pub transaction_date: NaiveDate,
    pub description: String,
    pub entries: Vec<JournalEntry>,
}

impl Transaction {
    pub fn debit_total(&self) -> i64 {
        self.entries.iter().map(|entry| entry.debit_amount).sum()
    }

    pub fn credit_total(&self) -> i64 {
        self.entries.iter().map(|entry| entry.credit_amount).sum()
    }

    pub fn is_balanced(&self) -> bool {
        self.debit_total() == self.credit_total()
    }
}
