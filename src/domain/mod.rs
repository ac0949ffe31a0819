//! Pure data types: accounts, transactions, templates, and statement shapes.

pub mod account;
pub mod statements;
pub mod template;
pub mod transaction;

pub use account::{Account, AccountId, AccountSubType, AccountType, ChartOfAccounts};
pub use statements::{
    BalanceSheet, Buckets, CashFlowStatement, HistoricalData, IncomeStatement, OpeningBalances,
    Statements,
};
pub use template::{TemplateCategory, TemplateRegistry, TransactionTemplate};
pub use transaction::{JournalEntry, Transaction, TransactionId};
