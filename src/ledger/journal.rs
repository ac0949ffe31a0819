use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{ChartOfAccounts, JournalEntry, TemplateRegistry, Transaction, TransactionId};
use crate::errors::{AccountingError, Result};

/// Append-only list of transactions, and the single enforcement point for
/// the double-entry invariant: every stored transaction has at least two
/// entries, each entry carries exactly one positive amount against a known
/// account, and debits equal credits with a positive total.
#[derive(Debug, Clone)]
pub struct Journal {
    transactions: Vec<Transaction>,
    next_transaction_id: TransactionId,
}

impl Journal {
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            next_transaction_id: 1,
        }
    }

    /// Validates and appends a transaction, assigning the next id.
    pub fn add_transaction(
        &mut self,
        chart: &ChartOfAccounts,
        date: NaiveDate,
        description: impl Into<String>,
        mut entries: Vec<JournalEntry>,
    ) -> Result<&Transaction> {
        validate_entries(chart, &entries)?;
        number_entries(&mut entries);

        let transaction_id = self.next_transaction_id;
        self.next_transaction_id += 1;
        let transaction = Transaction {
            transaction_id,
            transaction_date: date,
            description: description.into(),
            entries,
        };
        debug!(transaction_id, date = %date, "journal: transaction added");
        let index = self.transactions.len();
        self.transactions.push(transaction);
        Ok(&self.transactions[index])
    }

    /// Replaces the date, description, and full entry set of an existing
    /// transaction. The id and the insertion position are preserved.
    pub fn update_transaction(
        &mut self,
        chart: &ChartOfAccounts,
        id: TransactionId,
        date: NaiveDate,
        description: impl Into<String>,
        mut entries: Vec<JournalEntry>,
    ) -> Result<&Transaction> {
        validate_entries(chart, &entries)?;

        let transaction = self
            .transactions
            .iter_mut()
            .find(|transaction| transaction.transaction_id == id)
            .ok_or(AccountingError::TransactionNotFound(id))?;

        number_entries(&mut entries);
        transaction.transaction_date = date;
        transaction.description = description.into();
        transaction.entries = entries;
        debug!(transaction_id = id, date = %date, "journal: transaction updated");
        Ok(transaction)
    }

    /// Resolves a template into a balanced two-entry transaction of the
    /// given amount and appends it.
    pub fn add_from_template(
        &mut self,
        chart: &ChartOfAccounts,
        templates: &TemplateRegistry,
        template_id: &str,
        amount: i64,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Result<&Transaction> {
        if amount <= 0 {
            return Err(AccountingError::Validation(
                "template amount must be positive".into(),
            ));
        }
        let template = templates
            .lookup(template_id)
            .ok_or_else(|| AccountingError::TemplateNotFound(template_id.into()))?;

        let entries = vec![
            JournalEntry::debit(template.debit_account_id, amount),
            JournalEntry::credit(template.credit_account_id, amount),
        ];
        self.add_transaction(chart, date, description, entries)
    }

    /// Transactions in insertion order (not necessarily date order).
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|transaction| transaction.transaction_id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

impl Default for Journal {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_entries(chart: &ChartOfAccounts, entries: &[JournalEntry]) -> Result<()> {
    if entries.is_empty() {
        return Err(AccountingError::Validation(
            "transaction has no entries".into(),
        ));
    }
    if entries.len() < 2 {
        return Err(AccountingError::Validation(
            "transaction needs at least two entries".into(),
        ));
    }

    for entry in entries {
        if entry.debit_amount < 0 || entry.credit_amount < 0 {
            return Err(AccountingError::Validation(format!(
                "entry against account {} has a negative amount",
                entry.account_id
            )));
        }
        match (entry.debit_amount, entry.credit_amount) {
            (0, 0) => {
                return Err(AccountingError::Validation(format!(
                    "entry against account {} has no amount",
                    entry.account_id
                )))
            }
            (debit, credit) if debit != 0 && credit != 0 => {
                return Err(AccountingError::Validation(format!(
                    "entry against account {} is both debit and credit",
                    entry.account_id
                )))
            }
            _ => {}
        }
        if chart.lookup(entry.account_id).is_none() {
            return Err(AccountingError::AccountNotFound(entry.account_id));
        }
    }

    let debit_total: i64 = entries.iter().map(|entry| entry.debit_amount).sum();
    let credit_total: i64 = entries.iter().map(|entry| entry.credit_amount).sum();
    if debit_total != credit_total {
        return Err(AccountingError::Validation(format!(
            "debits ({debit_total}) do not equal credits ({credit_total})"
        )));
    }
    if debit_total == 0 {
        return Err(AccountingError::Validation(
            "transaction total must be positive".into(),
        ));
    }
    Ok(())
}

fn number_entries(entries: &mut [JournalEntry]) {
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.entry_id = index as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::standard;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn chart() -> ChartOfAccounts {
        ChartOfAccounts::standard()
    }

    fn balanced_entries() -> Vec<JournalEntry> {
        vec![
            JournalEntry::debit(standard::CASH, 1_000_000),
            JournalEntry::credit(standard::CAPITAL_STOCK, 1_000_000),
        ]
    }

    #[test]
    fn add_assigns_monotonic_ids_and_numbers_entries() {
        let chart = chart();
        let mut journal = Journal::new();
        let first = journal
            .add_transaction(&chart, date(2024, 4, 1), "出資", balanced_entries())
            .unwrap()
            .transaction_id;
        let second = journal
            .add_transaction(&chart, date(2024, 4, 2), "出資", balanced_entries())
            .unwrap()
            .transaction_id;
        assert_eq!(first, 1);
        assert_eq!(second, 2);
        let stored = journal.transaction(second).unwrap();
        assert_eq!(stored.entries[0].entry_id, 0);
        assert_eq!(stored.entries[1].entry_id, 1);
    }

    #[test]
    fn rejects_unbalanced_entries() {
        let chart = chart();
        let mut journal = Journal::new();
        let entries = vec![
            JournalEntry::debit(standard::CASH, 500),
            JournalEntry::credit(standard::SALES, 400),
        ];
        let err = journal
            .add_transaction(&chart, date(2024, 4, 1), "bad", entries)
            .expect_err("unbalanced must fail");
        assert!(matches!(err, AccountingError::Validation(_)));
        assert!(journal.is_empty());
    }

    #[test]
    fn rejects_empty_and_single_entry_sets() {
        let chart = chart();
        let mut journal = Journal::new();
        assert!(journal
            .add_transaction(&chart, date(2024, 4, 1), "empty", Vec::new())
            .is_err());
        assert!(journal
            .add_transaction(
                &chart,
                date(2024, 4, 1),
                "single",
                vec![JournalEntry::debit(standard::CASH, 100)],
            )
            .is_err());
    }

    #[test]
    fn rejects_entry_with_both_sides_or_no_amount() {
        let chart = chart();
        let mut journal = Journal::new();
        let both = JournalEntry {
            entry_id: 0,
            account_id: standard::CASH,
            debit_amount: 100,
            credit_amount: 100,
        };
        assert!(journal
            .add_transaction(
                &chart,
                date(2024, 4, 1),
                "both sides",
                vec![both, JournalEntry::credit(standard::SALES, 0)],
            )
            .is_err());
        let entries = vec![
            JournalEntry::debit(standard::CASH, 0),
            JournalEntry::credit(standard::SALES, 0),
        ];
        assert!(journal
            .add_transaction(&chart, date(2024, 4, 1), "zero", entries)
            .is_err());
    }

    #[test]
    fn rejects_unknown_account() {
        let chart = chart();
        let mut journal = Journal::new();
        let entries = vec![
            JournalEntry::debit(999, 500),
            JournalEntry::credit(standard::SALES, 500),
        ];
        let err = journal
            .add_transaction(&chart, date(2024, 4, 1), "ghost", entries)
            .expect_err("unknown account must fail");
        assert!(matches!(err, AccountingError::AccountNotFound(999)));
    }

    #[test]
    fn update_replaces_fields_in_place() {
        let chart = chart();
        let mut journal = Journal::new();
        let id = journal
            .add_transaction(&chart, date(2024, 4, 1), "before", balanced_entries())
            .unwrap()
            .transaction_id;
        journal
            .add_transaction(&chart, date(2024, 4, 2), "other", balanced_entries())
            .unwrap();

        let entries = vec![
            JournalEntry::debit(standard::PURCHASES, 200),
            JournalEntry::credit(standard::CASH, 200),
        ];
        journal
            .update_transaction(&chart, id, date(2024, 5, 1), "after", entries)
            .unwrap();

        let ids: Vec<_> = journal
            .transactions()
            .iter()
            .map(|transaction| transaction.transaction_id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
        let updated = journal.transaction(id).unwrap();
        assert_eq!(updated.description, "after");
        assert_eq!(updated.transaction_date, date(2024, 5, 1));
        assert_eq!(updated.entries.len(), 2);
    }

    #[test]
    fn update_fails_for_missing_transaction() {
        let chart = chart();
        let mut journal = Journal::new();
        let err = journal
            .update_transaction(&chart, 42, date(2024, 4, 1), "none", balanced_entries())
            .expect_err("update must fail for unknown id");
        assert!(matches!(err, AccountingError::TransactionNotFound(42)));
    }

    #[test]
    fn template_builds_balanced_transaction() {
        let chart = chart();
        let templates = TemplateRegistry::standard();
        let mut journal = Journal::new();
        let transaction = journal
            .add_from_template(
                &chart,
                &templates,
                "revenue-cash",
                300_000,
                date(2024, 4, 10),
                "現金での売上",
            )
            .unwrap();
        assert!(transaction.is_balanced());
        assert_eq!(transaction.debit_total(), 300_000);
        assert_eq!(transaction.entries[0].account_id, standard::CASH);
        assert_eq!(transaction.entries[1].account_id, standard::SALES);
    }

    #[test]
    fn template_rejects_unknown_id_and_non_positive_amount() {
        let chart = chart();
        let templates = TemplateRegistry::standard();
        let mut journal = Journal::new();
        assert!(matches!(
            journal.add_from_template(&chart, &templates, "bogus", 100, date(2024, 4, 1), ""),
            Err(AccountingError::TemplateNotFound(_))
        ));
        assert!(matches!(
            journal.add_from_template(
                &chart,
                &templates,
                "revenue-cash",
                0,
                date(2024, 4, 1),
                ""
            ),
            Err(AccountingError::Validation(_))
        ));
        assert!(journal.is_empty());
    }
}
