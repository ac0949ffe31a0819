//! Building blocks of the period close: the synthetic transaction that
//! zeroes the temporary accounts into retained earnings, and the query that
//! detects whether the current period already carries one.

use chrono::NaiveDate;

use crate::domain::{Buckets, ChartOfAccounts, IncomeStatement, JournalEntry};
use crate::ledger::Journal;

/// Description of the synthetic income-to-equity transfer. Doubles as the
/// marker the already-closed query looks for.
pub const CLOSING_DESCRIPTION: &str = "決算整理仕訳（損益振替）";

/// Description of the corporate-tax accrual posting.
pub const TAX_ACCRUAL_DESCRIPTION: &str = "法人税等の計上";

/// Simplified corporate tax: 30% of pre-tax income, floored to whole yen.
pub fn tax_on(pre_tax_income: i64) -> i64 {
    pre_tax_income * 3 / 10
}

/// Builds the entry set that zeroes every non-zero revenue and expense
/// bucket and transfers net income to retained earnings.
///
/// Revenue balances close with a debit, expense balances with a credit; a
/// negative balance flips to the opposite side, so the resulting set always
/// balances by construction. Zero balances produce no entry. An all-zero
/// income statement yields an empty set, in which case there is nothing to
/// post.
pub fn closing_entries(
    chart: &ChartOfAccounts,
    income_statement: &IncomeStatement,
) -> Vec<JournalEntry> {
    let mut entries = Vec::new();

    let revenue_buckets: [&Buckets; 3] = [
        &income_statement.revenue,
        &income_statement.non_operating_revenue,
        &income_statement.extraordinary_profit,
    ];
    for bucket in revenue_buckets {
        for (&account_id, &balance) in bucket {
            if balance > 0 {
                entries.push(JournalEntry::debit(account_id, balance));
            } else if balance < 0 {
                entries.push(JournalEntry::credit(account_id, -balance));
            }
        }
    }

    let expense_buckets: [&Buckets; 5] = [
        &income_statement.cost_of_sales,
        &income_statement.selling_general_admin,
        &income_statement.non_operating_expenses,
        &income_statement.extraordinary_losses,
        &income_statement.income_taxes,
    ];
    for bucket in expense_buckets {
        for (&account_id, &balance) in bucket {
            if balance > 0 {
                entries.push(JournalEntry::credit(account_id, balance));
            } else if balance < 0 {
                entries.push(JournalEntry::debit(account_id, -balance));
            }
        }
    }

    let net_income = income_statement.net_income;
    if net_income > 0 {
        entries.push(JournalEntry::credit(
            chart.retained_earnings_id(),
            net_income,
        ));
    } else if net_income < 0 {
        entries.push(JournalEntry::debit(
            chart.retained_earnings_id(),
            -net_income,
        ));
    }

    entries
}

/// True when the window already contains a closing transaction.
pub fn has_closing_transaction(journal: &Journal, window: (NaiveDate, NaiveDate)) -> bool {
    let (start, end) = window;
    journal.transactions().iter().any(|transaction| {
        transaction.description == CLOSING_DESCRIPTION
            && start <= transaction.transaction_date
            && transaction.transaction_date <= end
    })
}
