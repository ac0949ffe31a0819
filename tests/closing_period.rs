mod common;

use accounting_core::core::{derive, CLOSING_DESCRIPTION};
use accounting_core::domain::OpeningBalances;
use accounting_core::ledger::FiscalPeriod;
use accounting_core::AccountingError;

use common::{sample_date, session_at};

fn traded_session() -> accounting_core::AccountingSession {
    let mut session = session_at(sample_date(2024, 6, 1));
    session
        .set_fiscal_start_date(sample_date(2024, 4, 1), false)
        .expect("configure period");
    session
        .add_from_template("financing-capital", 1_000_000, sample_date(2024, 4, 1), "出資")
        .expect("capital");
    session
        .add_from_template("revenue-cash", 800_000, sample_date(2024, 4, 15), "売上")
        .expect("sale");
    session
        .add_from_template("expense-cogs-cash", 500_000, sample_date(2024, 4, 20), "仕入")
        .expect("purchase");
    session
}

#[test]
fn closing_transaction_itself_balances() {
    let mut session = traded_session();
    session.close_period().expect("close period");

    let closing = session
        .transactions()
        .iter()
        .find(|transaction| transaction.description == CLOSING_DESCRIPTION)
        .expect("closing transaction exists");
    assert!(closing.is_balanced());
    assert!(closing.debit_total() > 0);
    assert!(session
        .fiscal_period()
        .original_start_date()
        .is_some());
}

#[test]
fn rederiving_the_closed_window_zeroes_temporary_accounts() {
    let mut session = traded_session();
    session.close_period().expect("close period");

    let mut previous = FiscalPeriod::new();
    previous.set_start_date(sample_date(2024, 4, 1), true, sample_date(2024, 6, 1));
    let statements = derive(
        session.chart(),
        session.journal(),
        &previous,
        &OpeningBalances::default(),
    );
    for (account_id, balance) in &statements.income_statement.revenue {
        assert_eq!(*balance, 0, "revenue bucket {account_id} not zeroed");
    }
    for (account_id, balance) in &statements.income_statement.cost_of_sales {
        assert_eq!(*balance, 0, "expense bucket {account_id} not zeroed");
    }
    assert_eq!(statements.income_statement.net_income, 0);
    assert_eq!(statements.balance_sheet.retained_earnings, 300_000);
}

#[test]
fn close_without_configuration_fails() {
    let mut session = session_at(sample_date(2024, 6, 1));
    assert!(matches!(
        session.close_period(),
        Err(AccountingError::PeriodNotConfigured)
    ));
    assert!(session.history().is_empty());
}

#[test]
fn close_is_guarded_against_repetition_within_a_window() {
    let mut session = traded_session();
    assert!(!session.has_closed_current_period());
    session.close_period().expect("close period");

    // The tracker moved on, so the marker query now scopes to the new
    // window; a fresh session replaying the journal in the old window sees
    // the close and refuses another.
    let mut replay = session_at(sample_date(2024, 6, 1));
    replay
        .set_fiscal_start_date(sample_date(2024, 4, 1), true)
        .expect("configure period");
    for transaction in session.transactions() {
        replay
            .add_transaction(
                transaction.transaction_date,
                transaction.description.clone(),
                transaction.entries.clone(),
            )
            .expect("replay transaction");
    }
    assert!(replay.has_closed_current_period());
    assert!(matches!(
        replay.close_period(),
        Err(AccountingError::AlreadyClosed)
    ));
}

#[test]
fn closing_a_sample_period_in_the_past_stays_in_window() {
    // Today is long past the sample window; the closing entry must still
    // land inside the period it closes.
    let mut session = session_at(sample_date(2026, 8, 4));
    session
        .set_fiscal_start_date(sample_date(2023, 4, 1), true)
        .expect("configure sample period");
    session
        .add_from_template("revenue-cash", 200_000, sample_date(2023, 5, 1), "売上")
        .expect("sale");

    session.close_period().expect("close period");
    let closing = session
        .transactions()
        .iter()
        .find(|transaction| transaction.description == CLOSING_DESCRIPTION)
        .expect("closing transaction exists");
    assert_eq!(closing.transaction_date, sample_date(2024, 3, 31));
}

#[test]
fn consecutive_periods_accumulate_history_and_retained_earnings() {
    let mut session = traded_session();
    session.close_period().expect("close first period");
    session
        .add_from_template("revenue-cash", 400_000, sample_date(2025, 4, 10), "翌期売上")
        .expect("second-period sale");
    let second = session.close_period().expect("close second period");

    assert_eq!(session.history().len(), 2);
    assert!(session.history()[0].period_label.starts_with("第1期"));
    assert!(session.history()[1].period_label.starts_with("第2期"));
    assert!(session.fiscal_period_label().starts_with("第3期"));
    // 300,000 carried in plus 400,000 earned.
    assert_eq!(second.balance_sheet.retained_earnings, 700_000);
    assert_eq!(session.opening_balances().retained_earnings, 700_000);
}
