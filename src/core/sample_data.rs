//! Demo-environment seeding: the scripted opening transactions, monthly
//! filler postings up to the current date, and the canned first-period
//! history snapshot.
//!
//! Seeding goes through the ordinary session write API, so everything it
//! records passes the same validation as user input. The fiscal start is
//! configured with the sample flag, which skips fast-forwarding and keeps
//! historical demo dates unmodified.

use chrono::{Datelike, NaiveDate};
use tracing::info;

use crate::domain::account::standard;
use crate::domain::{HistoricalData, JournalEntry};
use crate::errors::Result;
use crate::AccountingSession;

/// Monthly filler amounts: one cash sale and one cash purchase per month.
const MONTHLY_SALE: i64 = 400_000;
const MONTHLY_PURCHASE: i64 = 250_000;

/// Resets the fiscal period and seeds the session with sample data anchored
/// at `start_date`. Intended for a freshly constructed session.
pub fn seed(session: &mut AccountingSession, start_date: NaiveDate) -> Result<()> {
    session.reset_fiscal_period()?;
    session.clear_history();
    session.set_use_sample_data(true)?;
    session.set_fiscal_start_date(start_date, true)?;

    seed_opening_script(session, start_date)?;
    seed_monthly_fillers(session, start_date)?;

    info!(
        transactions = session.transactions().len(),
        label = %session.fiscal_period_label(),
        "sample data seeded"
    );
    Ok(())
}

/// The seven scripted transactions of the demo walkthrough, re-dated
/// relative to the period start.
fn seed_opening_script(session: &mut AccountingSession, start_date: NaiveDate) -> Result<()> {
    let day = |offset: i64| start_date + chrono::Duration::days(offset);

    session.add_transaction(
        day(0),
        "事業開始のため、資本金1,000,000円を現金で受け入れた",
        vec![
            JournalEntry::debit(standard::CASH, 1_000_000),
            JournalEntry::credit(standard::CAPITAL_STOCK, 1_000_000),
        ],
    )?;
    session.add_transaction(
        day(4),
        "商品を500,000円で現金で仕入れた",
        vec![
            JournalEntry::debit(standard::PURCHASES, 500_000),
            JournalEntry::credit(standard::CASH, 500_000),
        ],
    )?;
    session.add_transaction(
        day(14),
        "商品を800,000円で売上げ、代金は掛けとした",
        vec![
            JournalEntry::debit(standard::ACCOUNTS_RECEIVABLE, 800_000),
            JournalEntry::credit(standard::SALES, 800_000),
        ],
    )?;
    session.add_transaction(
        day(24),
        "従業員の給料200,000円を現金で支払った",
        vec![
            JournalEntry::debit(standard::SALARIES, 200_000),
            JournalEntry::credit(standard::CASH, 200_000),
        ],
    )?;
    session.add_transaction(
        day(29),
        "備品300,000円を現金で購入した",
        vec![
            JournalEntry::debit(standard::EQUIPMENT, 300_000),
            JournalEntry::credit(standard::CASH, 300_000),
        ],
    )?;
    session.add_transaction(
        day(30),
        "銀行から長期資金として500,000円を借り入れた",
        vec![
            JournalEntry::debit(standard::CASH, 500_000),
            JournalEntry::credit(standard::LOANS_PAYABLE, 500_000),
        ],
    )?;
    session.add_transaction(
        day(39),
        "事務用品50,000円を掛けで購入した",
        vec![
            JournalEntry::debit(standard::SUPPLIES_EXPENSE, 50_000),
            JournalEntry::credit(standard::ACCOUNTS_PAYABLE, 50_000),
        ],
    )?;
    Ok(())
}

/// Fabricates one sale and one purchase per month, starting two months
/// after the period start (the scripted transactions cover the first
/// weeks) and stopping at today or the period end, whichever comes first.
fn seed_monthly_fillers(session: &mut AccountingSession, start_date: NaiveDate) -> Result<()> {
    let today = session.today();
    let Some(end_date) = session.fiscal_period().end_date() else {
        return Ok(());
    };
    let horizon = today.min(end_date);

    let mut month = 2u32;
    loop {
        let posting_date = add_months(start_date, month);
        if posting_date > horizon {
            break;
        }
        session.add_from_template("revenue-cash", MONTHLY_SALE, posting_date, "月次売上")?;
        session.add_from_template(
            "expense-cogs-cash",
            MONTHLY_PURCHASE,
            posting_date,
            "月次仕入",
        )?;
        month += 1;
    }
    Ok(())
}

/// Pushes the canned first-period snapshot into the session history.
pub fn seed_history(session: &mut AccountingSession) {
    session.push_history_snapshot(first_period_snapshot());
}

/// The demo's pre-closed first period: capital of 1,000,000, one credit
/// sale, one cash purchase, salaries, and a year-end loan.
pub fn first_period_snapshot() -> HistoricalData {
    use crate::domain::{BalanceSheet, CashFlowStatement, IncomeStatement};

    let mut balance_sheet = BalanceSheet {
        capital_stock: 1_000_000,
        retained_earnings: 250_000,
        total_assets: 1_750_000,
        total_liabilities: 500_000,
        total_equity: 1_250_000,
        ..BalanceSheet::default()
    };
    balance_sheet
        .current_assets
        .insert(standard::CASH, 1_750_000);
    balance_sheet
        .fixed_liabilities
        .insert(standard::LOANS_PAYABLE, 500_000);

    let mut income_statement = IncomeStatement {
        total_revenue: 800_000,
        total_cost_of_sales: 500_000,
        gross_profit: 300_000,
        total_selling_general_admin: 200_000,
        operating_income: 100_000,
        ordinary_income: 100_000,
        pre_tax_income: 100_000,
        total_expenses: 700_000,
        net_income: 100_000,
        ..IncomeStatement::default()
    };
    income_statement.revenue.insert(standard::SALES, 800_000);
    income_statement
        .cost_of_sales
        .insert(standard::PURCHASES, 500_000);
    income_statement
        .selling_general_admin
        .insert(standard::SALARIES, 200_000);

    let cash_flow = CashFlowStatement {
        operating_activities: 100_000,
        investing_activities: 0,
        financing_activities: 500_000,
        net_cash_flow: 600_000,
        beginning_cash_balance: 1_150_000,
        ending_cash_balance: 1_750_000,
    };

    HistoricalData {
        period_label: "第1期 (2024/4/1 - 2025/3/31)".into(),
        start_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap_or_default(),
        end_date: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap_or_default(),
        balance_sheet,
        income_statement,
        cash_flow,
    }
}

/// Month addition keeping the day of month; an invalid target day falls
/// back to the source date.
fn add_months(from: NaiveDate, months: u32) -> NaiveDate {
    let mut year = from.year();
    let mut month = from.month() as i32 + months as i32;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    NaiveDate::from_ymd_opt(year, month as u32, from.day()).unwrap_or(from)
}
