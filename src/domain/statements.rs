use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::account::AccountId;

/// Per-account balances of a statement section, keyed by the stable account
/// id. Display names resolve through the chart of accounts at presentation
/// time.
pub type Buckets = BTreeMap<AccountId, i64>;

/// Assets, liabilities, and equity as of the end of the derived window.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalanceSheet {
    pub current_assets: Buckets,
    pub fixed_assets: Buckets,
    pub current_liabilities: Buckets,
    pub fixed_liabilities: Buckets,
    pub capital_stock: i64,
    pub retained_earnings: i64,
    pub total_assets: i64,
    pub total_liabilities: i64,
    pub total_equity: i64,
}

/// Revenues and expenses of the derived window, with the stepwise rollups
/// from gross profit down to net income.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IncomeStatement {
    pub revenue: Buckets,
    pub non_operating_revenue: Buckets,
    pub extraordinary_profit: Buckets,
    pub cost_of_sales: Buckets,
    pub selling_general_admin: Buckets,
    pub non_operating_expenses: Buckets,
    pub extraordinary_losses: Buckets,
    pub income_taxes: Buckets,
    pub total_revenue: i64,
    pub total_cost_of_sales: i64,
    pub gross_profit: i64,
    pub total_selling_general_admin: i64,
    pub operating_income: i64,
    pub total_non_operating_revenue: i64,
    pub total_non_operating_expenses: i64,
    pub ordinary_income: i64,
    pub total_extraordinary_profit: i64,
    pub total_extraordinary_losses: i64,
    pub pre_tax_income: i64,
    pub total_tax: i64,
    pub total_expenses: i64,
    pub net_income: i64,
}

/// Cash movement of the derived window, classified by activity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CashFlowStatement {
    pub operating_activities: i64,
    pub investing_activities: i64,
    pub financing_activities: i64,
    pub net_cash_flow: i64,
    pub beginning_cash_balance: i64,
    pub ending_cash_balance: i64,
}

/// The three statements derived from one journal window.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Statements {
    pub balance_sheet: BalanceSheet,
    pub income_statement: IncomeStatement,
    pub cash_flow: CashFlowStatement,
}

/// Balances carried into a period from the previous period's close.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpeningBalances {
    pub retained_earnings: i64,
    pub cash: i64,
}

/// Immutable snapshot of a closed period, kept in the history store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoricalData {
    pub period_label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub balance_sheet: BalanceSheet,
    pub income_statement: IncomeStatement,
    pub cash_flow: CashFlowStatement,
}
