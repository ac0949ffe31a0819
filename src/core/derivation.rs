//! Pure derivation of the three statements from the journal.
//!
//! Derivation is a read path backing a live view: it never fails. Malformed
//! input (an unresolvable account id, an entry with no amount) is skipped
//! with a logged warning, and an unset fiscal period yields the empty
//! statement shape.

use tracing::warn;

use crate::domain::{
    AccountSubType, AccountType, BalanceSheet, Buckets, CashFlowStatement, ChartOfAccounts,
    IncomeStatement, OpeningBalances, Statements, Transaction,
};
use crate::ledger::{FiscalPeriod, Journal};

/// Folds the in-period journal into the balance sheet, income statement, and
/// cash flow statement. `opening` carries the previous period's closing
/// retained earnings and cash balance.
pub fn derive(
    chart: &ChartOfAccounts,
    journal: &Journal,
    period: &FiscalPeriod,
    opening: &OpeningBalances,
) -> Statements {
    let Some((start, end)) = period.window() else {
        return Statements::default();
    };

    let in_period: Vec<&Transaction> = journal
        .transactions()
        .iter()
        .filter(|transaction| {
            start <= transaction.transaction_date && transaction.transaction_date <= end
        })
        .collect();

    let mut balance_sheet = BalanceSheet::default();
    let mut income_statement = IncomeStatement::default();

    for transaction in &in_period {
        for entry in &transaction.entries {
            let Some(account) = chart.lookup(entry.account_id) else {
                warn!(
                    account_id = entry.account_id,
                    transaction_id = transaction.transaction_id,
                    "derivation: unknown account id, entry skipped"
                );
                continue;
            };
            if entry.debit_amount == 0 && entry.credit_amount == 0 {
                warn!(
                    account_id = entry.account_id,
                    transaction_id = transaction.transaction_id,
                    "derivation: entry without amount skipped"
                );
                continue;
            }

            let amount = entry.signed_amount();
            match account.account_type {
                AccountType::Asset => {
                    let bucket = if account.sub_type == Some(AccountSubType::Current) {
                        &mut balance_sheet.current_assets
                    } else {
                        &mut balance_sheet.fixed_assets
                    };
                    *bucket.entry(account.id).or_insert(0) += amount;
                }
                AccountType::Liability => {
                    let bucket = if account.sub_type == Some(AccountSubType::Current) {
                        &mut balance_sheet.current_liabilities
                    } else {
                        &mut balance_sheet.fixed_liabilities
                    };
                    *bucket.entry(account.id).or_insert(0) -= amount;
                }
                AccountType::Equity => {
                    if account.id == chart.capital_stock_id() {
                        balance_sheet.capital_stock -= amount;
                    } else {
                        balance_sheet.retained_earnings -= amount;
                    }
                }
                AccountType::Revenue => {
                    let bucket = match account.sub_type {
                        Some(AccountSubType::NonOperatingRevenue) => {
                            &mut income_statement.non_operating_revenue
                        }
                        Some(AccountSubType::ExtraordinaryProfit) => {
                            &mut income_statement.extraordinary_profit
                        }
                        _ => &mut income_statement.revenue,
                    };
                    *bucket.entry(account.id).or_insert(0) -= amount;
                }
                AccountType::Expense => {
                    let bucket = match account.sub_type {
                        Some(AccountSubType::CostOfSales) => &mut income_statement.cost_of_sales,
                        Some(AccountSubType::Tax) => &mut income_statement.income_taxes,
                        Some(AccountSubType::NonOperatingExpense) => {
                            &mut income_statement.non_operating_expenses
                        }
                        Some(AccountSubType::ExtraordinaryLoss) => {
                            &mut income_statement.extraordinary_losses
                        }
                        _ => &mut income_statement.selling_general_admin,
                    };
                    *bucket.entry(account.id).or_insert(0) += amount;
                }
            }
        }
    }

    roll_up_income(&mut income_statement);
    roll_up_balance(&mut balance_sheet, &income_statement, opening);
    let cash_flow = derive_cash_flow(chart, &in_period, &balance_sheet, opening);

    Statements {
        balance_sheet,
        income_statement,
        cash_flow,
    }
}

fn sum(bucket: &Buckets) -> i64 {
    bucket.values().sum()
}

/// Stepwise rollups: gross profit, operating income, ordinary income,
/// pre-tax income, net income. `total_expenses` sums the five expense
/// families so the flat form (all revenues minus all expenses) agrees with
/// the stepwise result.
fn roll_up_income(income_statement: &mut IncomeStatement) {
    let is = income_statement;
    is.total_revenue = sum(&is.revenue);
    is.total_cost_of_sales = sum(&is.cost_of_sales);
    is.gross_profit = is.total_revenue - is.total_cost_of_sales;
    is.total_selling_general_admin = sum(&is.selling_general_admin);
    is.operating_income = is.gross_profit - is.total_selling_general_admin;
    is.total_non_operating_revenue = sum(&is.non_operating_revenue);
    is.total_non_operating_expenses = sum(&is.non_operating_expenses);
    is.ordinary_income =
        is.operating_income + is.total_non_operating_revenue - is.total_non_operating_expenses;
    is.total_extraordinary_profit = sum(&is.extraordinary_profit);
    is.total_extraordinary_losses = sum(&is.extraordinary_losses);
    is.pre_tax_income =
        is.ordinary_income + is.total_extraordinary_profit - is.total_extraordinary_losses;
    is.total_tax = sum(&is.income_taxes);
    is.total_expenses = is.total_cost_of_sales
        + is.total_selling_general_admin
        + is.total_non_operating_expenses
        + is.total_extraordinary_losses
        + is.total_tax;
    is.net_income = is.pre_tax_income - is.total_tax;
}

fn roll_up_balance(
    balance_sheet: &mut BalanceSheet,
    income_statement: &IncomeStatement,
    opening: &OpeningBalances,
) {
    let bs = balance_sheet;
    bs.total_assets = sum(&bs.current_assets) + sum(&bs.fixed_assets);
    bs.total_liabilities = sum(&bs.current_liabilities) + sum(&bs.fixed_liabilities);
    bs.retained_earnings += opening.retained_earnings + income_statement.net_income;
    bs.total_equity = bs.capital_stock + bs.retained_earnings;
}

/// Classifies each cash-touching transaction by its non-cash counter
/// entries: any fixed asset means investing, otherwise any fixed liability
/// or equity account means financing, otherwise operating. Transfers between
/// cash accounts contribute nothing.
fn derive_cash_flow(
    chart: &ChartOfAccounts,
    in_period: &[&Transaction],
    balance_sheet: &BalanceSheet,
    opening: &OpeningBalances,
) -> CashFlowStatement {
    let mut operating = 0;
    let mut investing = 0;
    let mut financing = 0;

    for transaction in in_period {
        let cash_movement: i64 = transaction
            .entries
            .iter()
            .filter(|entry| chart.is_cash_account(entry.account_id))
            .map(|entry| entry.signed_amount())
            .sum();
        let has_cash_entry = transaction
            .entries
            .iter()
            .any(|entry| chart.is_cash_account(entry.account_id));
        if !has_cash_entry {
            continue;
        }

        let non_cash: Vec<_> = transaction
            .entries
            .iter()
            .filter(|entry| !chart.is_cash_account(entry.account_id))
            .filter_map(|entry| chart.lookup(entry.account_id))
            .collect();
        if non_cash.is_empty() {
            // Pure cash transfer.
            continue;
        }

        let is_investing = non_cash.iter().any(|account| {
            account.account_type == AccountType::Asset
                && account.sub_type == Some(AccountSubType::Fixed)
        });
        let is_financing = non_cash.iter().any(|account| {
            (account.account_type == AccountType::Liability
                && account.sub_type == Some(AccountSubType::Fixed))
                || account.account_type == AccountType::Equity
        });

        if is_investing {
            investing += cash_movement;
        } else if is_financing {
            financing += cash_movement;
        } else {
            operating += cash_movement;
        }
    }

    let ending_cash_balance: i64 = chart
        .cash_accounts()
        .map(|id| {
            balance_sheet.current_assets.get(&id).copied().unwrap_or(0)
                + balance_sheet.fixed_assets.get(&id).copied().unwrap_or(0)
        })
        .sum();

    let net_cash_flow = operating + investing + financing;
    if ending_cash_balance != opening.cash + net_cash_flow {
        warn!(
            ending_cash_balance,
            beginning_cash_balance = opening.cash,
            net_cash_flow,
            "derivation: cash flow classification diverges from balance sheet cash"
        );
    }

    CashFlowStatement {
        operating_activities: operating,
        investing_activities: investing,
        financing_activities: financing,
        net_cash_flow,
        beginning_cash_balance: opening.cash,
        ending_cash_balance,
    }
}
