use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Stable numeric identifier of an account in the chart of accounts.
pub type AccountId = u32;

/// Statement-side classification of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

/// Finer classification used to place an account into a statement bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountSubType {
    Current,
    Fixed,
    CostOfSales,
    SellingGeneralAdmin,
    Tax,
    NonOperatingExpense,
    ExtraordinaryLoss,
    NonOperatingRevenue,
    ExtraordinaryProfit,
}

/// Immutable reference data describing one account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub account_type: AccountType,
    pub sub_type: Option<AccountSubType>,
}

impl Account {
    pub fn new(
        id: AccountId,
        name: impl Into<String>,
        account_type: AccountType,
        sub_type: Option<AccountSubType>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            account_type,
            sub_type,
        }
    }
}

/// Well-known account ids of the standard chart.
pub mod standard {
    use super::AccountId;

    pub const CASH: AccountId = 1;
    pub const ACCOUNTS_RECEIVABLE: AccountId = 2;
    pub const INVENTORY: AccountId = 3;
    pub const ACCOUNTS_PAYABLE: AccountId = 4;
    pub const LOANS_PAYABLE: AccountId = 5;
    pub const CAPITAL_STOCK: AccountId = 6;
    pub const SALES: AccountId = 7;
    pub const PURCHASES: AccountId = 8;
    pub const SALARIES: AccountId = 9;
    pub const EQUIPMENT: AccountId = 10;
    pub const SUPPLIES_EXPENSE: AccountId = 11;
    pub const INTEREST_EXPENSE: AccountId = 12;
    pub const INCOME_TAXES: AccountId = 13;
    pub const ACCRUED_INCOME_TAXES: AccountId = 14;
    pub const RETAINED_EARNINGS: AccountId = 15;
}

/// Read-only registry mapping account ids to their classification.
///
/// Besides classification, the chart designates the structural accounts the
/// derivation and closing procedures need: the cash accounts (cash-flow
/// scoping), the capital-stock account, and the retained-earnings account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChartOfAccounts {
    accounts: Vec<Account>,
    cash_accounts: BTreeSet<AccountId>,
    capital_stock: AccountId,
    retained_earnings: AccountId,
    tax_accounts: Option<(AccountId, AccountId)>,
}

impl ChartOfAccounts {
    pub fn new(
        accounts: Vec<Account>,
        cash_accounts: impl IntoIterator<Item = AccountId>,
        capital_stock: AccountId,
        retained_earnings: AccountId,
    ) -> Self {
        Self {
            accounts,
            cash_accounts: cash_accounts.into_iter().collect(),
            capital_stock,
            retained_earnings,
            tax_accounts: None,
        }
    }

    /// Designates the expense and liability accounts the tax accrual posts
    /// against.
    pub fn with_tax_accounts(mut self, tax_expense: AccountId, accrued_taxes: AccountId) -> Self {
        self.tax_accounts = Some((tax_expense, accrued_taxes));
        self
    }

    /// The fifteen-account chart used by the bookkeeping front end.
    pub fn standard() -> Self {
        STANDARD_CHART.clone()
    }

    pub fn lookup(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    /// Accounts in registration order.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn is_cash_account(&self, id: AccountId) -> bool {
        self.cash_accounts.contains(&id)
    }

    pub fn cash_accounts(&self) -> impl Iterator<Item = AccountId> + '_ {
        self.cash_accounts.iter().copied()
    }

    pub fn capital_stock_id(&self) -> AccountId {
        self.capital_stock
    }

    pub fn retained_earnings_id(&self) -> AccountId {
        self.retained_earnings
    }

    /// `(tax expense, accrued taxes)` pair, when the chart designates one.
    pub fn tax_account_ids(&self) -> Option<(AccountId, AccountId)> {
        self.tax_accounts
    }
}

static STANDARD_CHART: Lazy<ChartOfAccounts> = Lazy::new(|| {
    use AccountSubType::*;
    use AccountType::*;

    ChartOfAccounts::new(
        vec![
            Account::new(standard::CASH, "現金", Asset, Some(Current)),
            Account::new(standard::ACCOUNTS_RECEIVABLE, "売掛金", Asset, Some(Current)),
            Account::new(standard::INVENTORY, "商品", Asset, Some(Current)),
            Account::new(standard::ACCOUNTS_PAYABLE, "買掛金", Liability, Some(Current)),
            Account::new(standard::LOANS_PAYABLE, "借入金", Liability, Some(Fixed)),
            Account::new(standard::CAPITAL_STOCK, "資本金", Equity, None),
            Account::new(standard::SALES, "売上", Revenue, None),
            Account::new(standard::PURCHASES, "仕入", Expense, Some(CostOfSales)),
            Account::new(standard::SALARIES, "給料", Expense, Some(SellingGeneralAdmin)),
            Account::new(standard::EQUIPMENT, "備品", Asset, Some(Fixed)),
            Account::new(
                standard::SUPPLIES_EXPENSE,
                "消耗品費",
                Expense,
                Some(SellingGeneralAdmin),
            ),
            Account::new(
                standard::INTEREST_EXPENSE,
                "支払利息",
                Expense,
                Some(SellingGeneralAdmin),
            ),
            Account::new(standard::INCOME_TAXES, "法人税等", Expense, Some(Tax)),
            Account::new(
                standard::ACCRUED_INCOME_TAXES,
                "未払法人税等",
                Liability,
                Some(Current),
            ),
            Account::new(standard::RETAINED_EARNINGS, "利益剰余金", Equity, None),
        ],
        [standard::CASH],
        standard::CAPITAL_STOCK,
        standard::RETAINED_EARNINGS,
    )
    .with_tax_accounts(standard::INCOME_TAXES, standard::ACCRUED_INCOME_TAXES)
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_resolves_known_account() {
        let chart = ChartOfAccounts::standard();
        let cash = chart.lookup(standard::CASH).expect("cash account");
        assert_eq!(cash.name, "現金");
        assert_eq!(cash.account_type, AccountType::Asset);
        assert_eq!(cash.sub_type, Some(AccountSubType::Current));
    }

    #[test]
    fn lookup_returns_none_for_unknown_id() {
        let chart = ChartOfAccounts::standard();
        assert!(chart.lookup(999).is_none());
    }

    #[test]
    fn standard_chart_designates_structural_accounts() {
        let chart = ChartOfAccounts::standard();
        assert!(chart.is_cash_account(standard::CASH));
        assert!(!chart.is_cash_account(standard::SALES));
        assert_eq!(chart.capital_stock_id(), standard::CAPITAL_STOCK);
        assert_eq!(chart.retained_earnings_id(), standard::RETAINED_EARNINGS);
        assert_eq!(chart.accounts().len(), 15);
    }
}
