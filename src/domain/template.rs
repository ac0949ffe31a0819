use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::account::{standard, AccountId};

/// Broad grouping of a template, surfaced to pickers in the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Revenue,
    Expense,
    Investing,
    Financing,
}

/// A canned two-sided posting: one debit account, one credit account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionTemplate {
    pub id: String,
    pub label: String,
    pub category: TemplateCategory,
    pub debit_account_id: AccountId,
    pub credit_account_id: AccountId,
}

impl TransactionTemplate {
    fn new(
        id: &str,
        label: &str,
        category: TemplateCategory,
        debit_account_id: AccountId,
        credit_account_id: AccountId,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            category,
            debit_account_id,
            credit_account_id,
        }
    }
}

/// Read-only registry of the simple-entry templates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateRegistry {
    templates: Vec<TransactionTemplate>,
}

impl TemplateRegistry {
    pub fn new(templates: Vec<TransactionTemplate>) -> Self {
        Self { templates }
    }

    /// The template catalogue offered by the simple-entry form.
    pub fn standard() -> Self {
        STANDARD_TEMPLATES.clone()
    }

    pub fn lookup(&self, id: &str) -> Option<&TransactionTemplate> {
        self.templates.iter().find(|template| template.id == id)
    }

    /// Templates in catalogue order.
    pub fn templates(&self) -> &[TransactionTemplate] {
        &self.templates
    }
}

static STANDARD_TEMPLATES: Lazy<TemplateRegistry> = Lazy::new(|| {
    use TemplateCategory::*;

    TemplateRegistry::new(vec![
        TransactionTemplate::new(
            "revenue-cash",
            "現金での売上",
            Revenue,
            standard::CASH,
            standard::SALES,
        ),
        TransactionTemplate::new(
            "revenue-receivable",
            "掛けでの売上",
            Revenue,
            standard::ACCOUNTS_RECEIVABLE,
            standard::SALES,
        ),
        TransactionTemplate::new(
            "expense-cogs-cash",
            "現金での仕入",
            Expense,
            standard::PURCHASES,
            standard::CASH,
        ),
        TransactionTemplate::new(
            "expense-cogs-payable",
            "掛けでの仕入",
            Expense,
            standard::PURCHASES,
            standard::ACCOUNTS_PAYABLE,
        ),
        TransactionTemplate::new(
            "expense-sga-cash",
            "現金での経費支払い（販売管理費）",
            Expense,
            standard::SUPPLIES_EXPENSE,
            standard::CASH,
        ),
        TransactionTemplate::new(
            "expense-sga-payable",
            "掛けでの経費支払い（販売管理費）",
            Expense,
            standard::SUPPLIES_EXPENSE,
            standard::ACCOUNTS_PAYABLE,
        ),
        TransactionTemplate::new(
            "asset-purchase-cash",
            "固定資産を現金で購入",
            Investing,
            standard::EQUIPMENT,
            standard::CASH,
        ),
        TransactionTemplate::new(
            "loan-repayment-cash",
            "借入金を現金で返済",
            Financing,
            standard::LOANS_PAYABLE,
            standard::CASH,
        ),
        TransactionTemplate::new(
            "financing-loan",
            "銀行からの借入",
            Financing,
            standard::CASH,
            standard::LOANS_PAYABLE,
        ),
        TransactionTemplate::new(
            "financing-capital",
            "株主からの出資",
            Financing,
            standard::CASH,
            standard::CAPITAL_STOCK,
        ),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_resolves_catalogue_entry() {
        let registry = TemplateRegistry::standard();
        let template = registry.lookup("revenue-cash").expect("template");
        assert_eq!(template.debit_account_id, standard::CASH);
        assert_eq!(template.credit_account_id, standard::SALES);
        assert_eq!(template.category, TemplateCategory::Revenue);
    }

    #[test]
    fn lookup_returns_none_for_unknown_id() {
        assert!(TemplateRegistry::standard().lookup("no-such-template").is_none());
    }

    #[test]
    fn catalogue_has_ten_templates() {
        assert_eq!(TemplateRegistry::standard().templates().len(), 10);
    }
}
