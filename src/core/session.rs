use chrono::NaiveDate;
use tracing::info;

use crate::core::closing::{
    closing_entries, has_closing_transaction, tax_on, CLOSING_DESCRIPTION, TAX_ACCRUAL_DESCRIPTION,
};
use crate::core::derivation::derive;
use crate::domain::{
    Account, BalanceSheet, CashFlowStatement, ChartOfAccounts, HistoricalData, IncomeStatement,
    JournalEntry, OpeningBalances, Statements, TemplateRegistry, Transaction, TransactionId,
    TransactionTemplate,
};
use crate::errors::{AccountingError, Result};
use crate::ledger::{Clock, FiscalPeriod, HistoryStore, Journal, SystemClock};
use crate::storage::{SessionState, StateStore};

/// Aggregate owning one user session's accounting state: the chart of
/// accounts, the template catalogue, the journal, the fiscal period tracker,
/// the closed-period history, and the opening balances carried from the last
/// close.
///
/// Statements are views, not authoritative state: they are recomputed from
/// the journal after every mutation and served from the cached copy. The
/// fiscal anchor dates and the sample-data flag persist through the optional
/// state store; everything else lives for the session.
pub struct AccountingSession {
    chart: ChartOfAccounts,
    templates: TemplateRegistry,
    journal: Journal,
    fiscal_period: FiscalPeriod,
    history: HistoryStore,
    opening: OpeningBalances,
    use_sample_data: bool,
    statements: Statements,
    clock: Box<dyn Clock>,
    store: Option<Box<dyn StateStore>>,
}

impl AccountingSession {
    /// Session over the standard chart and template catalogue, with the
    /// system clock and no persistence.
    pub fn new() -> Self {
        Self::with_parts(
            ChartOfAccounts::standard(),
            TemplateRegistry::standard(),
            Box::new(SystemClock),
            None,
        )
    }

    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self::with_parts(
            ChartOfAccounts::standard(),
            TemplateRegistry::standard(),
            clock,
            None,
        )
    }

    pub fn with_parts(
        chart: ChartOfAccounts,
        templates: TemplateRegistry,
        clock: Box<dyn Clock>,
        store: Option<Box<dyn StateStore>>,
    ) -> Self {
        let mut session = Self {
            chart,
            templates,
            journal: Journal::new(),
            fiscal_period: FiscalPeriod::new(),
            history: HistoryStore::new(),
            opening: OpeningBalances::default(),
            use_sample_data: false,
            statements: Statements::default(),
            clock,
            store,
        };
        session.recompute();
        session
    }

    /// Rebuilds a session from the state persisted in `store`.
    pub fn restore(store: Box<dyn StateStore>) -> Result<Self> {
        Self::restore_with_clock(store, Box::new(SystemClock))
    }

    pub fn restore_with_clock(store: Box<dyn StateStore>, clock: Box<dyn Clock>) -> Result<Self> {
        let state = store.load()?;
        let mut session = Self::with_parts(
            ChartOfAccounts::standard(),
            TemplateRegistry::standard(),
            clock,
            Some(store),
        );
        session.fiscal_period =
            FiscalPeriod::from_parts(state.fiscal_start_date, state.original_start_date);
        session.use_sample_data = state.use_sample_data;
        session.recompute();
        Ok(session)
    }

    // --- Read surface ---

    pub fn balance_sheet(&self) -> &BalanceSheet {
        &self.statements.balance_sheet
    }

    pub fn income_statement(&self) -> &IncomeStatement {
        &self.statements.income_statement
    }

    pub fn cash_flow_statement(&self) -> &CashFlowStatement {
        &self.statements.cash_flow
    }

    pub fn statements(&self) -> &Statements {
        &self.statements
    }

    pub fn fiscal_period(&self) -> &FiscalPeriod {
        &self.fiscal_period
    }

    pub fn fiscal_period_label(&self) -> String {
        self.fiscal_period.period_label()
    }

    /// Closed-period snapshots, oldest first.
    pub fn history(&self) -> &[HistoricalData] {
        self.history.snapshots()
    }

    /// Transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        self.journal.transactions()
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn accounts(&self) -> &[Account] {
        self.chart.accounts()
    }

    pub fn chart(&self) -> &ChartOfAccounts {
        &self.chart
    }

    pub fn templates(&self) -> &[TransactionTemplate] {
        self.templates.templates()
    }

    pub fn opening_balances(&self) -> OpeningBalances {
        self.opening
    }

    pub fn use_sample_data(&self) -> bool {
        self.use_sample_data
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// True until a fiscal start date has been configured. Consumers show
    /// the setup prompt while this holds.
    pub fn needs_setup(&self) -> bool {
        !self.fiscal_period.is_set()
    }

    /// True when the current window already carries a closing transaction.
    pub fn has_closed_current_period(&self) -> bool {
        self.fiscal_period
            .window()
            .map(|window| has_closing_transaction(&self.journal, window))
            .unwrap_or(false)
    }

    /// True when corporate tax has been accrued in the current window.
    pub fn is_tax_posted(&self) -> bool {
        self.statements.income_statement.total_tax > 0
    }

    // --- Write surface ---

    /// Validates and records a transaction, then refreshes the statements.
    pub fn add_transaction(
        &mut self,
        date: NaiveDate,
        description: impl Into<String>,
        entries: Vec<JournalEntry>,
    ) -> Result<Transaction> {
        let transaction = self
            .journal
            .add_transaction(&self.chart, date, description, entries)?
            .clone();
        self.recompute();
        Ok(transaction)
    }

    /// Replaces an existing transaction's date, description, and entries.
    pub fn update_transaction(
        &mut self,
        id: TransactionId,
        date: NaiveDate,
        description: impl Into<String>,
        entries: Vec<JournalEntry>,
    ) -> Result<Transaction> {
        let transaction = self
            .journal
            .update_transaction(&self.chart, id, date, description, entries)?
            .clone();
        self.recompute();
        Ok(transaction)
    }

    /// Records a balanced two-entry transaction from a template.
    pub fn add_from_template(
        &mut self,
        template_id: &str,
        amount: i64,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Result<Transaction> {
        let transaction = self
            .journal
            .add_from_template(
                &self.chart,
                &self.templates,
                template_id,
                amount,
                date,
                description,
            )?
            .clone();
        self.recompute();
        Ok(transaction)
    }

    /// Accrues 30% corporate tax on the current pre-tax income, dated today.
    pub fn post_tax_accrual(&mut self) -> Result<Transaction> {
        if self.is_tax_posted() {
            return Err(AccountingError::Validation(
                "tax is already accrued for this period".into(),
            ));
        }
        let (tax_expense, accrued_taxes) = self.chart.tax_account_ids().ok_or_else(|| {
            AccountingError::Validation("chart designates no tax accounts".into())
        })?;
        let tax = tax_on(self.statements.income_statement.pre_tax_income);
        if tax <= 0 {
            return Err(AccountingError::Validation(
                "no taxable income to accrue".into(),
            ));
        }

        let date = self.clamp_into_period(self.clock.today())?;
        let entries = vec![
            JournalEntry::debit(tax_expense, tax),
            JournalEntry::credit(accrued_taxes, tax),
        ];
        self.add_transaction(date, TAX_ACCRUAL_DESCRIPTION, entries)
    }

    /// Configures the fiscal period start; see
    /// [`FiscalPeriod::set_start_date`] for the fast-forward rule.
    pub fn set_fiscal_start_date(&mut self, date: NaiveDate, is_sample: bool) -> Result<()> {
        let today = self.clock.today();
        self.fiscal_period.set_start_date(date, is_sample, today);
        info!(label = %self.fiscal_period.period_label(), "fiscal period configured");
        self.recompute();
        self.persist_state()
    }

    /// Clears the fiscal period. Consumers must treat the unset state as
    /// "setup required, all statements empty".
    pub fn reset_fiscal_period(&mut self) -> Result<()> {
        self.fiscal_period.reset();
        self.recompute();
        self.persist_state()
    }

    pub fn set_use_sample_data(&mut self, use_sample_data: bool) -> Result<()> {
        self.use_sample_data = use_sample_data;
        self.persist_state()
    }

    /// Closes the current period: snapshots the statements into history,
    /// posts the income-to-equity transfer, rolls the closing balances into
    /// the next period's opening figures, and advances the tracker one year.
    pub fn close_period(&mut self) -> Result<HistoricalData> {
        let window = self
            .fiscal_period
            .window()
            .ok_or(AccountingError::PeriodNotConfigured)?;
        if has_closing_transaction(&self.journal, window) {
            return Err(AccountingError::AlreadyClosed);
        }

        let snapshot = HistoricalData {
            period_label: self.fiscal_period.period_label(),
            start_date: window.0,
            end_date: window.1,
            balance_sheet: self.statements.balance_sheet.clone(),
            income_statement: self.statements.income_statement.clone(),
            cash_flow: self.statements.cash_flow.clone(),
        };

        let entries = closing_entries(&self.chart, &self.statements.income_statement);
        if !entries.is_empty() {
            let date = self.clamp_into_period(self.clock.today())?;
            self.journal
                .add_transaction(&self.chart, date, CLOSING_DESCRIPTION, entries)?;
        }

        self.history.push(snapshot.clone());
        self.opening = OpeningBalances {
            retained_earnings: snapshot.balance_sheet.retained_earnings,
            cash: snapshot.cash_flow.ending_cash_balance,
        };
        self.fiscal_period.advance_to_next_period();
        info!(
            closed = %snapshot.period_label,
            next = %self.fiscal_period.period_label(),
            net_income = snapshot.income_statement.net_income,
            "period closed"
        );
        self.recompute();
        self.persist_state()?;
        Ok(snapshot)
    }

    pub(crate) fn push_history_snapshot(&mut self, snapshot: HistoricalData) {
        self.history.push(snapshot);
    }

    pub(crate) fn clear_history(&mut self) {
        self.history.clear();
    }

    fn recompute(&mut self) {
        self.statements = derive(&self.chart, &self.journal, &self.fiscal_period, &self.opening);
    }

    /// Today when it falls inside the current window, else the nearest
    /// window edge. Keeps synthetic postings in-period even when a sample
    /// period lies in the past.
    fn clamp_into_period(&self, today: NaiveDate) -> Result<NaiveDate> {
        let (start, end) = self
            .fiscal_period
            .window()
            .ok_or(AccountingError::PeriodNotConfigured)?;
        Ok(today.clamp(start, end))
    }

    fn persist_state(&self) -> Result<()> {
        if let Some(store) = &self.store {
            store.save(&SessionState {
                fiscal_start_date: self.fiscal_period.start_date(),
                original_start_date: self.fiscal_period.original_start_date(),
                use_sample_data: self.use_sample_data,
            })?;
        }
        Ok(())
    }
}

impl Default for AccountingSession {
    fn default() -> Self {
        Self::new()
    }
}
