#![allow(dead_code)]

use accounting_core::ledger::Clock;
use accounting_core::AccountingSession;
use chrono::NaiveDate;

/// Deterministic clock for driving fast-forward and closing-date logic.
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub fn sample_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Session pinned to a fixed "today", standard chart and templates.
pub fn session_at(today: NaiveDate) -> AccountingSession {
    AccountingSession::with_clock(Box::new(FixedClock(today)))
}
