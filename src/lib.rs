#![doc(test(attr(deny(warnings))))]

//! Accounting Core offers a double-entry journal, fiscal period tracking, and
//! derivation of the three financial statements (balance sheet, income
//! statement, cash flow statement) that power bookkeeping front ends.

pub mod core;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::core::session::AccountingSession;
pub use errors::{AccountingError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Accounting Core tracing initialized.");
    });
}
