//! Derivation, closing, and the session aggregate that ties the ledger
//! primitives together behind one read/write surface.

pub mod closing;
pub mod derivation;
pub mod sample_data;
pub mod session;

pub use closing::{CLOSING_DESCRIPTION, TAX_ACCRUAL_DESCRIPTION};
pub use derivation::derive;
pub use session::AccountingSession;
