pub mod json_backend;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

pub use json_backend::JsonStateStore;

/// Session state expected to survive a process restart: the fiscal period
/// anchor dates and the sample-data preference. The journal and history live
/// in memory for the duration of a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionState {
    pub fiscal_start_date: Option<NaiveDate>,
    pub original_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub use_sample_data: bool,
}

/// Abstraction over persistence backends capable of storing session state.
pub trait StateStore: Send + Sync {
    /// Loads the stored state, or the default state when none was saved yet.
    fn load(&self) -> Result<SessionState>;
    fn save(&self, state: &SessionState) -> Result<()>;
}
