use std::{
    env, fs,
    path::{Path, PathBuf},
};

use dirs::home_dir;

use super::{SessionState, StateStore};
use crate::errors::Result;

const DEFAULT_DIR_NAME: &str = ".accounting_core";
const STATE_FILE: &str = "state.json";
const TMP_SUFFIX: &str = "tmp";
const HOME_ENV: &str = "ACCOUNTING_CORE_HOME";

/// Returns the application-specific data directory, defaulting to
/// `~/.accounting_core` and overridable through `ACCOUNTING_CORE_HOME`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// JSON-file backend for the session state.
#[derive(Debug, Clone)]
pub struct JsonStateStore {
    state_file: PathBuf,
}

impl JsonStateStore {
    /// Creates a store rooted at `root`, or at the default data directory.
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(app_data_dir);
        fs::create_dir_all(&root)?;
        Ok(Self {
            state_file: root.join(STATE_FILE),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn state_path(&self) -> &Path {
        &self.state_file
    }
}

impl StateStore for JsonStateStore {
    fn load(&self) -> Result<SessionState> {
        if !self.state_file.exists() {
            return Ok(SessionState::default());
        }
        let data = fs::read_to_string(&self.state_file)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn save(&self, state: &SessionState) -> Result<()> {
        let json = serde_json::to_string_pretty(state)?;
        write_atomic(&self.state_file, &json)
    }
}

/// Writes by staging to a temporary file and renaming over the target.
fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let tmp = path.with_extension(TMP_SUFFIX);
    fs::write(&tmp, data)?;
    fs::rename(tmp, path)?;
    Ok(())
}
