use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::Result;
use crate::state::SessionState;

/// JSON file holding one `SessionState`.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved session, or start a fresh one with `default_capital`
    /// when nothing has been saved yet.
    pub fn load(&self, default_capital: f64) -> Result<SessionState> {
        if !self.path.exists() {
            debug!("No session at {}, starting fresh", self.path.display());
            return Ok(SessionState::new(default_capital));
        }
        let content = fs::read_to_string(&self.path)?;
        let state: SessionState = serde_json::from_str(&content)?;
        info!(
            "Loaded session from {} ({} budget items)",
            self.path.display(),
            state.budget.len()
        );
        Ok(state)
    }

    pub fn save(&self, state: &SessionState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, json)?;
        debug!("Saved session to {}", self.path.display());
        Ok(())
    }
}
