//! User-level configuration model.
//!
//! Loaded from `$HOME/.dockrun/config.json` when present. Every field has a
//! default so a partial file (or no file at all) is valid.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{DockrunError, Result};

/// Which runtime client the commands talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeKind {
    /// A Docker-compatible CLI (`docker`, `podman`).
    #[default]
    Docker,
    /// The local JSON state index.
    State,
}

impl FromStr for RuntimeKind {
    type Err = DockrunError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "docker" => Ok(Self::Docker),
            "state" => Ok(Self::State),
            other => Err(DockrunError::Config {
                message: format!("unknown runtime kind: {other}"),
            }),
        }
    }
}

impl fmt::Display for RuntimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Docker => write!(f, "docker"),
            Self::State => write!(f, "state"),
        }
    }
}

/// Root configuration for dockrun.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockrunConfig {
    /// Runtime client to use.
    pub runtime: RuntimeKind,
    /// Binary invoked by the Docker CLI client.
    pub runtime_bin: String,
    /// Grace period passed to stop calls.
    pub stop_timeout_secs: u32,
    /// Path of the local state index used by the `state` runtime.
    pub state_file: PathBuf,
    /// File name of the workspace container list.
    pub workspace_file: String,
}

impl Default for DockrunConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeKind::default(),
            runtime_bin: constants::DEFAULT_RUNTIME_BIN.to_string(),
            stop_timeout_secs: constants::DEFAULT_STOP_TIMEOUT_SECS,
            state_file: constants::default_state_file(),
            workspace_file: constants::WORKSPACE_FILE_NAME.to_string(),
        }
    }
}

impl DockrunConfig {
    /// Loads configuration from `path`, returning defaults if it is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| DockrunError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), runtime = %config.runtime, "loaded config");
        Ok(config)
    }

    /// Returns the workspace file path for the given workspace root.
    #[must_use]
    pub fn workspace_file_in(&self, workspace: &Path) -> PathBuf {
        workspace.join(&self.workspace_file)
    }
}
