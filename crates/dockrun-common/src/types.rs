//! Domain primitive types used across the dockrun workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Length of the abbreviated container id shown when a container has no name.
const SHORT_ID_LEN: usize = 12;

/// Opaque runtime identifier for a container instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerId(String);

impl ContainerId {
    /// Creates a new container ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the abbreviated form used by runtime CLIs (first 12 chars).
    #[must_use]
    pub fn short(&self) -> &str {
        self.0
            .char_indices()
            .nth(SHORT_ID_LEN)
            .map_or(self.0.as_str(), |(idx, _)| &self.0[..idx])
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContainerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Run state of a container as reported by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    /// Container has been created but never started.
    Created,
    /// Container is actively running.
    Running,
    /// Container processes are frozen.
    Paused,
    /// Container is being restarted by its restart policy.
    Restarting,
    /// Container has exited or was stopped.
    Exited,
    /// Container is being removed.
    Removing,
    /// Container is unusable.
    Dead,
}

impl RunState {
    /// Parses the state word printed by Docker-compatible runtimes.
    ///
    /// Unknown words map to `Exited` so they are never treated as running.
    #[must_use]
    pub fn parse(word: &str) -> Self {
        match word.trim().to_ascii_lowercase().as_str() {
            "created" => Self::Created,
            "running" | "up" => Self::Running,
            "paused" => Self::Paused,
            "restarting" => Self::Restarting,
            "removing" => Self::Removing,
            "dead" => Self::Dead,
            _ => Self::Exited,
        }
    }

    /// Returns whether the runtime considers the container running.
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Running => write!(f, "running"),
            Self::Paused => write!(f, "paused"),
            Self::Restarting => write!(f, "restarting"),
            Self::Exited => write!(f, "exited"),
            Self::Removing => write!(f, "removing"),
            Self::Dead => write!(f, "dead"),
        }
    }
}
