//! Persistent state index.
//!
//! A local JSON list of containers and their run states, used by the
//! `state` runtime client. Entry order is the enumeration order.

use std::path::Path;

use dockrun_common::error::Result;
use dockrun_common::persist;
use dockrun_common::types::{ContainerId, RunState};
use serde::{Deserialize, Serialize};

/// Persistent record of a container's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEntry {
    /// Container identifier.
    pub id: ContainerId,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Current run state.
    pub state: RunState,
}

/// The full state index as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateIndex {
    /// All known containers.
    #[serde(default)]
    pub containers: Vec<StateEntry>,
}

impl StateIndex {
    /// Returns the entry for `id`, if present.
    pub fn find_mut(&mut self, id: &ContainerId) -> Option<&mut StateEntry> {
        self.containers.iter_mut().find(|e| e.id == *id)
    }
}

/// Loads the state index from disk. A missing file is an empty index.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_state(path: &Path) -> Result<StateIndex> {
    tracing::debug!(path = %path.display(), "loading state index");
    persist::read_json_or_default(path)
}

/// Persists the state index to disk atomically.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_state(path: &Path, index: &StateIndex) -> Result<()> {
    tracing::debug!(path = %path.display(), entries = index.containers.len(), "saving state index");
    persist::write_json_atomic(path, index)
}
