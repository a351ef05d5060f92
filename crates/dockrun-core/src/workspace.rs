//! Workspace membership: the ordered set of container ids a workspace
//! tracks.
//!
//! The file format is a JSON object `{ "containers": ["<id>", ...] }`
//! stored as `.dockerrc` in the workspace root.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dockrun_common::error::Result;
use dockrun_common::persist;
use dockrun_common::types::ContainerId;
use serde::{Deserialize, Serialize};

/// Source of the workspace's tracked container ids.
pub trait WorkspaceConfigStore: Send + Sync {
    /// Returns the tracked ids in file order, without duplicates.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn read_tracked_ids(&self) -> Result<Vec<ContainerId>>;

    /// Replaces the tracked ids.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn write_tracked_ids(&self, ids: &[ContainerId]) -> Result<()>;
}

/// Shared store handle.
pub type DynWorkspaceConfigStore = Arc<dyn WorkspaceConfigStore>;

/// On-disk shape of the workspace file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct WorkspaceFile {
    #[serde(default)]
    containers: Vec<ContainerId>,
}

/// Workspace store backed by a `.dockerrc` file.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    /// Creates a store over the file at `path`.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WorkspaceConfigStore for FileConfigStore {
    fn read_tracked_ids(&self) -> Result<Vec<ContainerId>> {
        let file: WorkspaceFile = persist::read_json_or_default(&self.path)?;
        let ids = dedup_keep_first(file.containers);
        tracing::debug!(path = %self.path.display(), count = ids.len(), "read workspace ids");
        Ok(ids)
    }

    fn write_tracked_ids(&self, ids: &[ContainerId]) -> Result<()> {
        let file = WorkspaceFile {
            containers: dedup_keep_first(ids.to_vec()),
        };
        persist::write_json_atomic(&self.path, &file)?;
        tracing::info!(
            path = %self.path.display(),
            count = file.containers.len(),
            "wrote workspace ids"
        );
        Ok(())
    }
}

fn dedup_keep_first(ids: Vec<ContainerId>) -> Vec<ContainerId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}
