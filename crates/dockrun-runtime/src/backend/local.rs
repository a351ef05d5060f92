//! Runtime client backed by the local JSON state index.

use std::path::PathBuf;

use async_trait::async_trait;
use dockrun_common::error::{DockrunError, Result};
use dockrun_common::types::{ContainerId, RunState};
use tokio::sync::Mutex;

use super::{ContainerInfo, RuntimeClient};
use crate::state;

/// Client that reads and flips run states in the state index.
///
/// The index is loaded fresh on every call. Mutations are serialized by an
/// internal lock so concurrent stop calls never lose each other's writes.
#[derive(Debug)]
pub struct StateIndexClient {
    state_file: PathBuf,
    write_lock: Mutex<()>,
}

impl StateIndexClient {
    /// Creates a client over the index at `state_file`.
    #[must_use]
    pub fn new(state_file: PathBuf) -> Self {
        Self {
            state_file,
            write_lock: Mutex::new(()),
        }
    }

    async fn transition(&self, id: &ContainerId, to: RunState) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut index = state::load_state(&self.state_file)?;
        let entry = index.find_mut(id).ok_or_else(|| DockrunError::NotFound {
            kind: "container",
            id: id.to_string(),
        })?;
        if entry.state == to {
            tracing::debug!(id = %id, state = %to, "container already in target state");
            return Ok(());
        }
        entry.state = to;
        state::save_state(&self.state_file, &index)?;
        tracing::info!(id = %id, state = %to, "container state updated");
        Ok(())
    }
}

#[async_trait]
impl RuntimeClient for StateIndexClient {
    fn name(&self) -> &'static str {
        "state"
    }

    async fn list_containers(&self) -> Result<Vec<ContainerInfo>> {
        let index = state::load_state(&self.state_file).map_err(|e| match e {
            DockrunError::Io { path, source } => DockrunError::RuntimeUnavailable {
                message: format!("cannot read state index {}: {source}", path.display()),
            },
            other => other,
        })?;
        Ok(index
            .containers
            .into_iter()
            .map(|e| ContainerInfo {
                id: e.id,
                name: e.name,
                state: e.state,
            })
            .collect())
    }

    async fn start_container(&self, id: &ContainerId) -> Result<()> {
        self.transition(id, RunState::Running).await
    }

    async fn stop_container(&self, id: &ContainerId) -> Result<()> {
        self.transition(id, RunState::Exited).await
    }
}
