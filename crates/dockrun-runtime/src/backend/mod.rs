//! Runtime client abstraction.

pub mod docker;
pub mod local;

use std::sync::Arc;

use async_trait::async_trait;
use dockrun_common::config::{DockrunConfig, RuntimeKind};
use dockrun_common::error::Result;
use dockrun_common::types::{ContainerId, RunState};

/// A container as enumerated by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerInfo {
    /// Runtime identifier.
    pub id: ContainerId,
    /// Runtime-assigned name (may be empty).
    pub name: String,
    /// Run state at enumeration time.
    pub state: RunState,
}

impl ContainerInfo {
    /// Returns whether the runtime reported the container running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.state.is_running()
    }
}

/// Connected container runtime.
///
/// Implementors serialize conflicting operations on the same container
/// themselves; callers add no locking.
#[async_trait]
pub trait RuntimeClient: Send + Sync {
    /// Short name of the runtime for logs.
    fn name(&self) -> &'static str;

    /// Lists every container, running or not, in the runtime's order.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeUnavailable` if the runtime cannot be reached.
    async fn list_containers(&self) -> Result<Vec<ContainerInfo>>;

    /// Starts a container. Starting a running container succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime rejects the call.
    async fn start_container(&self, id: &ContainerId) -> Result<()>;

    /// Stops a container. Stopping a stopped container succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime rejects the call.
    async fn stop_container(&self, id: &ContainerId) -> Result<()>;
}

/// Shared runtime client handle.
pub type DynRuntimeClient = Arc<dyn RuntimeClient>;

/// Creates the runtime client selected by the configuration.
#[must_use]
pub fn connect(config: &DockrunConfig) -> DynRuntimeClient {
    match config.runtime {
        RuntimeKind::Docker => Arc::new(docker::DockerCliClient::new(
            config.runtime_bin.clone(),
            config.stop_timeout_secs,
        )),
        RuntimeKind::State => Arc::new(local::StateIndexClient::new(config.state_file.clone())),
    }
}
