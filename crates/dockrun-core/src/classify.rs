//! Container classification.
//!
//! Partitions every container the runtime knows about by two predicates:
//! tracked by the workspace, and running. Both are read live on each call;
//! nothing is cached between calls.

use std::collections::HashSet;

use dockrun_common::error::Result;
use dockrun_runtime::backend::DynRuntimeClient;

use crate::container::{Container, ContainerList};
use crate::workspace::DynWorkspaceConfigStore;

/// Which side of the workspace boundary to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    /// Containers listed in the workspace file.
    Tracked,
    /// Containers not listed in the workspace file.
    NonRelated,
}

/// Run-state filter applied after membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateFilter {
    /// Keep containers in any state.
    Any,
    /// Keep running containers only.
    Running,
    /// Keep containers that are not running.
    Stopped,
}

impl StateFilter {
    const fn keeps(self, running: bool) -> bool {
        match self {
            Self::Any => true,
            Self::Running => running,
            Self::Stopped => !running,
        }
    }
}

/// Read-only classifier over a runtime client and a workspace store.
#[derive(Clone)]
pub struct Classifier {
    runtime: DynRuntimeClient,
    store: DynWorkspaceConfigStore,
}

impl Classifier {
    /// Creates a classifier over the given collaborators.
    #[must_use]
    pub fn new(runtime: DynRuntimeClient, store: DynWorkspaceConfigStore) -> Self {
        Self { runtime, store }
    }

    /// Returns the runtime client this classifier reads from.
    #[must_use]
    pub const fn runtime(&self) -> &DynRuntimeClient {
        &self.runtime
    }

    /// Returns the workspace store this classifier reads from.
    #[must_use]
    pub const fn store(&self) -> &DynWorkspaceConfigStore {
        &self.store
    }

    /// Classifies the runtime's containers.
    ///
    /// The result keeps the runtime's enumeration order and never holds the
    /// same id twice.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeUnavailable` if the runtime cannot be reached, or an
    /// error if the workspace file cannot be read.
    pub async fn classify(
        &self,
        membership: Membership,
        filter: StateFilter,
    ) -> Result<ContainerList> {
        let tracked: HashSet<_> = self.store.read_tracked_ids()?.into_iter().collect();
        let listed = self.runtime.list_containers().await?;

        let mut seen = HashSet::new();
        let list: ContainerList = listed
            .into_iter()
            .filter(|info| seen.insert(info.id.clone()))
            .map(|info| Container {
                tracked: tracked.contains(&info.id),
                running: info.is_running(),
                id: info.id,
                name: info.name,
            })
            .filter(|c| match membership {
                Membership::Tracked => c.tracked,
                Membership::NonRelated => !c.tracked,
            })
            .filter(|c| filter.keeps(c.running))
            .collect();

        tracing::debug!(
            runtime = self.runtime.name(),
            ?membership,
            ?filter,
            count = list.len(),
            "classified containers"
        );
        Ok(list)
    }
}
