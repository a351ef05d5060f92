//! Ordered batch execution of lifecycle actions.
//!
//! All runtime calls of a batch are issued together and awaited as a
//! group; outcomes are then reported walking the input list, so the
//! notification order is the input order no matter which call finished
//! first. A failed call only affects its own container.

use std::fmt;

use dockrun_common::error::Result;
use dockrun_runtime::backend::DynRuntimeClient;
use futures::future::join_all;

use crate::container::PickItem;
use crate::surface::Interaction;

/// Lifecycle action applied to every container of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    /// Stop the container.
    Stop,
    /// Start the container.
    Start,
}

impl LifecycleAction {
    /// Capitalised verb used in user messages.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Stop => "Stop",
            Self::Start => "Start",
        }
    }
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stop => write!(f, "stop"),
            Self::Start => write!(f, "start"),
        }
    }
}

/// Result of the action for one container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    /// The runtime accepted the call.
    Succeeded,
    /// The runtime rejected the call.
    Failed(String),
}

/// Outcome for one container of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// The container the action targeted.
    pub item: PickItem,
    /// What happened.
    pub result: ActionResult,
}

/// Outcomes of a whole batch, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// One outcome per input container.
    pub outcomes: Vec<ActionOutcome>,
}

impl BatchReport {
    /// Number of containers whose call succeeded.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.result == ActionResult::Succeeded)
            .count()
    }

    /// Containers whose call failed.
    #[must_use]
    pub fn failed(&self) -> Vec<&ActionOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, ActionResult::Failed(_)))
            .collect()
    }

    /// Returns whether every call in the batch succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed().is_empty()
    }
}

/// Runs one lifecycle action over a list of containers.
#[derive(Clone)]
pub struct BatchExecutor {
    runtime: DynRuntimeClient,
}

impl BatchExecutor {
    /// Creates an executor issuing calls to `runtime`.
    #[must_use]
    pub fn new(runtime: DynRuntimeClient) -> Self {
        Self { runtime }
    }

    async fn apply(&self, action: LifecycleAction, item: &PickItem) -> Result<()> {
        match action {
            LifecycleAction::Stop => self.runtime.stop_container(&item.id).await,
            LifecycleAction::Start => self.runtime.start_container(&item.id).await,
        }
    }

    /// Applies `action` to every item concurrently and reports each outcome
    /// in input order.
    ///
    /// Successes are announced as `"{success_prefix} {label}"`; failures as
    /// an error message naming the container.
    pub async fn run(
        &self,
        action: LifecycleAction,
        items: &[PickItem],
        success_prefix: &str,
        surface: &dyn Interaction,
    ) -> BatchReport {
        tracing::info!(
            %action,
            count = items.len(),
            runtime = self.runtime.name(),
            "running batch"
        );
        let results = join_all(items.iter().map(|item| self.apply(action, item))).await;

        let mut report = BatchReport::default();
        for (item, result) in items.iter().zip(results) {
            let result = match result {
                Ok(()) => {
                    surface.show_info(&format!("{success_prefix} {}", item.label));
                    ActionResult::Succeeded
                }
                Err(e) => {
                    tracing::warn!(id = %item.id, %action, error = %e, "lifecycle call failed");
                    surface.show_error(&format!("Failed To {} {}: {e}", action.verb(), item.label));
                    ActionResult::Failed(e.to_string())
                }
            };
            report.outcomes.push(ActionOutcome {
                item: item.clone(),
                result,
            });
        }
        report
    }
}
