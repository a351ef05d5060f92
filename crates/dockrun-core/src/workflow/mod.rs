//! Command workflows.
//!
//! Each workflow composes the shared [`Classifier`] and [`BatchExecutor`]
//! and differs only in whether the user selects, which containers are
//! eligible, and how outcomes are worded. A workflow that finds nothing to
//! do shows a warning and finishes with [`WorkflowOutcome::Skipped`]; only
//! runtime connectivity failures surface as errors.

pub mod membership;
pub mod non_related;
pub mod start;
pub mod stop;

use std::fmt;

use async_trait::async_trait;
use dockrun_common::error::Result;

use crate::classify::{Classifier, Membership, StateFilter};
use crate::container::{PickItem, pick_items};
use crate::executor::{BatchExecutor, BatchReport, LifecycleAction};
use crate::surface::{Interaction, with_progress};

pub use membership::{AddToWorkspace, RemoveFromWorkspace};
pub use non_related::StopNonRelated;
pub use start::StartSelected;
pub use stop::StopSelected;

/// Verb of a selection prompt, used in the empty-selection warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionVerb {
    /// Selecting containers to stop.
    Stop,
    /// Selecting containers to start.
    Start,
    /// Selecting containers to add to the workspace.
    Add,
    /// Selecting containers to remove from the workspace.
    Remove,
}

impl From<LifecycleAction> for SelectionVerb {
    fn from(action: LifecycleAction) -> Self {
        match action {
            LifecycleAction::Stop => Self::Stop,
            LifecycleAction::Start => Self::Start,
        }
    }
}

impl fmt::Display for SelectionVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stop => write!(f, "Stop"),
            Self::Start => write!(f, "Start"),
            Self::Add => write!(f, "Add"),
            Self::Remove => write!(f, "Remove"),
        }
    }
}

/// Why a workflow finished without doing anything. The `Display` form is
/// the warning shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The workspace tracks no existing container.
    NoWorkspaceContainers,
    /// Every tracked container is already stopped.
    AllStopped,
    /// Every tracked container is already running.
    AllRunning,
    /// No running container outside the workspace.
    NoNonRelated,
    /// Every container is already tracked.
    NothingToAdd,
    /// The user chose nothing.
    EmptySelection(SelectionVerb),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWorkspaceContainers => {
                write!(f, "Please Add At Least One Container To Workspace")
            }
            Self::AllStopped => write!(f, "All Containers For Current Workspace Are Stopped"),
            Self::AllRunning => write!(f, "All Containers For Current Workspace Are Running"),
            Self::NoNonRelated => write!(f, "No non related container found"),
            Self::NothingToAdd => write!(f, "No Container Available To Add"),
            Self::EmptySelection(verb) => {
                write!(f, "Please Select At least One Container To {verb}")
            }
        }
    }
}

/// How a workflow finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    /// Nothing to do; the warning has been shown.
    Skipped(SkipReason),
    /// A lifecycle batch ran.
    Completed(BatchReport),
    /// Workspace membership changed for these containers.
    Updated(Vec<PickItem>),
}

impl WorkflowOutcome {
    /// Returns whether the command should be considered successful.
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            Self::Skipped(_) | Self::Updated(_) => true,
            Self::Completed(report) => report.is_success(),
        }
    }
}

/// A user-invocable command workflow.
#[async_trait]
pub trait Workflow: Send + Sync {
    /// Command name for logs.
    fn name(&self) -> &'static str;

    /// Runs the workflow against `surface`.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeUnavailable` if the runtime cannot be reached, or an
    /// error if the workspace file cannot be read or written.
    async fn run(&self, surface: &dyn Interaction) -> Result<WorkflowOutcome>;
}

/// Shows the warning for `reason` and returns the skipped outcome.
fn skip(surface: &dyn Interaction, reason: SkipReason) -> WorkflowOutcome {
    tracing::info!(%reason, "nothing to do");
    surface.show_warning(&reason.to_string());
    WorkflowOutcome::Skipped(reason)
}

/// Parameters of a select-then-batch workflow over tracked containers.
struct SelectionFlow {
    action: LifecycleAction,
    eligible: StateFilter,
    nothing_eligible: SkipReason,
    prompt: &'static str,
    progress_title: &'static str,
    success_prefix: &'static str,
}

/// Tracked containers: check membership, check eligibility, select, then
/// run the batch inside a progress scope.
async fn run_selection_flow(
    classifier: &Classifier,
    executor: &BatchExecutor,
    flow: &SelectionFlow,
    surface: &dyn Interaction,
) -> Result<WorkflowOutcome> {
    let tracked = classifier
        .classify(Membership::Tracked, StateFilter::Any)
        .await?;
    if tracked.is_empty() {
        return Ok(skip(surface, SkipReason::NoWorkspaceContainers));
    }

    let eligible = classifier
        .classify(Membership::Tracked, flow.eligible)
        .await?;
    if eligible.is_empty() {
        return Ok(skip(surface, flow.nothing_eligible));
    }

    let chosen = surface
        .present_selection(flow.prompt, &pick_items(&eligible))
        .await;
    if chosen.is_empty() {
        return Ok(skip(
            surface,
            SkipReason::EmptySelection(flow.action.into()),
        ));
    }

    let report = with_progress(
        surface,
        flow.progress_title,
        executor.run(flow.action, &chosen, flow.success_prefix, surface),
    )
    .await;
    Ok(WorkflowOutcome::Completed(report))
}
