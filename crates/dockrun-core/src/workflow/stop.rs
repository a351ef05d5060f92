//! Stop selected workspace containers.

use async_trait::async_trait;
use dockrun_common::error::Result;

use super::{SelectionFlow, SkipReason, Workflow, WorkflowOutcome, run_selection_flow};
use crate::classify::{Classifier, StateFilter};
use crate::executor::{BatchExecutor, LifecycleAction};
use crate::surface::Interaction;

/// Progress title shown while the selected containers stop.
pub const PROGRESS_TITLE: &str = "Stopping Containers";

/// Prefix of each success notification.
pub const SUCCESS_PREFIX: &str = "Successfully Stopped";

const FLOW: SelectionFlow = SelectionFlow {
    action: LifecycleAction::Stop,
    eligible: StateFilter::Running,
    nothing_eligible: SkipReason::AllStopped,
    prompt: "Select Containers To Stop",
    progress_title: PROGRESS_TITLE,
    success_prefix: SUCCESS_PREFIX,
};

/// Offers the running tracked containers and stops the ones chosen.
#[derive(Clone)]
pub struct StopSelected {
    classifier: Classifier,
    executor: BatchExecutor,
}

impl StopSelected {
    /// Creates the workflow over `classifier` and its runtime.
    #[must_use]
    pub fn new(classifier: Classifier) -> Self {
        let executor = BatchExecutor::new(classifier.runtime().clone());
        Self {
            classifier,
            executor,
        }
    }
}

#[async_trait]
impl Workflow for StopSelected {
    fn name(&self) -> &'static str {
        "stop"
    }

    async fn run(&self, surface: &dyn Interaction) -> Result<WorkflowOutcome> {
        run_selection_flow(&self.classifier, &self.executor, &FLOW, surface).await
    }
}
