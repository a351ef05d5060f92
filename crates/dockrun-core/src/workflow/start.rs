//! Start selected workspace containers.

use async_trait::async_trait;
use dockrun_common::error::Result;

use super::{SelectionFlow, SkipReason, Workflow, WorkflowOutcome, run_selection_flow};
use crate::classify::{Classifier, StateFilter};
use crate::executor::{BatchExecutor, LifecycleAction};
use crate::surface::Interaction;

/// Progress title shown while the selected containers start.
pub const PROGRESS_TITLE: &str = "Starting Containers";

/// Prefix of each success notification.
pub const SUCCESS_PREFIX: &str = "Successfully Started";

const FLOW: SelectionFlow = SelectionFlow {
    action: LifecycleAction::Start,
    eligible: StateFilter::Stopped,
    nothing_eligible: SkipReason::AllRunning,
    prompt: "Select Containers To Start",
    progress_title: PROGRESS_TITLE,
    success_prefix: SUCCESS_PREFIX,
};

/// Offers the stopped tracked containers and starts the ones chosen.
#[derive(Clone)]
pub struct StartSelected {
    classifier: Classifier,
    executor: BatchExecutor,
}

impl StartSelected {
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
impl Workflow for StartSelected {
    fn name(&self) -> &'static str {
        "start"
    }

    async fn run(&self, surface: &dyn Interaction) -> Result<WorkflowOutcome> {
        run_selection_flow(&self.classifier, &self.executor, &FLOW, surface).await
    }
}
