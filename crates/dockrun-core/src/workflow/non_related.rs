//! Stop every running container the workspace does not track.
//!
//! There is no selection step: everything found is stopped. The progress
//! scope is entered exactly once per run, including runs that find
//! nothing.

use async_trait::async_trait;
use dockrun_common::error::Result;

use super::{SkipReason, Workflow, WorkflowOutcome, skip};
use crate::classify::{Classifier, Membership, StateFilter};
use crate::container::pick_items;
use crate::executor::{BatchExecutor, LifecycleAction};
use crate::surface::{Interaction, with_progress};

/// Progress title of the whole run.
pub const PROGRESS_TITLE: &str = "Stopping Non Related Containers";

/// Prefix of each success notification.
pub const SUCCESS_PREFIX: &str = "Successfully Stopped Non Related Container";

/// Stops all running non-related containers in classification order.
#[derive(Clone)]
pub struct StopNonRelated {
    classifier: Classifier,
    executor: BatchExecutor,
}

impl StopNonRelated {
    /// Creates the workflow over `classifier` and its runtime.
    #[must_use]
    pub fn new(classifier: Classifier) -> Self {
        let executor = BatchExecutor::new(classifier.runtime().clone());
        Self {
            classifier,
            executor,
        }
    }

    async fn stop_all_found(&self, surface: &dyn Interaction) -> Result<WorkflowOutcome> {
        let running = self
            .classifier
            .classify(Membership::NonRelated, StateFilter::Running)
            .await?;
        if running.is_empty() {
            return Ok(skip(surface, SkipReason::NoNonRelated));
        }

        let report = self
            .executor
            .run(
                LifecycleAction::Stop,
                &pick_items(&running),
                SUCCESS_PREFIX,
                surface,
            )
            .await;
        Ok(WorkflowOutcome::Completed(report))
    }
}

#[async_trait]
impl Workflow for StopNonRelated {
    fn name(&self) -> &'static str {
        "stop-non-related"
    }

    async fn run(&self, surface: &dyn Interaction) -> Result<WorkflowOutcome> {
        with_progress(surface, PROGRESS_TITLE, self.stop_all_found(surface)).await
    }
}
