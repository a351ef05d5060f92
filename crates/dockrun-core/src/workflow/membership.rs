//! Add containers to, and remove them from, the workspace file.

use async_trait::async_trait;
use dockrun_common::error::Result;

use super::{SelectionVerb, SkipReason, Workflow, WorkflowOutcome, skip};
use crate::classify::{Classifier, Membership, StateFilter};
use crate::container::pick_items;
use crate::surface::Interaction;

/// Offers non-related containers and appends the chosen ones to the
/// workspace.
#[derive(Clone)]
pub struct AddToWorkspace {
    classifier: Classifier,
}

impl AddToWorkspace {
    /// Creates the workflow over `classifier` and its store.
    #[must_use]
    pub const fn new(classifier: Classifier) -> Self {
        Self { classifier }
    }
}

#[async_trait]
impl Workflow for AddToWorkspace {
    fn name(&self) -> &'static str {
        "add"
    }

    async fn run(&self, surface: &dyn Interaction) -> Result<WorkflowOutcome> {
        let candidates = self
            .classifier
            .classify(Membership::NonRelated, StateFilter::Any)
            .await?;
        if candidates.is_empty() {
            return Ok(skip(surface, SkipReason::NothingToAdd));
        }

        let chosen = surface
            .present_selection("Select Containers To Add", &pick_items(&candidates))
            .await;
        if chosen.is_empty() {
            return Ok(skip(surface, SkipReason::EmptySelection(SelectionVerb::Add)));
        }

        let store = self.classifier.store();
        let mut ids = store.read_tracked_ids()?;
        ids.extend(chosen.iter().map(|item| item.id.clone()));
        store.write_tracked_ids(&ids)?;

        for item in &chosen {
            tracing::info!(id = %item.id, "added to workspace");
            surface.show_info(&format!("Added {} To Workspace", item.label));
        }
        Ok(WorkflowOutcome::Updated(chosen))
    }
}

/// Offers tracked containers and drops the chosen ones from the workspace.
#[derive(Clone)]
pub struct RemoveFromWorkspace {
    classifier: Classifier,
}

impl RemoveFromWorkspace {
    /// Creates the workflow over `classifier` and its store.
    #[must_use]
    pub const fn new(classifier: Classifier) -> Self {
        Self { classifier }
    }
}

#[async_trait]
impl Workflow for RemoveFromWorkspace {
    fn name(&self) -> &'static str {
        "remove"
    }

    async fn run(&self, surface: &dyn Interaction) -> Result<WorkflowOutcome> {
        let tracked = self
            .classifier
            .classify(Membership::Tracked, StateFilter::Any)
            .await?;
        if tracked.is_empty() {
            return Ok(skip(surface, SkipReason::NoWorkspaceContainers));
        }

        let chosen = surface
            .present_selection("Select Containers To Remove", &pick_items(&tracked))
            .await;
        if chosen.is_empty() {
            return Ok(skip(
                surface,
                SkipReason::EmptySelection(SelectionVerb::Remove),
            ));
        }

        let store = self.classifier.store();
        let mut ids = store.read_tracked_ids()?;
        ids.retain(|id| !chosen.iter().any(|item| item.id == *id));
        store.write_tracked_ids(&ids)?;

        for item in &chosen {
            tracing::info!(id = %item.id, "removed from workspace");
            surface.show_info(&format!("Removed {} From Workspace", item.label));
        }
        Ok(WorkflowOutcome::Updated(chosen))
    }
}
