//! Container entity model.
//!
//! [`Container`] values are produced fresh by every classification call and
//! never mutated afterwards. A changed run state is observed by classifying
//! again. [`PickItem`] is the transient presentation entry carrying the
//! display label; only the id is identity.

use dockrun_common::types::ContainerId;
use serde::{Deserialize, Serialize};

/// A classified runtime container.
#[derive(Debug, Clone, Eq)]
pub struct Container {
    /// Runtime identifier.
    pub id: ContainerId,
    /// Runtime-assigned name (may be empty).
    pub name: String,
    /// Whether the id is listed in the workspace file.
    pub tracked: bool,
    /// Whether the runtime reported the container running.
    pub running: bool,
}

impl Container {
    /// Display label: the runtime name, or the short id for unnamed
    /// containers.
    ///
    /// Presentation only. Two containers may share a label; selection,
    /// membership and equality always go through [`Container::id`].
    #[must_use]
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            self.id.short().to_string()
        } else {
            self.name.clone()
        }
    }

    /// Builds the presentation entry for this container.
    #[must_use]
    pub fn to_pick_item(&self) -> PickItem {
        PickItem {
            label: self.label(),
            id: self.id.clone(),
        }
    }
}

impl PartialEq for Container {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Ordered list of classified containers.
pub type ContainerList = Vec<Container>;

/// An entry offered to (and returned from) the selection surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickItem {
    /// Display label used in prompts and outcome messages.
    pub label: String,
    /// Selection key.
    pub id: ContainerId,
}

/// Builds presentation entries for a classified list, preserving order.
#[must_use]
pub fn pick_items(containers: &[Container]) -> Vec<PickItem> {
    containers.iter().map(Container::to_pick_item).collect()
}
