//! Interaction surface consumed by the workflows.
//!
//! The surface owns everything the user sees: the selection picker,
//! warning/info/error notifications and progress scopes. Workflows never
//! print on their own.

use std::future::Future;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use dockrun_common::types::ContainerId;
use serde::Serialize;

use crate::container::PickItem;

/// User-facing interaction capabilities.
#[async_trait]
pub trait Interaction: Send + Sync {
    /// Offers `items` and returns the chosen subset (possibly empty), in the
    /// order the user chose them.
    async fn present_selection(&self, prompt: &str, items: &[PickItem]) -> Vec<PickItem>;

    /// Shows a warning.
    fn show_warning(&self, text: &str);

    /// Shows an informational message.
    fn show_info(&self, text: &str);

    /// Shows an error message.
    fn show_error(&self, text: &str);

    /// Called when a progress scope opens.
    fn progress_started(&self, title: &str);

    /// Called when a progress scope closes, whatever the outcome.
    fn progress_finished(&self, title: &str);
}

/// Runs `body` inside a progress scope titled `title`.
pub async fn with_progress<F, T>(surface: &dyn Interaction, title: &str, body: F) -> T
where
    F: Future<Output = T> + Send,
{
    surface.progress_started(title);
    let out = body.await;
    surface.progress_finished(title);
    out
}

/// Selection decided ahead of time instead of prompting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedSelection {
    /// Choose nothing.
    Nothing,
    /// Choose every offered item, in offered order.
    All,
    /// Choose these containers, in this order. Each key matches an offered
    /// item by full id, then by label, then by id prefix; keys matching
    /// nothing are ignored.
    Ids(Vec<ContainerId>),
}

impl ScriptedSelection {
    /// Applies the selection to the offered items.
    #[must_use]
    pub fn pick(&self, items: &[PickItem]) -> Vec<PickItem> {
        match self {
            Self::Nothing => Vec::new(),
            Self::All => items.to_vec(),
            Self::Ids(ids) => {
                let mut chosen: Vec<PickItem> = Vec::new();
                for id in ids {
                    let Some(item) = find_by_key(items, id.as_str()) else {
                        tracing::debug!(id = %id, "requested container was not offered");
                        continue;
                    };
                    if !chosen.contains(item) {
                        chosen.push(item.clone());
                    }
                }
                chosen
            }
        }
    }
}

fn find_by_key<'a>(items: &'a [PickItem], key: &str) -> Option<&'a PickItem> {
    if key.is_empty() {
        return None;
    }
    items
        .iter()
        .find(|i| i.id.as_str() == key)
        .or_else(|| items.iter().find(|i| i.label == key))
        .or_else(|| items.iter().find(|i| i.id.as_str().starts_with(key)))
}

/// One observable interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    /// A selection was offered.
    Selection {
        /// Offered entries.
        offered: Vec<PickItem>,
        /// Entries chosen.
        chosen: Vec<PickItem>,
    },
    /// A warning was shown.
    Warning {
        /// Message text.
        text: String,
    },
    /// An informational message was shown.
    Info {
        /// Message text.
        text: String,
    },
    /// An error message was shown.
    Error {
        /// Message text.
        text: String,
    },
    /// A progress scope opened.
    ProgressStarted {
        /// Scope title.
        title: String,
    },
    /// A progress scope closed.
    ProgressFinished {
        /// Scope title.
        title: String,
    },
}

/// Headless surface: answers selections from a [`ScriptedSelection`] and
/// records every event in order.
#[derive(Debug)]
pub struct ScriptedInteraction {
    selection: ScriptedSelection,
    events: Mutex<Vec<Event>>,
}

impl ScriptedInteraction {
    /// Creates a surface answering every prompt with `selection`.
    #[must_use]
    pub const fn new(selection: ScriptedSelection) -> Self {
        Self {
            selection,
            events: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, event: Event) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    /// Returns every recorded event in order.
    #[must_use]
    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the texts of recorded warnings.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.texts(|e| match e {
            Event::Warning { text } => Some(text.clone()),
            _ => None,
        })
    }

    /// Returns the texts of recorded informational messages.
    #[must_use]
    pub fn infos(&self) -> Vec<String> {
        self.texts(|e| match e {
            Event::Info { text } => Some(text.clone()),
            _ => None,
        })
    }

    /// Returns the texts of recorded error messages.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.texts(|e| match e {
            Event::Error { text } => Some(text.clone()),
            _ => None,
        })
    }

    /// Returns the titles of opened progress scopes.
    #[must_use]
    pub fn progress_titles(&self) -> Vec<String> {
        self.texts(|e| match e {
            Event::ProgressStarted { title } => Some(title.clone()),
            _ => None,
        })
    }

    /// Returns the item lists offered to the picker.
    #[must_use]
    pub fn offered(&self) -> Vec<Vec<PickItem>> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Selection { offered, .. } => Some(offered),
                _ => None,
            })
            .collect()
    }

    fn texts(&self, f: impl Fn(&Event) -> Option<String>) -> Vec<String> {
        self.events().iter().filter_map(f).collect()
    }
}

#[async_trait]
impl Interaction for ScriptedInteraction {
    async fn present_selection(&self, _prompt: &str, items: &[PickItem]) -> Vec<PickItem> {
        let chosen = self.selection.pick(items);
        self.record(Event::Selection {
            offered: items.to_vec(),
            chosen: chosen.clone(),
        });
        chosen
    }

    fn show_warning(&self, text: &str) {
        self.record(Event::Warning { text: text.into() });
    }

    fn show_info(&self, text: &str) {
        self.record(Event::Info { text: text.into() });
    }

    fn show_error(&self, text: &str) {
        self.record(Event::Error { text: text.into() });
    }

    fn progress_started(&self, title: &str) {
        self.record(Event::ProgressStarted {
            title: title.into(),
        });
    }

    fn progress_finished(&self, title: &str) {
        self.record(Event::ProgressFinished {
            title: title.into(),
        });
    }
}
