//! End-to-end tests for the dockrun command workflows.
//!
//! Every test runs a workflow against the local state-index runtime and a
//! `.dockerrc` workspace file in a temp directory, answering prompts with a
//! scripted surface:
//! 1. Stop selected workspace containers
//! 2. Stop non-related containers
//! 3. Start selected workspace containers
//! 4. Add / remove workspace membership
//! 5. Runtime connectivity failures

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dockrun_common::error::{DockrunError, Result};
use dockrun_common::types::{ContainerId, RunState};
use dockrun_core::classify::Classifier;
use dockrun_core::executor::ActionResult;
use dockrun_core::surface::{Event, ScriptedInteraction, ScriptedSelection};
use dockrun_core::workflow::{
    AddToWorkspace, RemoveFromWorkspace, SelectionVerb, SkipReason, StartSelected, StopNonRelated,
    StopSelected, Workflow, WorkflowOutcome,
};
use dockrun_core::workspace::{FileConfigStore, WorkspaceConfigStore};
use dockrun_runtime::backend::local::StateIndexClient;
use dockrun_runtime::backend::{ContainerInfo, RuntimeClient};
use dockrun_runtime::state::{self, StateEntry, StateIndex};

// ── Harness ──────────────────────────────────────────────────────────

/// State-index runtime that records lifecycle calls and can refuse stops.
struct RecordingRuntime {
    inner: StateIndexClient,
    stops: Mutex<Vec<String>>,
    starts: Mutex<Vec<String>>,
    refuse_stop: HashSet<String>,
}

#[async_trait]
impl RuntimeClient for RecordingRuntime {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn list_containers(&self) -> Result<Vec<ContainerInfo>> {
        self.inner.list_containers().await
    }

    async fn start_container(&self, id: &ContainerId) -> Result<()> {
        self.starts.lock().unwrap().push(id.to_string());
        self.inner.start_container(id).await
    }

    async fn stop_container(&self, id: &ContainerId) -> Result<()> {
        self.stops.lock().unwrap().push(id.to_string());
        if self.refuse_stop.contains(id.as_str()) {
            return Err(DockrunError::Runtime {
                action: "stop",
                id: id.to_string(),
                message: "container is paused".into(),
            });
        }
        self.inner.stop_container(id).await
    }
}

struct Harness {
    _dir: tempfile::TempDir,
    state_file: PathBuf,
    store: Arc<FileConfigStore>,
    runtime: Arc<RecordingRuntime>,
}

impl Harness {
    /// `containers` are `(id, running)` pairs; names are `<id>-name`.
    fn new(containers: &[(&str, bool)], tracked: &[&str]) -> Self {
        Self::with_refusals(containers, tracked, &[])
    }

    fn with_refusals(containers: &[(&str, bool)], tracked: &[&str], refuse: &[&str]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let state_file = dir.path().join("state.json");
        let index = StateIndex {
            containers: containers
                .iter()
                .map(|(id, running)| StateEntry {
                    id: ContainerId::new(*id),
                    name: format!("{id}-name"),
                    state: if *running {
                        RunState::Running
                    } else {
                        RunState::Exited
                    },
                })
                .collect(),
        };
        state::save_state(&state_file, &index).unwrap();

        let store = Arc::new(FileConfigStore::new(dir.path().join(".dockerrc")));
        if !tracked.is_empty() {
            let ids: Vec<_> = tracked.iter().map(|id| ContainerId::new(*id)).collect();
            store.write_tracked_ids(&ids).unwrap();
        }

        let runtime = Arc::new(RecordingRuntime {
            inner: StateIndexClient::new(state_file.clone()),
            stops: Mutex::new(Vec::new()),
            starts: Mutex::new(Vec::new()),
            refuse_stop: refuse.iter().map(ToString::to_string).collect(),
        });

        Self {
            _dir: dir,
            state_file,
            store,
            runtime,
        }
    }

    fn classifier(&self) -> Classifier {
        Classifier::new(self.runtime.clone(), self.store.clone())
    }

    fn is_running(&self, id: &str) -> bool {
        state::load_state(&self.state_file)
            .unwrap()
            .containers
            .iter()
            .find(|e| e.id.as_str() == id)
            .unwrap()
            .state
            .is_running()
    }

    fn stops(&self) -> Vec<String> {
        self.runtime.stops.lock().unwrap().clone()
    }

    fn starts(&self) -> Vec<String> {
        self.runtime.starts.lock().unwrap().clone()
    }

    fn tracked(&self) -> Vec<String> {
        self.store
            .read_tracked_ids()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

fn select(ids: &[&str]) -> ScriptedInteraction {
    ScriptedInteraction::new(ScriptedSelection::Ids(
        ids.iter().map(|id| ContainerId::new(*id)).collect(),
    ))
}

fn nothing() -> ScriptedInteraction {
    ScriptedInteraction::new(ScriptedSelection::Nothing)
}

// ── Stop selected ────────────────────────────────────────────────────

#[tokio::test]
async fn stop_without_workspace_containers_asks_to_add_one() {
    let h = Harness::new(&[("x1", true)], &[]);
    let surface = select(&["x1"]);

    let outcome = StopSelected::new(h.classifier()).run(&surface).await.unwrap();

    assert_eq!(outcome, WorkflowOutcome::Skipped(SkipReason::NoWorkspaceContainers));
    assert_eq!(
        surface.warnings(),
        ["Please Add At Least One Container To Workspace"]
    );
    assert!(surface.offered().is_empty());
    assert!(surface.progress_titles().is_empty());
    assert!(h.stops().is_empty());
}

#[tokio::test]
async fn stop_tracked_id_missing_from_runtime_counts_as_no_container() {
    let h = Harness::new(&[("x1", true)], &["gone"]);
    let surface = nothing();

    let outcome = StopSelected::new(h.classifier()).run(&surface).await.unwrap();

    assert_eq!(outcome, WorkflowOutcome::Skipped(SkipReason::NoWorkspaceContainers));
}

#[tokio::test]
async fn stop_with_all_tracked_stopped_reports_it() {
    let h = Harness::new(&[("a", false), ("b", false), ("x", true)], &["a", "b"]);
    let surface = select(&["a"]);

    let outcome = StopSelected::new(h.classifier()).run(&surface).await.unwrap();

    assert_eq!(outcome, WorkflowOutcome::Skipped(SkipReason::AllStopped));
    assert_eq!(
        surface.warnings(),
        ["All Containers For Current Workspace Are Stopped"]
    );
    assert!(surface.offered().is_empty());
    assert!(h.stops().is_empty());
}

#[tokio::test]
async fn stop_offers_only_running_tracked_containers_in_runtime_order() {
    let h = Harness::new(
        &[("c3", true), ("x", true), ("c1", true), ("c2", false)],
        &["c1", "c2", "c3"],
    );
    let surface = nothing();

    let _ = StopSelected::new(h.classifier()).run(&surface).await.unwrap();

    let offered = surface.offered();
    assert_eq!(offered.len(), 1);
    let ids: Vec<_> = offered[0].iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["c3", "c1"]);
    assert_eq!(offered[0][0].label, "c3-name");
}

#[tokio::test]
async fn stop_with_empty_selection_warns_and_stops_nothing() {
    let h = Harness::new(&[("c1", true), ("c2", true), ("c3", true)], &["c1", "c2", "c3"]);
    let surface = nothing();

    let outcome = StopSelected::new(h.classifier()).run(&surface).await.unwrap();

    assert_eq!(
        outcome,
        WorkflowOutcome::Skipped(SkipReason::EmptySelection(SelectionVerb::Stop))
    );
    assert_eq!(
        surface.warnings(),
        ["Please Select At least One Container To Stop"]
    );
    assert!(surface.progress_titles().is_empty());
    assert!(h.stops().is_empty());
    assert!(h.is_running("c1") && h.is_running("c2") && h.is_running("c3"));
}

#[tokio::test]
async fn stop_single_selected_container() {
    let h = Harness::new(&[("a", true)], &["a"]);
    let surface = select(&["a"]);

    let outcome = StopSelected::new(h.classifier()).run(&surface).await.unwrap();

    assert!(outcome.is_success());
    assert_eq!(h.stops(), ["a"]);
    assert_eq!(surface.infos(), ["Successfully Stopped a-name"]);
    assert!(!h.is_running("a"));

    // Selection first, then the progress scope, then the outcome.
    let events = surface.events();
    assert!(matches!(events[0], Event::Selection { .. }));
    assert_eq!(
        events[1],
        Event::ProgressStarted {
            title: "Stopping Containers".into()
        }
    );
    assert_eq!(
        events[2],
        Event::Info {
            text: "Successfully Stopped a-name".into()
        }
    );
    assert!(matches!(events[3], Event::ProgressFinished { .. }));
}

#[tokio::test]
async fn stop_subset_leaves_the_rest_running() {
    let h = Harness::new(&[("c1", true), ("c2", true), ("c3", true)], &["c1", "c2", "c3"]);
    let surface = select(&["c3", "c1"]);

    let outcome = StopSelected::new(h.classifier()).run(&surface).await.unwrap();

    let WorkflowOutcome::Completed(report) = outcome else {
        panic!("expected a completed batch");
    };
    assert_eq!(report.succeeded(), 2);
    let mut stops = h.stops();
    stops.sort();
    assert_eq!(stops, ["c1", "c3"]);
    assert_eq!(
        surface.infos(),
        ["Successfully Stopped c3-name", "Successfully Stopped c1-name"]
    );
    assert_eq!(surface.progress_titles().len(), 1);
    assert!(!h.is_running("c1"));
    assert!(h.is_running("c2"));
    assert!(!h.is_running("c3"));
}

#[tokio::test]
async fn stop_all_selected_containers() {
    let h = Harness::new(&[("c1", true), ("c2", true), ("c3", true)], &["c1", "c2", "c3"]);
    let surface = ScriptedInteraction::new(ScriptedSelection::All);

    let _ = StopSelected::new(h.classifier()).run(&surface).await.unwrap();

    assert_eq!(h.stops().len(), 3);
    assert_eq!(
        surface.infos(),
        [
            "Successfully Stopped c1-name",
            "Successfully Stopped c2-name",
            "Successfully Stopped c3-name",
        ]
    );
    assert!(!h.is_running("c1") && !h.is_running("c2") && !h.is_running("c3"));
}

// ── Stop non-related ─────────────────────────────────────────────────

#[tokio::test]
async fn non_related_with_nothing_running_warns_inside_progress() {
    let h = Harness::new(&[("t", true), ("x", false)], &["t"]);
    let surface = nothing();

    let outcome = StopNonRelated::new(h.classifier()).run(&surface).await.unwrap();

    assert_eq!(outcome, WorkflowOutcome::Skipped(SkipReason::NoNonRelated));
    assert_eq!(surface.warnings(), ["No non related container found"]);
    assert_eq!(
        surface.progress_titles(),
        ["Stopping Non Related Containers"]
    );
    assert!(surface.infos().is_empty());
    assert!(h.stops().is_empty());
    assert!(h.is_running("t"));
}

#[tokio::test]
async fn non_related_stops_single_container() {
    let h = Harness::new(&[("x1", true)], &[]);
    let surface = nothing();

    let _ = StopNonRelated::new(h.classifier()).run(&surface).await.unwrap();

    assert_eq!(h.stops(), ["x1"]);
    assert_eq!(
        surface.infos(),
        ["Successfully Stopped Non Related Container x1-name"]
    );
    assert_eq!(surface.progress_titles().len(), 1);
    assert!(surface.offered().is_empty());
    assert!(!h.is_running("x1"));
}

#[tokio::test]
async fn non_related_stops_all_in_classification_order_and_reruns_cleanly() {
    let h = Harness::new(
        &[("c1", true), ("t1", true), ("c2", true), ("c3", true), ("old", false)],
        &["t1"],
    );
    let surface = nothing();

    let _ = StopNonRelated::new(h.classifier()).run(&surface).await.unwrap();

    let mut stops = h.stops();
    stops.sort();
    assert_eq!(stops, ["c1", "c2", "c3"]);
    assert_eq!(
        surface.infos(),
        [
            "Successfully Stopped Non Related Container c1-name",
            "Successfully Stopped Non Related Container c2-name",
            "Successfully Stopped Non Related Container c3-name",
        ]
    );
    assert!(!h.is_running("c1") && !h.is_running("c2") && !h.is_running("c3"));
    assert!(h.is_running("t1"));

    let rerun = nothing();
    let outcome = StopNonRelated::new(h.classifier()).run(&rerun).await.unwrap();
    assert_eq!(outcome, WorkflowOutcome::Skipped(SkipReason::NoNonRelated));
    assert!(rerun.infos().is_empty());
    assert_eq!(rerun.progress_titles().len(), 1);
    assert_eq!(h.stops().len(), 3);
}

#[tokio::test]
async fn non_related_failure_does_not_affect_siblings() {
    let h = Harness::with_refusals(&[("c1", true), ("c2", true), ("c3", true)], &[], &["c2"]);
    let surface = nothing();

    let outcome = StopNonRelated::new(h.classifier()).run(&surface).await.unwrap();

    let WorkflowOutcome::Completed(report) = outcome else {
        panic!("expected a completed batch");
    };
    assert_eq!(report.succeeded(), 2);
    assert!(matches!(report.outcomes[1].result, ActionResult::Failed(_)));
    assert_eq!(
        surface.infos(),
        [
            "Successfully Stopped Non Related Container c1-name",
            "Successfully Stopped Non Related Container c3-name",
        ]
    );
    assert_eq!(surface.errors().len(), 1);
    assert!(!h.is_running("c1"));
    assert!(h.is_running("c2"));
    assert!(!h.is_running("c3"));
}

#[tokio::test]
async fn workspace_edits_apply_to_the_next_run_of_the_same_classifier() {
    let h = Harness::with_refusals(&[("x1", true), ("x2", true)], &[], &["x2"]);
    let classifier = h.classifier();
    let sweep = StopNonRelated::new(classifier.clone());

    let first = nothing();
    let _ = sweep.run(&first).await.unwrap();
    assert_eq!(h.stops().len(), 2);
    assert!(h.is_running("x2"));

    h.store.write_tracked_ids(&[ContainerId::new("x2")]).unwrap();

    let second = nothing();
    let outcome = sweep.run(&second).await.unwrap();
    assert_eq!(outcome, WorkflowOutcome::Skipped(SkipReason::NoNonRelated));
    assert_eq!(h.stops().len(), 2);
    assert!(h.is_running("x2"));

    let surface = nothing();
    let _ = StopSelected::new(classifier).run(&surface).await.unwrap();
    let offered = surface.offered();
    assert_eq!(offered.len(), 1);
    assert_eq!(offered[0][0].id.as_str(), "x2");
}

// ── Start selected ───────────────────────────────────────────────────

#[tokio::test]
async fn start_selected_stopped_containers() {
    let h = Harness::new(&[("a", false), ("b", true), ("c", false)], &["a", "b", "c"]);
    let surface = ScriptedInteraction::new(ScriptedSelection::All);

    let _ = StartSelected::new(h.classifier()).run(&surface).await.unwrap();

    let offered: Vec<_> = surface.offered()[0].iter().map(|i| i.id.to_string()).collect();
    assert_eq!(offered, ["a", "c"]);
    assert_eq!(
        surface.infos(),
        ["Successfully Started a-name", "Successfully Started c-name"]
    );
    assert_eq!(surface.progress_titles(), ["Starting Containers"]);
    assert!(h.is_running("a") && h.is_running("c"));
    assert!(h.starts().len() == 2);
}

#[tokio::test]
async fn start_with_everything_running_reports_it() {
    let h = Harness::new(&[("a", true)], &["a"]);
    let surface = ScriptedInteraction::new(ScriptedSelection::All);

    let outcome = StartSelected::new(h.classifier()).run(&surface).await.unwrap();

    assert_eq!(outcome, WorkflowOutcome::Skipped(SkipReason::AllRunning));
    assert_eq!(
        surface.warnings(),
        ["All Containers For Current Workspace Are Running"]
    );
    assert!(h.starts().is_empty());
}

// ── Membership ───────────────────────────────────────────────────────

#[tokio::test]
async fn add_appends_chosen_containers_to_workspace() {
    let h = Harness::new(&[("a", true), ("b", false), ("c", true)], &["a"]);
    let surface = select(&["c", "b"]);

    let outcome = AddToWorkspace::new(h.classifier()).run(&surface).await.unwrap();

    assert!(matches!(outcome, WorkflowOutcome::Updated(ref items) if items.len() == 2));
    assert_eq!(h.tracked(), ["a", "c", "b"]);
    assert_eq!(
        surface.infos(),
        ["Added c-name To Workspace", "Added b-name To Workspace"]
    );
    assert!(h.stops().is_empty());
}

#[tokio::test]
async fn add_with_everything_tracked_warns() {
    let h = Harness::new(&[("a", true)], &["a"]);
    let surface = ScriptedInteraction::new(ScriptedSelection::All);

    let outcome = AddToWorkspace::new(h.classifier()).run(&surface).await.unwrap();

    assert_eq!(outcome, WorkflowOutcome::Skipped(SkipReason::NothingToAdd));
    assert_eq!(surface.warnings(), ["No Container Available To Add"]);
}

#[tokio::test]
async fn remove_drops_chosen_containers_from_workspace() {
    let h = Harness::new(&[("a", true), ("b", false), ("c", true)], &["a", "b", "c"]);
    let surface = select(&["b"]);

    let _ = RemoveFromWorkspace::new(h.classifier()).run(&surface).await.unwrap();

    assert_eq!(h.tracked(), ["a", "c"]);
    assert_eq!(surface.infos(), ["Removed b-name From Workspace"]);
}

#[tokio::test]
async fn remove_with_empty_selection_keeps_workspace() {
    let h = Harness::new(&[("a", true)], &["a"]);
    let surface = nothing();

    let outcome = RemoveFromWorkspace::new(h.classifier()).run(&surface).await.unwrap();

    assert_eq!(
        outcome,
        WorkflowOutcome::Skipped(SkipReason::EmptySelection(SelectionVerb::Remove))
    );
    assert_eq!(h.tracked(), ["a"]);
}

// ── Runtime unavailable ──────────────────────────────────────────────

fn unreachable_classifier(dir: &tempfile::TempDir) -> Classifier {
    // A directory in place of the state index cannot be read.
    let runtime = Arc::new(StateIndexClient::new(dir.path().to_path_buf()));
    let store = Arc::new(FileConfigStore::new(dir.path().join(".dockerrc")));
    Classifier::new(runtime, store)
}

#[tokio::test]
async fn stop_propagates_runtime_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let surface = ScriptedInteraction::new(ScriptedSelection::All);

    let err = StopSelected::new(unreachable_classifier(&dir))
        .run(&surface)
        .await
        .unwrap_err();

    assert!(err.is_runtime_unavailable());
    assert!(surface.warnings().is_empty());
}

#[tokio::test]
async fn non_related_propagates_runtime_unavailable_after_closing_progress() {
    let dir = tempfile::tempdir().unwrap();
    let surface = nothing();

    let err = StopNonRelated::new(unreachable_classifier(&dir))
        .run(&surface)
        .await
        .unwrap_err();

    assert!(err.is_runtime_unavailable());
    assert_eq!(surface.progress_titles().len(), 1);
    assert!(matches!(
        surface.events().last(),
        Some(Event::ProgressFinished { .. })
    ));
}
