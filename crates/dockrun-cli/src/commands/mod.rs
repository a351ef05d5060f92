//! CLI command definitions and dispatch.

pub mod add;
pub mod ps;
pub mod remove;
pub mod start;
pub mod stop;
pub mod stop_non_related;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use dockrun_common::config::{DockrunConfig, RuntimeKind};
use dockrun_common::types::ContainerId;
use dockrun_core::classify::Classifier;
use dockrun_core::surface::{ScriptedInteraction, ScriptedSelection};
use dockrun_core::workflow::Workflow;
use dockrun_core::workspace::FileConfigStore;

use crate::output;
use crate::terminal::TerminalInteraction;

/// dockrun — manage the containers of a development workspace.
#[derive(Parser, Debug)]
#[command(name = "dockrun", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Workspace root holding the container list file.
    #[arg(long, short = 'w', global = true, env = "DOCKRUN_WORKSPACE", default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file (defaults to ~/.dockrun/config.json).
    #[arg(long, global = true, env = "DOCKRUN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Runtime client: `docker` or `state`.
    #[arg(long, global = true, env = "DOCKRUN_RUNTIME")]
    pub runtime: Option<RuntimeKind>,

    /// Docker-compatible binary to invoke (e.g. `podman`).
    #[arg(long, global = true, env = "DOCKRUN_RUNTIME_BIN")]
    pub runtime_bin: Option<String>,

    /// State index used by the `state` runtime.
    #[arg(long, global = true, env = "DOCKRUN_STATE_FILE")]
    pub state_file: Option<PathBuf>,

    /// Print interaction events as JSON lines instead of prompting.
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Stop selected running workspace containers.
    Stop(stop::StopArgs),
    /// Stop every running container that is not part of the workspace.
    StopNonRelated(stop_non_related::StopNonRelatedArgs),
    /// Start selected stopped workspace containers.
    Start(start::StartArgs),
    /// Add containers to the workspace.
    Add(add::AddArgs),
    /// Remove containers from the workspace.
    Remove(remove::RemoveArgs),
    /// List containers by workspace membership.
    Ps(ps::PsArgs),
}

/// Non-interactive selection flags shared by the selecting commands.
#[derive(Args, Debug, Default)]
pub struct SelectArgs {
    /// Containers to choose without prompting (id, id prefix, or name).
    #[arg(long = "select", value_name = "ID", num_args = 1..)]
    pub select: Vec<String>,

    /// Choose every offered container without prompting.
    #[arg(long, conflicts_with = "select")]
    pub all: bool,
}

impl SelectArgs {
    /// Returns the preset selection, or `None` to prompt.
    pub fn preset(&self) -> Option<ScriptedSelection> {
        if self.all {
            Some(ScriptedSelection::All)
        } else if self.select.is_empty() {
            None
        } else {
            Some(ScriptedSelection::Ids(
                self.select.iter().map(|s| ContainerId::new(s.as_str())).collect(),
            ))
        }
    }
}

/// Resolved settings shared by every command.
#[derive(Debug)]
pub struct Context {
    /// Effective configuration after CLI overrides.
    pub config: DockrunConfig,
    /// Workspace root.
    pub workspace: PathBuf,
    /// Whether output is JSON.
    pub json: bool,
}

impl Context {
    /// Loads the configuration file and applies CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed.
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let path = cli
            .config
            .clone()
            .unwrap_or_else(dockrun_common::constants::default_config_file);
        let mut config = DockrunConfig::load(&path)
            .with_context(|| format!("loading {}", path.display()))?;

        if let Some(runtime) = cli.runtime {
            config.runtime = runtime;
        }
        if let Some(bin) = &cli.runtime_bin {
            config.runtime_bin.clone_from(bin);
        }
        if let Some(state_file) = &cli.state_file {
            config.state_file.clone_from(state_file);
        }

        Ok(Self {
            config,
            workspace: cli.workspace.clone(),
            json: cli.json,
        })
    }

    /// Builds a classifier over the configured runtime and workspace file.
    pub fn classifier(&self) -> Classifier {
        let runtime = dockrun_runtime::backend::connect(&self.config);
        let store = FileConfigStore::new(self.config.workspace_file_in(&self.workspace));
        tracing::debug!(
            runtime = runtime.name(),
            workspace = %store.path().display(),
            "collaborators ready"
        );
        Classifier::new(runtime, Arc::new(store))
    }
}

/// Runs `workflow` on the terminal, or headless with JSON events when
/// `--json` is set. Fails if the runtime is unreachable or any container
/// in the batch failed.
///
/// # Errors
///
/// Returns an error if the workflow fails or reports failed containers.
pub async fn run_workflow(
    ctx: &Context,
    workflow: &dyn Workflow,
    preset: Option<ScriptedSelection>,
) -> anyhow::Result<()> {
    let result = if ctx.json {
        let surface = ScriptedInteraction::new(preset.unwrap_or(ScriptedSelection::Nothing));
        let result = workflow.run(&surface).await;
        output::print_events(&surface.events())?;
        result
    } else {
        let surface = TerminalInteraction::new(preset);
        workflow.run(&surface).await
    };
    let outcome = result.with_context(|| format!("{} failed", workflow.name()))?;

    tracing::debug!(command = workflow.name(), ?outcome, "workflow finished");
    if !outcome.is_success() {
        anyhow::bail!("{}: some containers could not be processed", workflow.name());
    }
    Ok(())
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    let ctx = Context::from_cli(&cli)?;
    match cli.command {
        Command::Stop(args) => stop::execute(&ctx, args).await,
        Command::StopNonRelated(args) => stop_non_related::execute(&ctx, args).await,
        Command::Start(args) => start::execute(&ctx, args).await,
        Command::Add(args) => add::execute(&ctx, args).await,
        Command::Remove(args) => remove::execute(&ctx, args).await,
        Command::Ps(args) => ps::execute(&ctx, args).await,
    }
}
