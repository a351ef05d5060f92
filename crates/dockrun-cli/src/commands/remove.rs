//! `dockrun remove` — Remove containers from the workspace.

use clap::Args;
use dockrun_core::workflow::RemoveFromWorkspace;

use super::{Context, SelectArgs, run_workflow};

/// Arguments for the `remove` command.
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Selection flags; without them the containers are offered in a picker.
    #[command(flatten)]
    pub selection: SelectArgs,
}

/// Executes the `remove` command.
///
/// # Errors
///
/// Returns an error if the runtime is unreachable or the workspace file
/// cannot be written.
pub async fn execute(ctx: &Context, args: RemoveArgs) -> anyhow::Result<()> {
    let workflow = RemoveFromWorkspace::new(ctx.classifier());
    run_workflow(ctx, &workflow, args.selection.preset()).await
}
