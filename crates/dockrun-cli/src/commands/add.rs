//! `dockrun add` — Add containers to the workspace.

use clap::Args;
use dockrun_core::workflow::AddToWorkspace;

use super::{Context, SelectArgs, run_workflow};

/// Arguments for the `add` command.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Selection flags; without them the containers are offered in a picker.
    #[command(flatten)]
    pub selection: SelectArgs,
}

/// Executes the `add` command.
///
/// # Errors
///
/// Returns an error if the runtime is unreachable or the workspace file
/// cannot be written.
pub async fn execute(ctx: &Context, args: AddArgs) -> anyhow::Result<()> {
    let workflow = AddToWorkspace::new(ctx.classifier());
    run_workflow(ctx, &workflow, args.selection.preset()).await
}
