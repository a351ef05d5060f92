//! `dockrun start` — Start selected stopped workspace containers.

use clap::Args;
use dockrun_core::workflow::StartSelected;

use super::{Context, SelectArgs, run_workflow};

/// Arguments for the `start` command.
#[derive(Args, Debug)]
pub struct StartArgs {
    /// Selection flags; without them the containers are offered in a picker.
    #[command(flatten)]
    pub selection: SelectArgs,
}

/// Executes the `start` command.
///
/// # Errors
///
/// Returns an error if the runtime is unreachable or a container could not
/// be started.
pub async fn execute(ctx: &Context, args: StartArgs) -> anyhow::Result<()> {
    tracing::info!("starting workspace containers");
    let workflow = StartSelected::new(ctx.classifier());
    run_workflow(ctx, &workflow, args.selection.preset()).await
}
