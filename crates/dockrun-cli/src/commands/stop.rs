//! `dockrun stop` — Stop selected running workspace containers.

use clap::Args;
use dockrun_core::workflow::StopSelected;

use super::{Context, SelectArgs, run_workflow};

/// Arguments for the `stop` command.
#[derive(Args, Debug)]
pub struct StopArgs {
    /// Selection flags; without them the containers are offered in a picker.
    #[command(flatten)]
    pub selection: SelectArgs,
}

/// Executes the `stop` command.
///
/// # Errors
///
/// Returns an error if the runtime is unreachable or a container could not
/// be stopped.
pub async fn execute(ctx: &Context, args: StopArgs) -> anyhow::Result<()> {
    tracing::info!("stopping workspace containers");
    let workflow = StopSelected::new(ctx.classifier());
    run_workflow(ctx, &workflow, args.selection.preset()).await
}
