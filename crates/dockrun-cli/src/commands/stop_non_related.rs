//! `dockrun stop-non-related` — Stop every running container outside the
//! workspace.

use clap::Args;
use dockrun_core::workflow::StopNonRelated;

use super::{Context, run_workflow};

/// Arguments for the `stop-non-related` command.
#[derive(Args, Debug)]
pub struct StopNonRelatedArgs {}

/// Executes the `stop-non-related` command.
///
/// # Errors
///
/// Returns an error if the runtime is unreachable or a container could not
/// be stopped.
pub async fn execute(ctx: &Context, _args: StopNonRelatedArgs) -> anyhow::Result<()> {
    tracing::info!("stopping non-related containers");
    let workflow = StopNonRelated::new(ctx.classifier());
    run_workflow(ctx, &workflow, None).await
}
