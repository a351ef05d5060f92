//! `dockrun ps` — List containers by workspace membership.

use clap::Args;
use dockrun_core::classify::{Membership, StateFilter};

use super::Context;
use crate::output;

/// Arguments for the `ps` command.
#[derive(Args, Debug)]
pub struct PsArgs {
    /// Show all containers (including stopped).
    #[arg(short, long)]
    pub all: bool,

    /// Show containers outside the workspace instead of tracked ones.
    #[arg(long)]
    pub non_related: bool,
}

/// Executes the `ps` command.
///
/// # Errors
///
/// Returns an error if the runtime is unreachable or the workspace file
/// cannot be read.
pub async fn execute(ctx: &Context, args: PsArgs) -> anyhow::Result<()> {
    let membership = if args.non_related {
        Membership::NonRelated
    } else {
        Membership::Tracked
    };
    let filter = if args.all {
        StateFilter::Any
    } else {
        StateFilter::Running
    };

    let containers = ctx.classifier().classify(membership, filter).await?;
    if ctx.json {
        output::print_containers_json(&containers)
    } else {
        output::print_container_table(&containers);
        Ok(())
    }
}
