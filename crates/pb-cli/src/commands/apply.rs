mod feature;
mod project;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ApplyCommands;
use crate::context::AppContext;

/// Handle `playbook apply`.
pub async fn handle(action: &ApplyCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ApplyCommands::Project(args) => project::run(&args.name, ctx, flags).await,
        ApplyCommands::Feature(args) => feature::run(args, ctx, flags).await,
    }
}
