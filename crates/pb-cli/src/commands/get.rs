mod feature;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::GetCommands;
use crate::context::AppContext;

/// Handle `playbook get`.
pub async fn handle(action: &GetCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        GetCommands::Feature(args) => feature::run(args, ctx, flags).await,
    }
}
