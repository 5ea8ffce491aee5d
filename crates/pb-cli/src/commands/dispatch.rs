use pb_config::PlaybookConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
///
/// Account commands work from the credential record alone; everything else
/// needs a stored session.
pub async fn dispatch(
    command: Commands,
    config: PlaybookConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Configure(args) => commands::configure::handle(&args, &config, flags).await,
        Commands::Login(args) => commands::login::handle(&args, &config, flags).await,
        Commands::ChangePassword(args) => {
            commands::change_password::handle(&args, &config, flags).await
        }
        Commands::Apply { action } => {
            let ctx = AppContext::init(config)?;
            commands::apply::handle(&action, &ctx, flags).await
        }
        Commands::Get { action } => {
            let ctx = AppContext::init(config)?;
            commands::get::handle(&action, &ctx, flags).await
        }
        Commands::Delete(args) => {
            let ctx = AppContext::init(config)?;
            commands::delete::handle(&args, &ctx, flags).await
        }
        Commands::Schema => commands::schema::handle(flags),
    }
}
