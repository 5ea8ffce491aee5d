use anyhow::{Context, bail};
use pb_config::PlaybookConfig;
use serde_json::json;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::LoginArgs;
use crate::commands::shared::{account, password};
use crate::output::output;

/// Handle `playbook login`: fetch a fresh token for the stored server.
///
/// The server address may come from `PLAYBOOK_*` overrides, but only the
/// email and token are written back over the stored record.
pub async fn handle(args: &LoginArgs, config: &PlaybookConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut effective = bootstrap::load_credentials(config)?;
    if let Some(email) = &args.email {
        effective.email.clone_from(email);
    }
    if effective.email.is_empty() {
        bail!("no email stored; pass --email");
    }

    let password = password::resolve(args.password.as_deref(), args.password_stdin)?;
    let token = account::fetch_token(&effective, config, &password).await?;

    let mut stored = bootstrap::load_stored_credentials(config)?;
    stored.email.clone_from(&effective.email);
    let stored = stored.with_token(&token);

    let path = &config.credentials.path;
    stored
        .save(path)
        .with_context(|| format!("failed to write credential record to {}", path.display()))?;

    output(&json!({"logged_in": true, "email": stored.email}), flags.format)
}
