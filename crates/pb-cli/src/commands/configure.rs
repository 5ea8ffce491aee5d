use anyhow::Context;
use pb_config::{Credentials, PlaybookConfig};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ConfigureArgs;
use crate::commands::shared::{account, password};
use crate::output::output;

#[derive(Serialize)]
struct ConfigureResponse {
    configured: bool,
    host: String,
    port: u16,
    email: String,
    credentials: String,
}

/// Handle `playbook configure`.
pub async fn handle(
    args: &ConfigureArgs,
    config: &PlaybookConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let password = password::resolve(args.password.as_deref(), args.password_stdin)?;
    let credentials = Credentials::new(&args.host, args.port, &args.email);

    let token = account::fetch_token(&credentials, config, &password).await?;
    let credentials = credentials.with_token(&token);

    let path = &config.credentials.path;
    credentials
        .save(path)
        .with_context(|| format!("failed to write credential record to {}", path.display()))?;
    tracing::info!(host = %credentials.host, port = credentials.port, "configured");

    output(
        &ConfigureResponse {
            configured: true,
            host: credentials.host,
            port: credentials.port,
            email: credentials.email,
            credentials: path.display().to_string(),
        },
        flags.format,
    )
}
