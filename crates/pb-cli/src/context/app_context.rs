use anyhow::Context;
use pb_client::{HttpTransport, PlaybookClient};
use pb_config::PlaybookConfig;

use crate::bootstrap;

/// Resources shared by commands that talk to the server with a stored token.
pub struct AppContext {
    pub config: PlaybookConfig,
    pub client: PlaybookClient<HttpTransport>,
}

impl AppContext {
    /// Resolve the stored session and build the HTTP client.
    pub fn init(config: PlaybookConfig) -> anyhow::Result<Self> {
        let credentials = bootstrap::load_credentials(&config)?;
        let session = credentials
            .require_session(&config.client)
            .context("playbook is not configured. Run 'playbook configure' first")?;

        let transport = HttpTransport::new(
            &session.base_url,
            Some(&session.token),
            config.client.request_timeout(),
        )
        .context("failed to initialize HTTP client")?;

        tracing::debug!(base_url = %session.base_url, "session resolved");

        Ok(Self {
            config,
            client: PlaybookClient::new(transport),
        })
    }
}
