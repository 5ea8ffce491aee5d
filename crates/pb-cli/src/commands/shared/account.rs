use anyhow::Context;
use pb_client::{HttpTransport, PlaybookClient};
use pb_config::{Credentials, PlaybookConfig};

/// Client for the account endpoints, which do not send a token.
pub fn client(
    credentials: &Credentials,
    config: &PlaybookConfig,
) -> anyhow::Result<PlaybookClient<HttpTransport>> {
    let base_url = credentials
        .base_url(&config.client)
        .context("no server configured. Run 'playbook configure' first")?;
    let transport = HttpTransport::new(&base_url, None, config.client.request_timeout())
        .context("failed to initialize HTTP client")?;
    Ok(PlaybookClient::new(transport))
}

/// Log in against the server recorded in `credentials`.
pub async fn fetch_token(
    credentials: &Credentials,
    config: &PlaybookConfig,
    password: &str,
) -> anyhow::Result<String> {
    let client = client(credentials, config)?;
    client
        .login(&credentials.email, password)
        .await
        .with_context(|| format!("login as '{}' failed", credentials.email))
}
