use anyhow::Context;
use pb_config::{Credentials, PlaybookConfig};

/// Load `.env` from the working directory, then the layered configuration.
pub fn load_config() -> anyhow::Result<PlaybookConfig> {
    if let Err(error) = dotenvy::dotenv()
        && !error.not_found()
    {
        return Err(anyhow::Error::new(error).context("failed to load .env file"));
    }

    PlaybookConfig::load().context("failed to load playbook configuration")
}

/// Read the credential record named by the configuration.
pub fn load_credentials(config: &PlaybookConfig) -> anyhow::Result<Credentials> {
    let path = &config.credentials.path;
    Credentials::load(path)
        .with_context(|| format!("failed to read credential record at {}", path.display()))
}

/// Read the credential record as stored on disk, ignoring `PLAYBOOK_*`
/// overrides. Commands that rewrite the file start from this.
pub fn load_stored_credentials(config: &PlaybookConfig) -> anyhow::Result<Credentials> {
    let path = &config.credentials.path;
    Credentials::load_stored(path)
        .with_context(|| format!("failed to read credential record at {}", path.display()))
}
