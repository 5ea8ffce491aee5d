//! Persisted credential record: server address, account email and API token.
//!
//! The record is a small JSON file (`.cred` in the working directory unless
//! `credentials.path` says otherwise). It is loaded once per invocation and
//! only rewritten by `configure` and `login`.
//!
//! `PLAYBOOK_HOST`, `PLAYBOOK_PORT`, `PLAYBOOK_EMAIL` and `PLAYBOOK_TOKEN`
//! override the stored values, which lets CI run without a credential file.

use std::fs;
use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized},
};
use serde::{Deserialize, Serialize};

use crate::client::ClientConfig;
use crate::error::ConfigError;

const DEFAULT_CREDENTIALS_FILE: &str = ".cred";
const ENV_OVERRIDES: &[&str] = &["host", "port", "email", "token"];

fn default_path() -> PathBuf {
    PathBuf::from(DEFAULT_CREDENTIALS_FILE)
}

const fn default_port() -> u16 {
    80
}

/// Where the credential record lives.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CredentialsConfig {
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Credentials {
    #[serde(default)]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub token: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: default_port(),
            email: String::new(),
            token: String::new(),
        }
    }
}

/// Everything a remote call needs, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub base_url: String,
    pub email: String,
    pub token: String,
}

impl Credentials {
    #[must_use]
    pub fn new(host: &str, port: u16, email: &str) -> Self {
        Self {
            host: host.to_string(),
            port,
            email: email.to_string(),
            token: String::new(),
        }
    }

    /// Load the record from `path`, then apply `PLAYBOOK_*` overrides.
    ///
    /// A missing file yields an empty record; callers that need a usable
    /// session go through [`Credentials::require_session`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if the file exists but is not a valid
    /// credential record.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::figment(path).extract().map_err(ConfigError::from)
    }

    /// Load the record exactly as stored, without `PLAYBOOK_*` overrides.
    /// Used before rewriting the file so overrides are never persisted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if the file exists but is not a valid
    /// credential record.
    pub fn load_stored(path: &Path) -> Result<Self, ConfigError> {
        Self::stored(path).extract().map_err(ConfigError::from)
    }

    #[must_use]
    pub fn figment(path: &Path) -> Figment {
        Self::stored(path).merge(Env::prefixed("PLAYBOOK_").only(ENV_OVERRIDES))
    }

    fn stored(path: &Path) -> Figment {
        let figment = Figment::from(Serialized::defaults(Self::default()));
        // `file_exact` keeps a relative `.cred` from resolving to a parent directory.
        if path.exists() {
            figment.merge(Json::file_exact(path))
        } else {
            figment
        }
    }

    /// Write the record as pretty JSON, readable only by the owner on unix.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file or its directory cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let body = serde_json::to_string_pretty(self)?;
        fs::write(path, body).map_err(io_error)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(io_error)?;
        }

        tracing::debug!(path = %path.display(), "credentials written");
        Ok(())
    }

    #[must_use]
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = token.to_string();
        self
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.host.is_empty() && !self.token.is_empty()
    }

    /// Base URL of the API, e.g. `http://localhost:5042/api`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when no host is recorded.
    pub fn base_url(&self, client: &ClientConfig) -> Result<String, ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "credentials.host".into(),
            });
        }
        Ok(format!(
            "{}://{}:{}{}",
            client.scheme,
            self.host,
            self.port,
            client.normalized_prefix()
        ))
    }

    /// Resolve an authenticated session.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when the host or token is empty.
    pub fn require_session(&self, client: &ClientConfig) -> Result<Session, ConfigError> {
        let base_url = self.base_url(client)?;
        if self.token.is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "credentials.token".into(),
            });
        }
        Ok(Session {
            base_url,
            email: self.email.clone(),
            token: self.token.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn configured() -> Credentials {
        Credentials::new("localhost", 5042, "admin@admin.com").with_token("tok")
    }

    #[test]
    fn empty_record_is_not_configured() {
        let creds = Credentials::default();
        assert!(!creds.is_configured());
        assert_eq!(creds.port, 80);
        assert!(matches!(
            creds.require_session(&ClientConfig::default()),
            Err(ConfigError::NotConfigured { .. })
        ));
    }

    #[test]
    fn missing_token_is_not_configured() {
        let creds = Credentials::new("localhost", 5042, "a@b.c");
        let err = creds.require_session(&ClientConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::NotConfigured { ref section } if section == "credentials.token"));
        assert!(creds.base_url(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn session_carries_base_url_and_token() {
        let session = configured()
            .require_session(&ClientConfig::default())
            .expect("session");
        assert_eq!(
            session,
            Session {
                base_url: "http://localhost:5042/api".into(),
                email: "admin@admin.com".into(),
                token: "tok".into(),
            }
        );
    }

    #[test]
    fn save_then_load_cycle() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("nested").join(".cred");

        configured().save(&path).expect("save");
        let loaded = Credentials::load(&path).expect("load");
        assert_eq!(loaded.host, "localhost");
        assert_eq!(loaded.port, 5042);
        assert_eq!(loaded.email, "admin@admin.com");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).expect("metadata").permissions().mode() & 0o777;
            assert_eq!(mode, 0o600, "credentials file should be 0600");
        }
    }

    #[test]
    fn missing_file_is_an_empty_record() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let loaded = Credentials::load_stored(&tmp.path().join(".cred")).expect("load");
        assert_eq!(loaded, Credentials::default());
    }

    #[test]
    fn malformed_record_is_an_error() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join(".cred");
        fs::write(&path, "{ not json").expect("write");
        assert!(matches!(
            Credentials::load(&path),
            Err(ConfigError::Figment(_))
        ));
    }

    #[test]
    fn saved_record_uses_cred_file_field_names() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join(".cred");
        configured().save(&path).expect("save");

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");
        assert_eq!(
            raw,
            serde_json::json!({
                "host": "localhost",
                "port": 5042,
                "email": "admin@admin.com",
                "token": "tok",
            })
        );
    }
}
