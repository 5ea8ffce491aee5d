use figment::Jail;
use pb_config::{ClientConfig, Credentials, PlaybookConfig};

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".playbook")?;
        jail.create_file(
            ".playbook/config.toml",
            r#"
[client]
max_in_flight = 3
"#,
        )?;
        jail.set_env("PLAYBOOK_CLIENT__MAX_IN_FLIGHT", "5");

        let config = PlaybookConfig::load().expect("config loads");
        assert_eq!(config.client.max_in_flight, 5);
        Ok(())
    });
}

#[test]
fn env_token_overrides_stored_token() {
    Jail::expect_with(|jail| {
        jail.create_file(
            ".cred",
            r#"{"host": "tp.internal", "port": 9000, "email": "ops@example.com", "token": "stale"}"#,
        )?;
        jail.set_env("PLAYBOOK_TOKEN", "fresh");

        let creds = Credentials::load(std::path::Path::new(".cred")).expect("credentials load");
        assert_eq!(creds.host, "tp.internal");
        assert_eq!(creds.port, 9000);
        assert_eq!(creds.token, "fresh");

        let session = creds
            .require_session(&ClientConfig::default())
            .expect("session");
        assert_eq!(session.base_url, "http://tp.internal:9000/api");
        Ok(())
    });
}

#[test]
fn env_alone_is_enough_without_a_file() {
    Jail::expect_with(|jail| {
        jail.set_env("PLAYBOOK_HOST", "ci-host");
        jail.set_env("PLAYBOOK_PORT", "8080");
        jail.set_env("PLAYBOOK_TOKEN", "ci-token");

        let creds = Credentials::load(std::path::Path::new(".cred")).expect("credentials load");
        assert!(creds.is_configured());
        assert_eq!(creds.port, 8080);
        Ok(())
    });
}

#[test]
fn missing_file_without_env_is_not_configured() {
    Jail::expect_with(|_jail| {
        let creds = Credentials::load(std::path::Path::new(".cred")).expect("credentials load");
        assert!(!creds.is_configured());
        assert!(creds.require_session(&ClientConfig::default()).is_err());
        Ok(())
    });
}

#[test]
fn stored_record_ignores_env_overrides() {
    Jail::expect_with(|jail| {
        jail.create_file(
            ".cred",
            r#"{"host": "tp.internal", "port": 9000, "email": "ops@example.com", "token": "stale"}"#,
        )?;
        jail.set_env("PLAYBOOK_HOST", "ci-host");
        jail.set_env("PLAYBOOK_TOKEN", "fresh");

        let stored = Credentials::load_stored(std::path::Path::new(".cred")).expect("stored loads");
        assert_eq!(stored.host, "tp.internal");
        assert_eq!(stored.token, "stale");
        Ok(())
    });
}

#[test]
fn malformed_file_is_still_an_error_with_env_set() {
    Jail::expect_with(|jail| {
        jail.create_file(".cred", "{ not json")?;
        jail.set_env("PLAYBOOK_TOKEN", "ci-token");

        assert!(Credentials::load(std::path::Path::new(".cred")).is_err());
        Ok(())
    });
}
