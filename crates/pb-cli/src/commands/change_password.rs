use anyhow::bail;
use pb_config::PlaybookConfig;
use pb_core::wire::ChangePasswordRequest;
use serde_json::json;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ChangePasswordArgs;
use crate::commands::shared::{account, password};
use crate::output::output;

/// Handle `playbook change-password`.
pub async fn handle(
    args: &ChangePasswordArgs,
    config: &PlaybookConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let credentials = bootstrap::load_credentials(config)?;
    let email = args.email.clone().unwrap_or_else(|| credentials.email.clone());
    if email.is_empty() {
        bail!("no email stored; pass --email");
    }

    let request = build_request(args, email)?;
    account::client(&credentials, config)?
        .change_password(&request)
        .await?;

    output(
        &json!({"password_changed": true, "email": request.email}),
        flags.format,
    )
}

fn build_request(args: &ChangePasswordArgs, email: String) -> anyhow::Result<ChangePasswordRequest> {
    let (old_password, new_password, verify_password) = if args.password_stdin {
        let mut lines = password::read_lines(std::io::stdin().lock(), 3)?.into_iter();
        (
            lines.next().unwrap_or_default(),
            lines.next().unwrap_or_default(),
            lines.next().unwrap_or_default(),
        )
    } else {
        match (&args.current_password, &args.new_password, &args.confirm_password) {
            (Some(current), Some(new), Some(confirm)) => {
                (current.clone(), new.clone(), confirm.clone())
            }
            _ => bail!(
                "pass --current-password, --new-password and --confirm-password, or --password-stdin"
            ),
        }
    };

    validate(&old_password, &new_password, &verify_password)?;
    Ok(ChangePasswordRequest {
        email,
        old_password,
        new_password,
        verify_password,
    })
}

fn validate(current: &str, new: &str, confirm: &str) -> anyhow::Result<()> {
    if current.is_empty() || new.is_empty() {
        bail!("passwords must not be empty");
    }
    if new != confirm {
        bail!("new password and confirmation don't match");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(current: &str, new: &str, confirm: &str) -> ChangePasswordArgs {
        ChangePasswordArgs {
            email: None,
            current_password: Some(current.into()),
            new_password: Some(new.into()),
            confirm_password: Some(confirm.into()),
            password_stdin: false,
        }
    }

    #[test]
    fn mismatched_confirmation_is_rejected_locally() {
        let err = build_request(&args("old", "new-1", "new-2"), "a@b.c".into()).unwrap_err();
        assert!(err.to_string().contains("don't match"));
    }

    #[test]
    fn matching_passwords_build_the_request() {
        let request = build_request(&args("old", "new", "new"), "a@b.c".into()).unwrap();
        assert_eq!(request.email, "a@b.c");
        assert_eq!(request.old_password, "old");
        assert_eq!(request.verify_password, "new");
    }

    #[test]
    fn missing_flags_are_rejected() {
        let args = ChangePasswordArgs {
            email: None,
            current_password: None,
            new_password: None,
            confirm_password: None,
            password_stdin: false,
        };
        assert!(build_request(&args, "a@b.c".into()).is_err());
    }
}
