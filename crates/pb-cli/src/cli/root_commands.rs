use clap::{Args, Subcommand, ValueEnum};

use crate::cli::subcommands::{ApplyCommands, GetCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Point the client at a server, log in and store the credential record.
    Configure(ConfigureArgs),
    /// Log in again with the stored server and replace the token.
    Login(LoginArgs),
    /// Change the account password.
    ChangePassword(ChangePasswordArgs),
    /// Create projects and feature hierarchies.
    Apply {
        #[command(subcommand)]
        action: ApplyCommands,
    },
    /// Read features back from the server.
    Get {
        #[command(subcommand)]
        action: GetCommands,
    },
    /// Delete one object.
    Delete(DeleteArgs),
    /// Print the JSON Schema of the feature document.
    Schema,
}

#[derive(Clone, Debug, Args)]
pub struct ConfigureArgs {
    /// Server host name or IP address, without scheme.
    #[arg(short = 'u', long, visible_alias = "url", default_value = "localhost")]
    pub host: String,
    /// Server port.
    #[arg(long, default_value_t = 80)]
    pub port: u16,
    /// Account email.
    #[arg(short, long, default_value = "admin@admin.com")]
    pub email: String,
    /// Account password.
    #[arg(long, conflicts_with = "password_stdin")]
    pub password: Option<String>,
    /// Read the password from the first line of stdin.
    #[arg(long)]
    pub password_stdin: bool,
}

#[derive(Clone, Debug, Args)]
pub struct LoginArgs {
    /// Account email (defaults to the stored one).
    #[arg(short, long)]
    pub email: Option<String>,
    /// Account password.
    #[arg(long, conflicts_with = "password_stdin")]
    pub password: Option<String>,
    /// Read the password from the first line of stdin.
    #[arg(long)]
    pub password_stdin: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ChangePasswordArgs {
    /// Account email (defaults to the stored one).
    #[arg(short, long)]
    pub email: Option<String>,
    #[arg(short = 'c', long, conflicts_with = "password_stdin")]
    pub current_password: Option<String>,
    #[arg(short = 'n', long, conflicts_with = "password_stdin")]
    pub new_password: Option<String>,
    #[arg(short = 'r', long, conflicts_with = "password_stdin")]
    pub confirm_password: Option<String>,
    /// Read current, new and confirmation passwords from three stdin lines.
    #[arg(long)]
    pub password_stdin: bool,
}

/// Object kinds accepted by `delete`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum DeleteObject {
    Project,
    Feature,
    AbuserStory,
    Scenario,
    Test,
}

#[derive(Clone, Debug, Args)]
pub struct DeleteArgs {
    /// Kind of object to delete.
    #[arg(short, long, value_enum)]
    pub object: DeleteObject,
    /// Name of the object.
    #[arg(short, long)]
    pub name: String,
    /// Parent of the object. Required for everything but projects.
    #[arg(short, long)]
    pub parent: Option<String>,
    /// Confirm the delete.
    #[arg(short, long)]
    pub yes: bool,
}
