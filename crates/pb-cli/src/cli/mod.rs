use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{ColorMode, GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `playbook` binary.
#[derive(Debug, Parser)]
#[command(
    name = "playbook",
    version,
    about = "ThreatPlaybook client - threat models as code"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Color table output: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            color: self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::subcommands::{ApplyCommands, GetCommands};
    use super::{Cli, ColorMode, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "playbook",
            "--format",
            "json",
            "--verbose",
            "apply",
            "project",
            "--name",
            "web",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Apply {
                action: ApplyCommands::Project(_)
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "playbook", "schema", "--format", "raw", "--quiet", "--color", "never",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert_eq!(cli.color, ColorMode::Never);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Schema));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["playbook", "--format", "xml", "schema"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn table_is_the_default_format() {
        let cli = Cli::try_parse_from(["playbook", "schema"]).expect("cli should parse");
        assert_eq!(cli.global_flags().format, OutputFormat::Table);
        assert_eq!(cli.global_flags().color, ColorMode::Auto);
    }

    #[test]
    fn user_story_is_an_alias_for_feature() {
        let cli = Cli::try_parse_from([
            "playbook",
            "get",
            "user-story",
            "--short-name",
            "login",
            "--project",
            "web",
            "--cascade",
        ])
        .expect("cli should parse");

        let Commands::Get {
            action: GetCommands::Feature(args),
        } = cli.command
        else {
            panic!("expected get feature");
        };
        assert_eq!(args.short_name, "login");
        assert!(args.cascade);
    }

    #[test]
    fn apply_feature_requires_file_and_project() {
        assert!(Cli::try_parse_from(["playbook", "apply", "feature", "--file", "f.yaml"]).is_err());
        let cli = Cli::try_parse_from([
            "playbook", "apply", "feature", "--file", "f.yaml", "-p", "web",
        ])
        .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Apply {
                action: ApplyCommands::Feature(_)
            }
        ));
    }

    #[test]
    fn password_flag_conflicts_with_stdin() {
        let parsed = Cli::try_parse_from([
            "playbook",
            "login",
            "--password",
            "secret",
            "--password-stdin",
        ]);
        assert!(parsed.is_err());
    }
}
