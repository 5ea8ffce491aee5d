use clap::{Args, Subcommand};

/// Read objects from the server.
#[derive(Clone, Debug, Subcommand)]
pub enum GetCommands {
    /// Show a feature, optionally with every abuser story, threat scenario
    /// and test case below it.
    #[command(visible_alias = "user-story")]
    Feature(GetFeatureArgs),
}

#[derive(Clone, Debug, Args)]
pub struct GetFeatureArgs {
    /// Feature short name.
    #[arg(short = 'n', long)]
    pub short_name: String,
    /// Project the feature belongs to.
    #[arg(short, long)]
    pub project: String,
    /// Include the whole hierarchy (always printed as JSON).
    #[arg(short, long)]
    pub cascade: bool,
}
