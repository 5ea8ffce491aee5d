use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Create objects on the server.
#[derive(Clone, Debug, Subcommand)]
pub enum ApplyCommands {
    /// Create a project.
    Project(ApplyProjectArgs),
    /// Create a feature and everything below it from a YAML document.
    Feature(ApplyFeatureArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ApplyProjectArgs {
    /// Project name.
    #[arg(short, long)]
    pub name: String,
}

#[derive(Clone, Debug, Args)]
pub struct ApplyFeatureArgs {
    /// Feature document (YAML).
    #[arg(long)]
    pub file: PathBuf,
    /// Project the feature belongs to. Must already exist.
    #[arg(short, long)]
    pub project: String,
}
