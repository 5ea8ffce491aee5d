//! Document error types.
//!
//! Every variant is a usage error: the run is rejected before any remote call
//! is made for the affected document.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document file could not be read.
    #[error("unable to read feature document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not structurally valid.
    #[error("unable to parse feature document: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A feature must carry at least one abuser story.
    #[error("feature '{feature}' has no abuser stories to load")]
    NoAbuserStories { feature: String },

    /// An abuser story must carry at least one threat scenario.
    #[error("abuser story '{abuser_story}' has no threat scenarios to load")]
    NoThreatScenarios { abuser_story: String },
}
