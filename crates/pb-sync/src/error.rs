use pb_client::ClientError;
use pb_core::DocumentError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("project '{project}' does not exist (HTTP {status})")]
    ProjectNotFound { project: String, status: u16 },

    #[error("feature '{name}' does not exist in project '{project}' (HTTP {status})")]
    FeatureNotFound {
        name: String,
        project: String,
        status: u16,
    },

    #[error(transparent)]
    Client(#[from] ClientError),
}
