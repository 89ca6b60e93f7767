use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Core(#[from] cascade_core::CoreError),

    #[error(transparent)]
    Git(#[from] cascade_git::GitError),

    #[error(transparent)]
    Config(#[from] cascade_config::ConfigError),

    #[error(transparent)]
    Manifest(#[from] cascade_manifest::ManifestError),

    #[error("file '{path}' not found at '{git_ref}'")]
    NotFound { path: String, git_ref: String },

    #[error("manifest '{path}' could not be read: {reason}")]
    MalformedManifest { path: String, reason: String },

    #[error("failed to read '{path}'")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}'")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("component '{path}' is not configured")]
    UnknownComponent { path: String },

    #[error("writing '{path}' failed, {restored} earlier write(s) rolled back")]
    ApplyFailed {
        path: String,
        restored: usize,
        #[source]
        source: Box<OperationError>,
    },

    #[error("writing '{path}' failed and {} could not be restored", unrestored.join(", "))]
    RollbackFailed {
        path: String,
        unrestored: Vec<String>,
        #[source]
        source: Box<OperationError>,
    },
}

impl OperationError {
    /// Whether the error only means the requested file does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, OperationError>;
