use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read release configuration at '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse release configuration")]
    Parse(#[source] serde_json::Error),

    #[error("unknown release type '{kind}' for component '{path}'")]
    UnknownReleaseKind { path: String, kind: String },

    #[error("component path '{path}' is configured more than once")]
    DuplicateComponentPath { path: String },

    #[error("invalid initial version for component '{path}'")]
    InvalidInitialVersion {
        path: String,
        #[source]
        source: cascade_core::CoreError,
    },
}
