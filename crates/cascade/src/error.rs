use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("release planning failed")]
    Operation(#[from] cascade_operations::OperationError),

    #[error("invalid configuration")]
    Config(#[from] cascade_config::ConfigError),

    #[error("failed to determine current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("invalid release '{spec}': {reason}")]
    InvalidRelease { spec: String, reason: String },

    #[error("invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("failed to initialise logging: {0}")]
    Logging(String),

    #[error("no configuration found at '{0}'")]
    MissingConfig(PathBuf),
}

pub type Result<T> = std::result::Result<T, CliError>;
