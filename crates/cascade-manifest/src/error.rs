use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("release manifest is not valid JSON")]
    Parse(#[source] serde_json::Error),

    #[error("release manifest must be a JSON object of path to version")]
    NotAnObject,

    #[error("release manifest entry '{path}' is not a string")]
    NonStringEntry { path: String },

    #[error("invalid version for '{path}' in release manifest")]
    InvalidVersion {
        path: String,
        #[source]
        source: cascade_core::CoreError,
    },
}
