use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid version '{version}'")]
    InvalidVersion {
        version: String,
        #[source]
        source: semver::Error,
    },

    #[error("invalid tag name '{tag}': expected 'v<version>' or '<component>-v<version>'")]
    InvalidTag { tag: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
