//! Release configuration: which components exist, how each is released, and
//! where the release ledger lives.

mod config;
mod error;
mod kind;
mod path;

pub use config::{
    ComponentConfig, DEFAULT_CONFIG_PATH, DEFAULT_MANIFEST_PATH, DEFAULT_TARGET_BRANCH, ReleaseConfig,
};
pub use error::ConfigError;
pub use kind::ReleaseKind;
pub use path::{join_path, normalize_path};

pub type Result<T> = std::result::Result<T, ConfigError>;
