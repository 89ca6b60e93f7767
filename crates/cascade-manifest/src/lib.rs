mod error;
mod ledger;

pub use error::ManifestError;
pub use ledger::ReleaseManifest;

pub type Result<T> = std::result::Result<T, ManifestError>;
