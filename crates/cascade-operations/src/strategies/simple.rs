use cascade_config::ReleaseKind;
use cascade_core::Version;
use cascade_updaters::{Generic, Updater};

use super::Strategy;

/// Tracks the version in a plain `version.txt`.
pub struct SimpleStrategy;

impl Strategy for SimpleStrategy {
    fn kind(&self) -> ReleaseKind {
        ReleaseKind::Simple
    }

    fn default_version_file(&self) -> &'static str {
        "version.txt"
    }

    fn version_updater(&self, version: &Version) -> Updater {
        Updater::Generic(Generic::with_content(format!("{version}\n")))
    }

    fn creates_version_file(&self) -> bool {
        true
    }
}
