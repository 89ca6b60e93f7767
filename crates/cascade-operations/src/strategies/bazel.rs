use cascade_config::ReleaseKind;
use cascade_core::Version;
use cascade_updaters::{ModuleBazel, Updater};

use super::Strategy;

/// Bazel modules carry their version in the `module()` call of `MODULE.bazel`.
pub struct BazelStrategy;

impl Strategy for BazelStrategy {
    fn kind(&self) -> ReleaseKind {
        ReleaseKind::Bazel
    }

    fn default_version_file(&self) -> &'static str {
        "MODULE.bazel"
    }

    fn version_updater(&self, version: &Version) -> Updater {
        Updater::ModuleBazel(ModuleBazel::new(version.clone()))
    }
}
