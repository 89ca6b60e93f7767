use cascade_config::ReleaseKind;
use cascade_core::Version;
use cascade_updaters::{PackageJson, Updater};

use super::Strategy;

pub struct NodeStrategy;

impl Strategy for NodeStrategy {
    fn kind(&self) -> ReleaseKind {
        ReleaseKind::Node
    }

    fn default_version_file(&self) -> &'static str {
        "package.json"
    }

    fn version_updater(&self, version: &Version) -> Updater {
        Updater::PackageJson(PackageJson::new(version.clone()))
    }
}
