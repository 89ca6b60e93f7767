use cascade_config::ReleaseKind;
use cascade_core::Version;
use cascade_updaters::{CargoToml, Updater};

use super::Strategy;

pub struct CargoStrategy;

impl Strategy for CargoStrategy {
    fn kind(&self) -> ReleaseKind {
        ReleaseKind::Cargo
    }

    fn default_version_file(&self) -> &'static str {
        "Cargo.toml"
    }

    fn version_updater(&self, version: &Version) -> Updater {
        Updater::CargoToml(CargoToml::new(version.clone()))
    }
}
