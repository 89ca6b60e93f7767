use std::collections::BTreeMap;

use cascade_core::Version;

use crate::cargo_toml::CargoToml;
use crate::changelog::Changelog;
use crate::generic::Generic;
use crate::module_bazel::ModuleBazel;
use crate::package_json::PackageJson;
use crate::release_manifest::ReleaseManifestUpdater;

/// Transforms the current content of one file into its released content.
pub trait UpdateContent {
    /// Must not fail: content without the targeted field is returned unchanged.
    fn update_content(&self, content: &str) -> String;
}

/// The closed set of file formats a release can touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Updater {
    PackageJson(PackageJson),
    CargoToml(CargoToml),
    ModuleBazel(ModuleBazel),
    Changelog(Changelog),
    Generic(Generic),
    ReleaseManifest(ReleaseManifestUpdater),
}

impl Updater {
    /// Picks the version updater for a version-bearing file by its name.
    ///
    /// Unrecognised file names get a [`Generic`] updater that only touches
    /// lines carrying the version marker.
    #[must_use]
    pub fn for_version_file(path: &str, version: &Version) -> Self {
        let file_name = path.rsplit('/').next().unwrap_or(path);
        match file_name {
            "package.json" => Self::PackageJson(PackageJson::new(version.clone())),
            "Cargo.toml" => Self::CargoToml(CargoToml::new(version.clone())),
            "MODULE.bazel" => Self::ModuleBazel(ModuleBazel::new(version.clone())),
            _ => Self::Generic(Generic::new(version.clone())),
        }
    }

    /// Extends a manifest updater with new versions of workspace dependencies.
    ///
    /// Updaters that do not edit manifests are returned unchanged.
    #[must_use]
    pub fn with_dependency_versions(
        self,
        versions: BTreeMap<String, Version>,
        update_peer_dependencies: bool,
    ) -> Self {
        match self {
            Self::PackageJson(updater) => Self::PackageJson(
                updater
                    .with_dependency_versions(versions)
                    .with_peer_dependencies(update_peer_dependencies),
            ),
            Self::CargoToml(updater) => {
                Self::CargoToml(updater.with_dependency_versions(versions))
            }
            other => other,
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PackageJson(_) => "package-json",
            Self::CargoToml(_) => "cargo-toml",
            Self::ModuleBazel(_) => "module-bazel",
            Self::Changelog(_) => "changelog",
            Self::Generic(_) => "generic",
            Self::ReleaseManifest(_) => "release-manifest",
        }
    }
}

impl UpdateContent for Updater {
    fn update_content(&self, content: &str) -> String {
        match self {
            Self::PackageJson(updater) => updater.update_content(content),
            Self::CargoToml(updater) => updater.update_content(content),
            Self::ModuleBazel(updater) => updater.update_content(content),
            Self::Changelog(updater) => updater.update_content(content),
            Self::Generic(updater) => updater.update_content(content),
            Self::ReleaseManifest(updater) => updater.update_content(content),
        }
    }
}

/// A pending edit of one repository file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub path: String,
    pub create_if_missing: bool,
    pub cached_content: Option<String>,
    pub updater: Updater,
}

impl Update {
    #[must_use]
    pub fn new(path: impl Into<String>, updater: Updater) -> Self {
        Self {
            path: path.into(),
            create_if_missing: false,
            cached_content: None,
            updater,
        }
    }

    #[must_use]
    pub fn create_if_missing(mut self) -> Self {
        self.create_if_missing = true;
        self
    }

    #[must_use]
    pub fn with_cached_content(mut self, content: impl Into<String>) -> Self {
        self.cached_content = Some(content.into());
        self
    }

    /// Applies the updater to `content`, falling back to the cached content.
    ///
    /// Returns `None` when the file does not exist and may not be created.
    #[must_use]
    pub fn apply(&self, content: Option<&str>) -> Option<String> {
        match content.or(self.cached_content.as_deref()) {
            Some(existing) => Some(self.updater.update_content(existing)),
            None if self.create_if_missing => Some(self.updater.update_content("")),
            None => None,
        }
    }
}
