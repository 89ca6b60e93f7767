use std::collections::HashSet;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use cascade_core::Version;

use crate::error::ConfigError;
use crate::kind::ReleaseKind;
use crate::path::{join_path, normalize_path};
use crate::Result;

pub const DEFAULT_CONFIG_PATH: &str = "release-config.json";
pub const DEFAULT_TARGET_BRANCH: &str = "main";
pub const DEFAULT_MANIFEST_PATH: &str = ".release-manifest.json";

const CHANGELOG_FILE: &str = "CHANGELOG.md";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawReleaseConfig {
    #[serde(default)]
    update_peer_dependencies: bool,
    manifest_path: Option<String>,
    target_branch: Option<String>,
    #[serde(default)]
    packages: IndexMap<String, RawComponentConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawComponentConfig {
    release_type: String,
    component: Option<String>,
    initial_version: Option<String>,
    version_file: Option<String>,
    #[serde(default)]
    extra_files: Vec<String>,
}

/// Release behavior of one configured component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentConfig {
    path: String,
    release_kind: ReleaseKind,
    component: Option<String>,
    initial_version: Option<Version>,
    version_file: Option<String>,
    extra_files: Vec<String>,
}

impl ComponentConfig {
    #[must_use]
    pub fn new(path: &str, release_kind: ReleaseKind) -> Self {
        Self {
            path: normalize_path(path),
            release_kind,
            component: None,
            initial_version: None,
            version_file: None,
            extra_files: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    #[must_use]
    pub fn with_initial_version(mut self, version: Version) -> Self {
        self.initial_version = Some(version);
        self
    }

    #[must_use]
    pub fn with_version_file(mut self, version_file: impl Into<String>) -> Self {
        self.version_file = Some(version_file.into());
        self
    }

    #[must_use]
    pub fn with_extra_files(mut self, extra_files: Vec<String>) -> Self {
        self.extra_files = extra_files;
        self
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn release_kind(&self) -> ReleaseKind {
        self.release_kind
    }

    /// Explicit component label; a component with one gets its own section
    /// in a merged release description.
    #[must_use]
    pub fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }

    #[must_use]
    pub fn initial_version(&self) -> Option<&Version> {
        self.initial_version.as_ref()
    }

    #[must_use]
    pub fn version_file(&self) -> Option<&str> {
        self.version_file.as_deref()
    }

    #[must_use]
    pub fn extra_files(&self) -> &[String] {
        &self.extra_files
    }

    #[must_use]
    pub fn changelog_path(&self) -> String {
        join_path(&self.path, CHANGELOG_FILE)
    }

    /// Repository path of the version-bearing file, `default_file` unless overridden.
    #[must_use]
    pub fn version_file_path(&self, default_file: &str) -> String {
        join_path(&self.path, self.version_file.as_deref().unwrap_or(default_file))
    }

    #[must_use]
    pub fn extra_file_paths(&self) -> Vec<String> {
        self.extra_files
            .iter()
            .map(|file| join_path(&self.path, file))
            .collect()
    }
}

/// Workspace-wide release configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseConfig {
    update_peer_dependencies: bool,
    manifest_path: String,
    target_branch: String,
    packages: Vec<ComponentConfig>,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            update_peer_dependencies: false,
            manifest_path: DEFAULT_MANIFEST_PATH.to_string(),
            target_branch: DEFAULT_TARGET_BRANCH.to_string(),
            packages: Vec::new(),
        }
    }
}

impl ReleaseConfig {
    #[must_use]
    pub fn new(packages: Vec<ComponentConfig>) -> Self {
        Self {
            packages,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_peer_dependencies(mut self, update_peer_dependencies: bool) -> Self {
        self.update_peer_dependencies = update_peer_dependencies;
        self
    }

    #[must_use]
    pub fn with_manifest_path(mut self, manifest_path: impl Into<String>) -> Self {
        self.manifest_path = manifest_path.into();
        self
    }

    #[must_use]
    pub fn with_target_branch(mut self, target_branch: impl Into<String>) -> Self {
        self.target_branch = target_branch.into();
        self
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, and any error
    /// of [`ReleaseConfig::from_json_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON,
    /// [`ConfigError::UnknownReleaseKind`] for an unsupported `release-type`,
    /// [`ConfigError::InvalidInitialVersion`] for an unparsable
    /// `initial-version`, and [`ConfigError::DuplicateComponentPath`] when two
    /// entries normalize to the same path.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: RawReleaseConfig = serde_json::from_str(content).map_err(ConfigError::Parse)?;

        let mut packages = Vec::with_capacity(raw.packages.len());
        for (path, package) in raw.packages {
            packages.push(component_from_raw(&path, package)?);
        }

        let config = Self {
            update_peer_dependencies: raw.update_peer_dependencies,
            manifest_path: raw
                .manifest_path
                .map_or_else(|| DEFAULT_MANIFEST_PATH.to_string(), |p| normalize_path(&p)),
            target_branch: raw
                .target_branch
                .unwrap_or_else(|| DEFAULT_TARGET_BRANCH.to_string()),
            packages,
        };
        config.validate()?;

        tracing::debug!(
            packages = config.packages.len(),
            target_branch = %config.target_branch,
            "loaded release configuration"
        );
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateComponentPath`] when two components share a path.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for package in &self.packages {
            if !seen.insert(package.path()) {
                return Err(ConfigError::DuplicateComponentPath {
                    path: package.path().to_string(),
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn update_peer_dependencies(&self) -> bool {
        self.update_peer_dependencies
    }

    #[must_use]
    pub fn manifest_path(&self) -> &str {
        &self.manifest_path
    }

    #[must_use]
    pub fn target_branch(&self) -> &str {
        &self.target_branch
    }

    /// Configured components in declaration order.
    #[must_use]
    pub fn packages(&self) -> &[ComponentConfig] {
        &self.packages
    }

    #[must_use]
    pub fn package(&self, path: &str) -> Option<&ComponentConfig> {
        let path = normalize_path(path);
        self.packages.iter().find(|package| package.path() == path)
    }

    pub fn packages_of_kind(&self, kind: ReleaseKind) -> impl Iterator<Item = &ComponentConfig> {
        self.packages
            .iter()
            .filter(move |package| package.release_kind() == kind)
    }
}

fn component_from_raw(path: &str, raw: RawComponentConfig) -> Result<ComponentConfig> {
    let normalized = normalize_path(path);

    let release_kind = raw
        .release_type
        .parse::<ReleaseKind>()
        .map_err(|kind| ConfigError::UnknownReleaseKind {
            path: normalized.clone(),
            kind,
        })?;

    let initial_version = raw
        .initial_version
        .as_deref()
        .map(Version::parse)
        .transpose()
        .map_err(|source| ConfigError::InvalidInitialVersion {
            path: normalized.clone(),
            source,
        })?;

    Ok(ComponentConfig {
        path: normalized,
        release_kind,
        component: raw.component.filter(|c| !c.is_empty()),
        initial_version,
        version_file: raw.version_file,
        extra_files: raw.extra_files,
    })
}
