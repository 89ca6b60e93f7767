use std::collections::BTreeMap;

use serde_json::Value;

use cascade_core::Version;
use cascade_updaters::{ReleaseManifestUpdater, Update, Updater, json_stringify, parse_document};

use crate::{ManifestError, Result};

/// Last released version of every component, keyed by component path.
///
/// Entries are kept sorted by path so serialization is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseManifest {
    versions: BTreeMap<String, Version>,
}

impl ReleaseManifest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses ledger content; an absent file yields an empty ledger.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] if the content is not a JSON object of
    /// path to version string, or a version fails to parse.
    pub fn load(content: Option<&str>) -> Result<Self> {
        let Some(content) = content.filter(|c| !c.trim().is_empty()) else {
            tracing::debug!("no release manifest, starting empty");
            return Ok(Self::new());
        };

        let document = parse_document(content).map_err(ManifestError::Parse)?;
        let Value::Object(entries) = document.value else {
            return Err(ManifestError::NotAnObject);
        };

        let mut versions = BTreeMap::new();
        for (path, version) in entries {
            let Some(text) = version.as_str() else {
                return Err(ManifestError::NonStringEntry { path });
            };
            let version = Version::parse(text)
                .map_err(|source| ManifestError::InvalidVersion { path: path.clone(), source })?;
            versions.insert(path, version);
        }

        tracing::debug!(entries = versions.len(), "loaded release manifest");
        Ok(Self { versions })
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Version> {
        self.versions.get(path)
    }

    /// Records `version` for `path`, returning the previous entry.
    pub fn set(&mut self, path: impl Into<String>, version: Version) -> Option<Version> {
        self.versions.insert(path.into(), version)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Version)> {
        self.versions.iter().map(|(path, version)| (path.as_str(), version))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Two-space indented JSON object sorted by path, with a trailing newline.
    #[must_use]
    pub fn serialize(&self) -> String {
        let object = self
            .versions
            .iter()
            .map(|(path, version)| (path.clone(), Value::String(version.to_string())))
            .collect();
        json_stringify(&Value::Object(object), "")
    }

    /// Builds the file edit that rewrites the ledger at `path`.
    ///
    /// `original` is the ledger content this run started from; it is kept as
    /// cached content so the edit can be applied without another read.
    #[must_use]
    pub fn to_update(&self, path: impl Into<String>, original: Option<&str>) -> Update {
        let updater = Updater::ReleaseManifest(ReleaseManifestUpdater::new(self.versions.clone()));
        let update = Update::new(path, updater).create_if_missing();
        match original {
            Some(content) => update.with_cached_content(content),
            None => update,
        }
    }
}
