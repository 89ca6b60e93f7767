use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CoreError, Result};

/// A semantic version as recorded in manifests, tags and the release ledger.
///
/// Ordering follows semver precedence: a release sorts above any prerelease of
/// the same `major.minor.patch`, numeric prerelease identifiers compare
/// numerically and sort below alphanumeric ones. Build metadata only breaks
/// ties, so the order stays total and agrees with the canonical string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version(semver::Version);

impl Version {
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(semver::Version::new(major, minor, patch))
    }

    /// Parses `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`, accepting one leading `v`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidVersion` if the text is not a valid semantic version.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);
        Self::parse_strict(bare).map_err(|err| match err {
            CoreError::InvalidVersion { source, .. } => CoreError::InvalidVersion {
                version: text.to_string(),
                source,
            },
            other => other,
        })
    }

    /// Parses the canonical form only; a leading `v` is rejected.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidVersion` if the text is not a valid semantic version.
    pub fn parse_strict(text: &str) -> Result<Self> {
        semver::Version::parse(text)
            .map(Self)
            .map_err(|source| CoreError::InvalidVersion {
                version: text.to_string(),
                source,
            })
    }

    #[must_use]
    pub fn major(&self) -> u64 {
        self.0.major
    }

    #[must_use]
    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    #[must_use]
    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    #[must_use]
    pub fn prerelease(&self) -> Option<&str> {
        (!self.0.pre.is_empty()).then(|| self.0.pre.as_str())
    }

    #[must_use]
    pub fn build(&self) -> Option<&str> {
        (!self.0.build.is_empty()).then(|| self.0.build.as_str())
    }

    // A field already at `u64::MAX` keeps that value.
    #[must_use]
    pub fn bump_major(&self) -> Self {
        Self::new(self.0.major.saturating_add(1), 0, 0)
    }

    #[must_use]
    pub fn bump_minor(&self) -> Self {
        Self::new(self.0.major, self.0.minor.saturating_add(1), 0)
    }

    #[must_use]
    pub fn bump_patch(&self) -> Self {
        Self::new(self.0.major, self.0.minor, self.0.patch.saturating_add(1))
    }
}

impl FromStr for Version {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
