use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};
use crate::version::Version;

const VERSION_MARKER: &str = "-v";

/// A release tag: `v{version}` or `{component}-v{version}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagName {
    version: Version,
    component: Option<String>,
}

impl TagName {
    #[must_use]
    pub fn new(version: Version, component: Option<impl Into<String>>) -> Self {
        Self {
            version,
            component: component.map(Into::into).filter(|c| !c.is_empty()),
        }
    }

    /// Parses a tag produced by [`TagName`]'s `Display` implementation.
    ///
    /// The component is the shortest prefix followed by `-v` whose remainder is a
    /// canonical version, so components may themselves contain `-v`. A component
    /// split wins over reading the whole tag as `v{version}`, which keeps tags
    /// such as `v1.0.0-v-v2.0.0` attached to their `v1.0.0-v` component.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTag` if no such split exists.
    pub fn parse(text: &str) -> Result<Self> {
        for (idx, _) in text.match_indices(VERSION_MARKER) {
            if idx == 0 {
                continue;
            }
            let remainder = &text[idx + VERSION_MARKER.len()..];
            if let Ok(version) = Version::parse_strict(remainder) {
                return Ok(Self {
                    version,
                    component: Some(text[..idx].to_string()),
                });
            }
        }

        text.strip_prefix('v')
            .and_then(|bare| Version::parse_strict(bare).ok())
            .map(|version| Self {
                version,
                component: None,
            })
            .ok_or_else(|| CoreError::InvalidTag {
                tag: text.to_string(),
            })
    }

    #[must_use]
    pub fn version(&self) -> &Version {
        &self.version
    }

    #[must_use]
    pub fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }
}

impl FromStr for TagName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.component {
            Some(component) => write!(f, "{component}-v{}", self.version),
            None => write!(f, "v{}", self.version),
        }
    }
}
