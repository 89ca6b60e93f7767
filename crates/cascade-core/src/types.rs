use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    Patch,
    Minor,
    Major,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ChangeCategory {
    Added,
    #[default]
    Changed,
    Deprecated,
    Removed,
    Fixed,
    Security,
}

impl fmt::Display for ChangeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Added => "Added",
            Self::Changed => "Changed",
            Self::Deprecated => "Deprecated",
            Self::Removed => "Removed",
            Self::Fixed => "Fixed",
            Self::Security => "Security",
        };
        write!(f, "{s}")
    }
}

/// An already-parsed change contributing to a component's next release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeNote {
    pub bump: BumpType,
    #[serde(default)]
    pub category: ChangeCategory,
    pub summary: String,
}

impl ChangeNote {
    #[must_use]
    pub fn new(bump: BumpType, summary: impl Into<String>) -> Self {
        Self {
            bump,
            category: ChangeCategory::default(),
            summary: summary.into(),
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: ChangeCategory) -> Self {
        self.category = category;
        self
    }
}

/// How one workspace package references another.
///
/// Each workspace format maps kinds to its own manifest section names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DependencyKind {
    Runtime,
    Development,
    Build,
    Optional,
    Peer,
}
