use std::fmt;
use std::str::FromStr;

/// How a component is released, and which manifest format carries its version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseKind {
    Node,
    Cargo,
    Bazel,
    Simple,
}

impl ReleaseKind {
    pub const ALL: [Self; 4] = [Self::Node, Self::Cargo, Self::Bazel, Self::Simple];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Cargo => "cargo",
            Self::Bazel => "bazel",
            Self::Simple => "simple",
        }
    }
}

impl fmt::Display for ReleaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReleaseKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}
