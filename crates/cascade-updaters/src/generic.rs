use std::sync::LazyLock;

use regex::Regex;

use cascade_core::Version;

use crate::update::UpdateContent;

/// Lines containing this marker have their version token rewritten.
pub const VERSION_MARKER: &str = "x-cascade-version";

static VERSION_TOKEN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\d+\.\d+\.\d+(?:-[0-9A-Za-z.-]+)?(?:\+[0-9A-Za-z.-]+)?").ok()
});

/// Pass-through updater for auxiliary files.
///
/// With supplied content the file is written as given. Otherwise the file is
/// kept as-is, except that lines tagged with [`VERSION_MARKER`] get the
/// release version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generic {
    version: Option<Version>,
    content: Option<String>,
}

impl Generic {
    #[must_use]
    pub fn new(version: Version) -> Self {
        Self {
            version: Some(version),
            content: None,
        }
    }

    #[must_use]
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            version: None,
            content: Some(content.into()),
        }
    }

    fn replace_marked(&self, content: &str) -> String {
        let (Some(version), Some(token)) = (self.version.as_ref(), VERSION_TOKEN.as_ref()) else {
            return content.to_string();
        };
        let replacement = version.to_string();

        content
            .split_inclusive('\n')
            .map(|line| {
                if line.contains(VERSION_MARKER) {
                    token.replace(line, replacement.as_str()).into_owned()
                } else {
                    line.to_string()
                }
            })
            .collect()
    }
}

impl UpdateContent for Generic {
    fn update_content(&self, content: &str) -> String {
        match &self.content {
            Some(supplied) => supplied.clone(),
            None => self.replace_marked(content),
        }
    }
}
