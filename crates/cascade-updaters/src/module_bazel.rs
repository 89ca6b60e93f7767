use std::sync::LazyLock;

use regex::Regex;

use cascade_core::Version;

use crate::update::UpdateContent;

static MODULE_CALL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)\bmodule\s*\(.*?\)").ok());

static VERSION_ATTRIBUTE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"\bversion\s*=\s*"([^"]*)""#).ok());

/// Replaces the `version` attribute of the `module(...)` call in `MODULE.bazel`.
///
/// Only the quoted version token changes. The attribute may sit on its own
/// line or inline, in any position among the other attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleBazel {
    version: Version,
}

impl ModuleBazel {
    #[must_use]
    pub fn new(version: Version) -> Self {
        Self { version }
    }

    #[must_use]
    pub fn version(&self) -> &Version {
        &self.version
    }
}

impl UpdateContent for ModuleBazel {
    fn update_content(&self, content: &str) -> String {
        let (Some(module_call), Some(version_attribute)) =
            (MODULE_CALL.as_ref(), VERSION_ATTRIBUTE.as_ref())
        else {
            return content.to_string();
        };

        let Some(call) = module_call.find(content) else {
            return content.to_string();
        };
        let Some(token) = version_attribute
            .captures(call.as_str())
            .and_then(|caps| caps.get(1))
        else {
            return content.to_string();
        };

        let start = call.start() + token.start();
        let end = call.start() + token.end();
        let new_version = self.version.to_string();
        if content[start..end] == new_version {
            return content.to_string();
        }

        format!("{}{new_version}{}", &content[..start], &content[end..])
    }
}
