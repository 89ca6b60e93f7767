use std::collections::BTreeMap;

use serde_json::{Map, Value};

use cascade_core::Version;

use crate::json::{json_stringify, parse_document};
use crate::specifier::rewrite_specifier;
use crate::update::UpdateContent;

const DEPENDENCY_SECTIONS: [&str; 3] = ["dependencies", "devDependencies", "optionalDependencies"];
const PEER_SECTION: &str = "peerDependencies";

/// Sets the `version` of a `package.json` and repoints workspace dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageJson {
    version: Version,
    dependency_versions: BTreeMap<String, Version>,
    update_peer_dependencies: bool,
}

impl PackageJson {
    #[must_use]
    pub fn new(version: Version) -> Self {
        Self {
            version,
            dependency_versions: BTreeMap::new(),
            update_peer_dependencies: false,
        }
    }

    #[must_use]
    pub fn with_dependency_versions(mut self, versions: BTreeMap<String, Version>) -> Self {
        self.dependency_versions.extend(versions);
        self
    }

    #[must_use]
    pub fn with_peer_dependencies(mut self, update_peer_dependencies: bool) -> Self {
        self.update_peer_dependencies = update_peer_dependencies;
        self
    }

    #[must_use]
    pub fn version(&self) -> &Version {
        &self.version
    }

    #[must_use]
    pub fn dependency_versions(&self) -> &BTreeMap<String, Version> {
        &self.dependency_versions
    }

    fn rewrite_section(&self, section: &mut Map<String, Value>) {
        for (name, specifier) in section.iter_mut() {
            let Some(new_version) = self.dependency_versions.get(name) else {
                continue;
            };
            let Some(old) = specifier.as_str() else {
                continue;
            };
            if let Some(rewritten) = rewrite_specifier(old, new_version) {
                *specifier = Value::String(rewritten);
            }
        }
    }
}

impl UpdateContent for PackageJson {
    fn update_content(&self, content: &str) -> String {
        let Ok(document) = parse_document(content) else {
            return content.to_string();
        };
        let original = document.value;
        let mut parsed = original.clone();
        let Some(object) = parsed.as_object_mut() else {
            return content.to_string();
        };

        if let Some(version) = object.get_mut("version") {
            *version = Value::String(self.version.to_string());
        }

        let peer = self.update_peer_dependencies.then_some(PEER_SECTION);
        for section in DEPENDENCY_SECTIONS.into_iter().chain(peer) {
            if let Some(Value::Object(deps)) = object.get_mut(section) {
                self.rewrite_section(deps);
            }
        }

        if parsed == original {
            return content.to_string();
        }

        json_stringify(&parsed, content)
    }
}
