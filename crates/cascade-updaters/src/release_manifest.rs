use std::collections::BTreeMap;

use serde_json::{Map, Value};

use cascade_core::Version;

use crate::json::{json_stringify, parse_document};
use crate::update::UpdateContent;

/// Rewrites the release ledger as a path-sorted JSON object.
///
/// The whole document is replaced by the held mapping; only the layout of the
/// existing file (indentation and surrounding bytes) is carried over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseManifestUpdater {
    versions: BTreeMap<String, Version>,
}

impl ReleaseManifestUpdater {
    #[must_use]
    pub fn new(versions: BTreeMap<String, Version>) -> Self {
        Self { versions }
    }

    #[must_use]
    pub fn versions(&self) -> &BTreeMap<String, Version> {
        &self.versions
    }
}

impl UpdateContent for ReleaseManifestUpdater {
    fn update_content(&self, content: &str) -> String {
        let object: Map<String, Value> = self
            .versions
            .iter()
            .map(|(path, version)| (path.clone(), Value::String(version.to_string())))
            .collect();
        let value = Value::Object(object);

        if parse_document(content).is_ok_and(|existing| existing.value == value) {
            return content.to_string();
        }

        json_stringify(&value, content)
    }
}
