use std::collections::BTreeMap;

use toml_edit::{DocumentMut, Item, Value};

use cascade_core::Version;

use crate::specifier::rewrite_specifier;
use crate::update::UpdateContent;

const DEPENDENCY_SECTIONS: [&str; 3] = ["dependencies", "dev-dependencies", "build-dependencies"];

/// Sets `package.version` of a `Cargo.toml` and repoints workspace dependencies.
///
/// Editing goes through `toml_edit`, so comments, ordering and spacing of the
/// rest of the manifest are kept. Inherited versions (`version.workspace = true`)
/// and dependencies declared with `workspace = true` are never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CargoToml {
    version: Version,
    dependency_versions: BTreeMap<String, Version>,
}

impl CargoToml {
    #[must_use]
    pub fn new(version: Version) -> Self {
        Self {
            version,
            dependency_versions: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_dependency_versions(mut self, versions: BTreeMap<String, Version>) -> Self {
        self.dependency_versions.extend(versions);
        self
    }

    #[must_use]
    pub fn version(&self) -> &Version {
        &self.version
    }

    fn update_package_version(&self, doc: &mut DocumentMut) -> bool {
        let Some(package) = doc.get_mut("package").and_then(Item::as_table_like_mut) else {
            return false;
        };
        let Some(value) = package.get_mut("version").and_then(Item::as_value_mut) else {
            return false;
        };
        if !value.is_str() {
            return false;
        }
        replace_string(value, self.version.to_string())
    }

    fn update_dependency_tables(&self, doc: &mut DocumentMut) -> bool {
        let mut changed = false;

        if let Some(workspace) = doc.get_mut("workspace") {
            if let Some(deps) = workspace.get_mut("dependencies") {
                changed |= self.update_dep_entries(deps);
            }
        }

        for section in &DEPENDENCY_SECTIONS {
            if let Some(deps) = doc.get_mut(section) {
                changed |= self.update_dep_entries(deps);
            }
        }

        if let Some(targets) = doc.get_mut("target").and_then(Item::as_table_like_mut) {
            for (_, target) in targets.iter_mut() {
                for section in &DEPENDENCY_SECTIONS {
                    if let Some(deps) = target.get_mut(section) {
                        changed |= self.update_dep_entries(deps);
                    }
                }
            }
        }

        changed
    }

    fn update_dep_entries(&self, deps: &mut Item) -> bool {
        let Some(table) = deps.as_table_like_mut() else {
            return false;
        };

        let mut changed = false;
        for (key, entry) in table.iter_mut() {
            let name = dependency_name(key.get(), entry);
            let Some(new_version) = self.dependency_versions.get(&name) else {
                continue;
            };

            if entry.as_str().is_some() {
                if let Some(value) = entry.as_value_mut() {
                    changed |= rewrite_value(value, new_version);
                }
            } else if let Some(dep) = entry.as_table_like_mut() {
                let inherits = dep
                    .get("workspace")
                    .and_then(Item::as_bool)
                    .unwrap_or(false);
                if inherits {
                    continue;
                }
                if let Some(value) = dep.get_mut("version").and_then(Item::as_value_mut) {
                    changed |= rewrite_value(value, new_version);
                }
            }
        }

        changed
    }
}

impl UpdateContent for CargoToml {
    fn update_content(&self, content: &str) -> String {
        let Ok(mut doc) = content.parse::<DocumentMut>() else {
            return content.to_string();
        };

        let package_changed = self.update_package_version(&mut doc);
        let deps_changed = self.update_dependency_tables(&mut doc);

        if package_changed || deps_changed {
            doc.to_string()
        } else {
            content.to_string()
        }
    }
}

fn dependency_name(key: &str, entry: &Item) -> String {
    entry
        .as_table_like()
        .and_then(|dep| dep.get("package"))
        .and_then(Item::as_str)
        .unwrap_or(key)
        .to_string()
}

fn rewrite_value(value: &mut Value, new_version: &Version) -> bool {
    let Some(rewritten) = value
        .as_str()
        .and_then(|old| rewrite_specifier(old, new_version))
    else {
        return false;
    };
    replace_string(value, rewritten)
}

fn replace_string(value: &mut Value, new: String) -> bool {
    if value.as_str() == Some(new.as_str()) {
        return false;
    }
    let decor = value.decor().clone();
    *value = Value::from(new);
    *value.decor_mut() = decor;
    true
}
