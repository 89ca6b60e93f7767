use serde_json::Value;
use toml_edit::{DocumentMut, Item};

use cascade_config::ReleaseKind;
use cascade_core::{DependencyKind, Version};
use cascade_updaters::{CargoToml, PackageJson, Updater, parse_document};

/// A dependency declared in a component manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceDependency {
    pub name: String,
    pub kind: DependencyKind,
}

/// What the cascade needs to know about one component's manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManifest {
    pub name: String,
    pub version: Option<Version>,
    pub dependencies: Vec<WorkspaceDependency>,
}

/// A package manager whose manifests link workspace components together.
pub trait WorkspaceFormat: Send + Sync {
    fn kind(&self) -> ReleaseKind;

    /// Manifest file name inside a component directory.
    fn manifest_file(&self) -> &'static str;

    /// # Errors
    ///
    /// Returns a human readable reason when the content is not a usable manifest.
    fn parse_manifest(&self, content: &str) -> Result<PackageManifest, String>;

    /// Manifest section a dependency of `kind` is declared in.
    fn section_name(&self, kind: DependencyKind) -> &'static str;

    fn manifest_updater(&self, version: &Version) -> Updater;
}

const NODE_SECTIONS: [(&str, DependencyKind); 4] = [
    ("dependencies", DependencyKind::Runtime),
    ("devDependencies", DependencyKind::Development),
    ("optionalDependencies", DependencyKind::Optional),
    ("peerDependencies", DependencyKind::Peer),
];

/// npm-style workspaces linked through `package.json`.
pub struct NodeWorkspace;

impl WorkspaceFormat for NodeWorkspace {
    fn kind(&self) -> ReleaseKind {
        ReleaseKind::Node
    }

    fn manifest_file(&self) -> &'static str {
        "package.json"
    }

    fn parse_manifest(&self, content: &str) -> Result<PackageManifest, String> {
        let document = parse_document(content).map_err(|err| err.to_string())?;
        let Value::Object(object) = document.value else {
            return Err("expected a JSON object".to_string());
        };

        let name = object
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| "missing string field `name`".to_string())?
            .to_string();

        let version = match object.get("version") {
            None => None,
            Some(Value::String(text)) => {
                Some(Version::parse(text).map_err(|err| err.to_string())?)
            }
            Some(_) => return Err("field `version` is not a string".to_string()),
        };

        let mut dependencies = Vec::new();
        for (section, kind) in NODE_SECTIONS {
            if let Some(Value::Object(deps)) = object.get(section) {
                dependencies.extend(deps.keys().map(|name| WorkspaceDependency {
                    name: name.clone(),
                    kind,
                }));
            }
        }

        Ok(PackageManifest {
            name,
            version,
            dependencies,
        })
    }

    fn section_name(&self, kind: DependencyKind) -> &'static str {
        NODE_SECTIONS
            .iter()
            .find(|(_, section_kind)| *section_kind == kind)
            .map_or("dependencies", |(section, _)| *section)
    }

    fn manifest_updater(&self, version: &Version) -> Updater {
        Updater::PackageJson(PackageJson::new(version.clone()))
    }
}

const CARGO_SECTIONS: [(&str, DependencyKind); 3] = [
    ("dependencies", DependencyKind::Runtime),
    ("dev-dependencies", DependencyKind::Development),
    ("build-dependencies", DependencyKind::Build),
];

/// Cargo workspaces linked through `Cargo.toml`.
pub struct CargoWorkspace;

impl CargoWorkspace {
    fn collect_section(table: &Item, kind: DependencyKind, out: &mut Vec<WorkspaceDependency>) {
        let Some(deps) = table.as_table_like() else {
            return;
        };
        for (key, entry) in deps.iter() {
            let name = entry
                .as_table_like()
                .and_then(|dep| dep.get("package"))
                .and_then(Item::as_str)
                .unwrap_or(key);
            out.push(WorkspaceDependency {
                name: name.to_string(),
                kind,
            });
        }
    }
}

impl WorkspaceFormat for CargoWorkspace {
    fn kind(&self) -> ReleaseKind {
        ReleaseKind::Cargo
    }

    fn manifest_file(&self) -> &'static str {
        "Cargo.toml"
    }

    fn parse_manifest(&self, content: &str) -> Result<PackageManifest, String> {
        let doc = content
            .parse::<DocumentMut>()
            .map_err(|err| err.to_string())?;

        let package = doc
            .get("package")
            .and_then(Item::as_table_like)
            .ok_or_else(|| "missing [package] table".to_string())?;
        let name = package
            .get("name")
            .and_then(Item::as_str)
            .ok_or_else(|| "missing string field `package.name`".to_string())?
            .to_string();
        // Inherited versions (`version.workspace = true`) are not strings.
        let version = package
            .get("version")
            .and_then(Item::as_str)
            .map(Version::parse)
            .transpose()
            .map_err(|err| err.to_string())?;

        let mut dependencies = Vec::new();
        for (section, kind) in CARGO_SECTIONS {
            if let Some(table) = doc.get(section) {
                Self::collect_section(table, kind, &mut dependencies);
            }
        }
        if let Some(targets) = doc.get("target").and_then(Item::as_table_like) {
            for (_, target) in targets.iter() {
                for (section, kind) in CARGO_SECTIONS {
                    if let Some(table) = target.get(section) {
                        Self::collect_section(table, kind, &mut dependencies);
                    }
                }
            }
        }

        Ok(PackageManifest {
            name,
            version,
            dependencies,
        })
    }

    fn section_name(&self, kind: DependencyKind) -> &'static str {
        CARGO_SECTIONS
            .iter()
            .find(|(_, section_kind)| *section_kind == kind)
            .map_or("dependencies", |(section, _)| *section)
    }

    fn manifest_updater(&self, version: &Version) -> Updater {
        Updater::CargoToml(CargoToml::new(version.clone()))
    }
}
