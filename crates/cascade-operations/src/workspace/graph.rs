use std::collections::{HashMap, VecDeque};

use cascade_core::{DependencyKind, Version};

use super::format::PackageManifest;

/// A configured component whose manifest was fetched and parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePackage {
    pub path: String,
    pub manifest_path: String,
    pub content: String,
    pub manifest: PackageManifest,
}

/// A component reached by the cascade, with the version it will be released at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Touched {
    pub index: usize,
    pub version: Version,
    pub seeded: bool,
}

/// Immutable dependency structure over workspace packages.
///
/// Only edges between configured packages are kept; a package never depends
/// on itself. Indices follow configuration order.
#[derive(Debug)]
pub struct DependencyGraph {
    packages: Vec<WorkspacePackage>,
    by_path: HashMap<String, usize>,
    dependencies: Vec<Vec<(usize, DependencyKind)>>,
    dependents: Vec<Vec<usize>>,
}

impl DependencyGraph {
    #[must_use]
    pub fn build(packages: Vec<WorkspacePackage>, include_peer: bool) -> Self {
        let mut by_name: HashMap<&str, usize> = HashMap::new();
        for (index, package) in packages.iter().enumerate() {
            if let Some(&first) = by_name.get(package.manifest.name.as_str()) {
                tracing::warn!(
                    name = %package.manifest.name,
                    first = %packages[first].path,
                    ignored = %package.path,
                    "package name declared twice, keeping the first"
                );
                continue;
            }
            by_name.insert(&package.manifest.name, index);
        }

        let mut dependencies = vec![Vec::new(); packages.len()];
        let mut dependents = vec![Vec::new(); packages.len()];

        for (index, package) in packages.iter().enumerate() {
            for dependency in &package.manifest.dependencies {
                if dependency.kind == DependencyKind::Peer && !include_peer {
                    continue;
                }
                let Some(&target) = by_name.get(dependency.name.as_str()) else {
                    continue;
                };
                if target == index {
                    continue;
                }
                let edge = (target, dependency.kind);
                if !dependencies[index].contains(&edge) {
                    dependencies[index].push(edge);
                }
                dependents[target].push(index);
            }
        }

        for list in &mut dependents {
            list.sort_unstable();
            list.dedup();
        }

        let by_path = packages
            .iter()
            .enumerate()
            .map(|(index, package)| (package.path.clone(), index))
            .collect();

        Self {
            packages,
            by_path,
            dependencies,
            dependents,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    #[must_use]
    pub fn index_of(&self, path: &str) -> Option<usize> {
        self.by_path.get(path).copied()
    }

    #[must_use]
    pub fn package(&self, index: usize) -> &WorkspacePackage {
        &self.packages[index]
    }

    /// Internal dependencies of `index`, with the kind of each edge.
    #[must_use]
    pub fn dependencies(&self, index: usize) -> &[(usize, DependencyKind)] {
        &self.dependencies[index]
    }

    /// Packages depending on `index`, in configuration order.
    #[must_use]
    pub fn dependents(&self, index: usize) -> &[usize] {
        &self.dependents[index]
    }

    /// Walks from `seeds` to every transitive dependent.
    ///
    /// Seeds keep their given versions; each newly reached package gets the
    /// version returned by `cascaded_version`. Every package is visited at
    /// most once, so cycles terminate. Output order is seeds first, then
    /// breadth-first discovery order.
    pub fn cascade<F>(&self, seeds: &[(usize, Version)], mut cascaded_version: F) -> Vec<Touched>
    where
        F: FnMut(&WorkspacePackage) -> Version,
    {
        let mut visited = vec![false; self.packages.len()];
        let mut touched = Vec::new();
        let mut queue = VecDeque::new();

        for (index, version) in seeds {
            if visited[*index] {
                continue;
            }
            visited[*index] = true;
            touched.push(Touched {
                index: *index,
                version: version.clone(),
                seeded: true,
            });
            queue.push_back(*index);
        }

        while let Some(current) = queue.pop_front() {
            for &dependent in &self.dependents[current] {
                if visited[dependent] {
                    continue;
                }
                visited[dependent] = true;

                let package = &self.packages[dependent];
                let version = cascaded_version(package);
                tracing::debug!(
                    path = %package.path,
                    via = %self.packages[current].path,
                    version = %version,
                    "cascading release"
                );
                touched.push(Touched {
                    index: dependent,
                    version,
                    seeded: false,
                });
                queue.push_back(dependent);
            }
        }

        touched
    }
}
