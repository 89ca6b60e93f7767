use std::collections::BTreeMap;

use chrono::NaiveDate;
use rayon::prelude::*;

use cascade_changelog::release_heading;
use cascade_config::{ComponentConfig, ReleaseConfig, join_path};
use cascade_core::Version;
use cascade_updaters::{Update, Updater};
use cascade_version::DEFAULT_INITIAL_VERSION;

use super::format::WorkspaceFormat;
use super::graph::{DependencyGraph, Touched, WorkspacePackage};
use super::notes::{DependencyBump, dependency_notes};
use crate::candidate::{PullRequestBody, ReleaseCandidate, ReleaseData, ReleasePullRequest};
use crate::operations::ReleaseLedger;
use crate::strategies::strategy_for;
use crate::traits::RepositoryReader;
use crate::{OperationError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePluginOptions {
    /// Ref the component manifests are read at.
    pub git_ref: String,
    /// Date written into synthesized changelog headers.
    pub release_date: NaiveDate,
}

/// Result of one cascade run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceOutput {
    /// Pass-through candidates followed by the merged candidate, if any.
    pub candidates: Vec<ReleaseCandidate>,
    /// The ledger with every released component's new version recorded.
    pub ledger: ReleaseLedger,
}

/// Propagates releases through the internal dependencies of one workspace
/// format and merges the managed candidates into a single release.
pub struct WorkspacePlugin<'a, F, R>
where
    F: WorkspaceFormat,
    R: RepositoryReader + ?Sized,
{
    config: &'a ReleaseConfig,
    format: F,
    repository: &'a R,
    ledger: &'a ReleaseLedger,
    options: WorkspacePluginOptions,
}

impl<'a, F, R> WorkspacePlugin<'a, F, R>
where
    F: WorkspaceFormat,
    R: RepositoryReader + ?Sized,
{
    /// # Errors
    ///
    /// Returns [`OperationError::Config`] if the configuration is invalid.
    /// Nothing is read from the repository before this check.
    pub fn new(
        config: &'a ReleaseConfig,
        format: F,
        repository: &'a R,
        ledger: &'a ReleaseLedger,
        options: WorkspacePluginOptions,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            format,
            repository,
            ledger,
            options,
        })
    }

    /// Runs the cascade over `candidates`.
    ///
    /// Candidates of other kinds, or for unconfigured paths, are passed
    /// through untouched. Components whose manifest cannot be read or parsed
    /// are left out of the dependency graph; the run itself never fails.
    #[must_use]
    pub fn run(&self, candidates: Vec<ReleaseCandidate>) -> WorkspaceOutput {
        let kind = self.format.kind();
        let (mut managed, passthrough): (Vec<_>, Vec<_>) =
            candidates.into_iter().partition(|candidate| {
                candidate.config.release_kind() == kind
                    && self.config.package(&candidate.path).is_some()
            });

        if managed.is_empty() {
            tracing::debug!(kind = %kind, "no managed candidates, nothing to cascade");
            return WorkspaceOutput {
                candidates: passthrough,
                ledger: self.ledger.clone(),
            };
        }

        let graph = DependencyGraph::build(self.fetch_packages(), self.config.update_peer_dependencies());

        let seeds: Vec<(usize, Version)> = managed
            .iter()
            .filter_map(|candidate| {
                graph
                    .index_of(&candidate.path)
                    .map(|index| (index, candidate.version.clone()))
            })
            .collect();
        let touched = graph.cascade(&seeds, |package| self.cascaded_version(package));

        let touched_versions: BTreeMap<usize, &Version> =
            touched.iter().map(|t| (t.index, &t.version)).collect();
        let name_versions: BTreeMap<String, Version> = touched
            .iter()
            .map(|t| (graph.package(t.index).manifest.name.clone(), t.version.clone()))
            .collect();

        let mut cascaded = Vec::new();
        for item in &touched {
            let package = graph.package(item.index);
            let bumps = self.dependency_bumps(&graph, item.index, &touched_versions);
            let notes = dependency_notes(&bumps);

            if item.seeded {
                if let Some(candidate) = managed.iter_mut().find(|c| c.path == package.path) {
                    self.augment_candidate(candidate, package, &name_versions, notes.as_deref());
                }
            } else if let Some(config) = self.config.package(&package.path) {
                cascaded.push(self.synthesize_release(
                    config,
                    package,
                    item,
                    &name_versions,
                    notes.as_deref(),
                ));
            }
        }

        let mut manifest = self.ledger.manifest().clone();
        for candidate in &managed {
            manifest.set(candidate.path.clone(), candidate.version.clone());
        }
        for item in &touched {
            manifest.set(graph.package(item.index).path.clone(), item.version.clone());
        }
        let ledger = self.ledger.with_manifest(manifest);

        let merged = self.merge(&managed, cascaded, &ledger);
        tracing::info!(
            kind = %kind,
            released = managed.len(),
            cascaded = touched.iter().filter(|t| !t.seeded).count(),
            updates = merged.pull_request.updates.len(),
            "merged workspace release"
        );

        let mut candidates = passthrough;
        candidates.push(merged);
        WorkspaceOutput { candidates, ledger }
    }

    fn fetch_packages(&self) -> Vec<WorkspacePackage> {
        let configs: Vec<&ComponentConfig> =
            self.config.packages_of_kind(self.format.kind()).collect();

        configs
            .par_iter()
            .map(|config| self.fetch_package(config))
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect()
    }

    fn fetch_package(&self, config: &ComponentConfig) -> Option<WorkspacePackage> {
        let manifest_path = join_path(config.path(), self.format.manifest_file());
        let git_ref = self.options.git_ref.as_str();

        let content = match self.repository.read_file(&manifest_path, git_ref) {
            Ok(content) => content,
            Err(err) if err.is_not_found() => {
                tracing::warn!(path = %manifest_path, git_ref, "manifest not found, excluding component");
                return None;
            }
            Err(err) => {
                tracing::warn!(path = %manifest_path, error = %err, "failed to read manifest, excluding component");
                return None;
            }
        };

        match self.format.parse_manifest(&content) {
            Ok(manifest) => Some(WorkspacePackage {
                path: config.path().to_string(),
                manifest_path,
                content,
                manifest,
            }),
            Err(reason) => {
                let err = OperationError::MalformedManifest {
                    path: manifest_path,
                    reason,
                };
                tracing::warn!(error = %err, "excluding component");
                None
            }
        }
    }

    /// Last known version of a package: the ledger entry, else its manifest.
    fn prior_version(&self, package: &WorkspacePackage) -> Option<Version> {
        self.ledger
            .manifest()
            .get(&package.path)
            .cloned()
            .or_else(|| package.manifest.version.clone())
    }

    fn cascaded_version(&self, package: &WorkspacePackage) -> Version {
        if let Some(prior) = self.prior_version(package) {
            return prior.bump_patch();
        }
        self.config
            .package(&package.path)
            .and_then(ComponentConfig::initial_version)
            .cloned()
            .unwrap_or(DEFAULT_INITIAL_VERSION)
    }

    fn dependency_bumps(
        &self,
        graph: &DependencyGraph,
        index: usize,
        touched_versions: &BTreeMap<usize, &Version>,
    ) -> Vec<DependencyBump> {
        graph
            .dependencies(index)
            .iter()
            .filter_map(|&(dependency, kind)| {
                let to = touched_versions.get(&dependency)?;
                let package = graph.package(dependency);
                Some(DependencyBump {
                    name: package.manifest.name.clone(),
                    section: self.format.section_name(kind),
                    from: self.prior_version(package),
                    to: (*to).clone(),
                })
            })
            .collect()
    }

    fn manifest_update(
        &self,
        package: &WorkspacePackage,
        version: &Version,
        name_versions: &BTreeMap<String, Version>,
    ) -> Update {
        let updater = self
            .format
            .manifest_updater(version)
            .with_dependency_versions(name_versions.clone(), self.config.update_peer_dependencies());
        Update::new(package.manifest_path.clone(), updater).with_cached_content(package.content.clone())
    }

    /// Points an independently released candidate at the new versions of its
    /// workspace dependencies and records them in its notes.
    fn augment_candidate(
        &self,
        candidate: &mut ReleaseCandidate,
        package: &WorkspacePackage,
        name_versions: &BTreeMap<String, Version>,
        notes: Option<&str>,
    ) {
        let peer = self.config.update_peer_dependencies();
        match candidate.pull_request.update_mut(&package.manifest_path) {
            Some(update) => {
                update.updater = update
                    .updater
                    .clone()
                    .with_dependency_versions(name_versions.clone(), peer);
                if update.cached_content.is_none() {
                    update.cached_content = Some(package.content.clone());
                }
            }
            None => {
                let update = self.manifest_update(package, &candidate.version, name_versions);
                candidate.pull_request.push_update(update);
            }
        }

        let Some(notes) = notes else {
            return;
        };
        let changelog_path = candidate.config.changelog_path();
        if let Some(update) = candidate.pull_request.update_mut(&changelog_path) {
            if let Updater::Changelog(changelog) = &mut update.updater {
                changelog.append_notes(notes);
            }
        }
        for release in &mut candidate.pull_request.body.releases {
            release.notes = format!("{}\n\n{notes}\n", release.notes.trim_end());
        }
    }

    /// Builds the release of a component reached only through the cascade.
    fn synthesize_release(
        &self,
        config: &ComponentConfig,
        package: &WorkspacePackage,
        item: &Touched,
        name_versions: &BTreeMap<String, Version>,
        notes: Option<&str>,
    ) -> (Vec<Update>, ReleaseData) {
        let header = release_heading(&item.version, self.options.release_date);
        let entry = match notes {
            Some(notes) => format!("{header}\n\n{notes}\n"),
            None => format!("{header}\n"),
        };

        let mut updates = strategy_for(config.release_kind()).build_updates(config, &item.version, &entry);
        let manifest_update = self.manifest_update(package, &item.version, name_versions);
        match updates.iter_mut().find(|u| u.path == package.manifest_path) {
            Some(existing) => *existing = manifest_update,
            None => updates.push(manifest_update),
        }

        let release = ReleaseData {
            component: config.component().map(ToString::to_string),
            version: item.version.clone(),
            notes: entry,
        };
        (updates, release)
    }

    fn merge(
        &self,
        managed: &[ReleaseCandidate],
        cascaded: Vec<(Vec<Update>, ReleaseData)>,
        ledger: &ReleaseLedger,
    ) -> ReleaseCandidate {
        let mut releases: Vec<ReleaseData> = managed
            .iter()
            .flat_map(|candidate| candidate.pull_request.body.releases.iter().cloned())
            .collect();
        let mut updates: Vec<Update> = managed
            .iter()
            .flat_map(|candidate| candidate.pull_request.updates.iter().cloned())
            .collect();
        for (cascaded_updates, release) in cascaded {
            updates.extend(cascaded_updates);
            releases.push(release);
        }

        let title = format!("chore: release {}", self.config.target_branch());
        let mut pull_request = ReleasePullRequest::new(title, PullRequestBody::new(releases));
        for update in updates {
            if pull_request.update(&update.path).is_none() {
                pull_request.updates.push(update);
            }
        }
        pull_request.push_update(ledger.to_update(self.config.manifest_path()));

        let config = self
            .config
            .package(".")
            .cloned()
            .unwrap_or_else(|| ComponentConfig::new(".", self.format.kind()));
        let version = managed
            .first()
            .map_or(DEFAULT_INITIAL_VERSION, |candidate| candidate.version.clone());

        ReleaseCandidate {
            path: ".".to_string(),
            config,
            version,
            pull_request,
        }
    }
}

#[cfg(test)]
mod tests {
    use cascade_config::ReleaseKind;

    use super::*;
    use crate::mocks::MockRepository;
    use crate::workspace::NodeWorkspace;

    fn options() -> WorkspacePluginOptions {
        WorkspacePluginOptions {
            git_ref: "main".to_string(),
            release_date: NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"),
        }
    }

    #[test]
    fn invalid_config_fails_before_any_read() {
        let config = ReleaseConfig::new(vec![
            ComponentConfig::new("node1", ReleaseKind::Node),
            ComponentConfig::new("node1", ReleaseKind::Node),
        ]);
        let repo = MockRepository::new();
        let ledger = ReleaseLedger::default();

        let result = WorkspacePlugin::new(&config, NodeWorkspace, &repo, &ledger, options());

        assert!(matches!(result, Err(OperationError::Config(_))));
        assert_eq!(repo.read_count(), 0);
    }

    #[test]
    fn read_failures_degrade_instead_of_aborting() {
        let config = ReleaseConfig::new(vec![ComponentConfig::new("node1", ReleaseKind::Node)]);
        let repo = MockRepository::new().fail_reads_with("disk on fire");
        let ledger = ReleaseLedger::default();
        let plugin =
            WorkspacePlugin::new(&config, NodeWorkspace, &repo, &ledger, options()).expect("valid config");

        let candidate = ReleaseCandidate {
            path: "node1".to_string(),
            config: ComponentConfig::new("node1", ReleaseKind::Node),
            version: Version::new(1, 0, 1),
            pull_request: ReleasePullRequest::new("chore: release 1.0.1", PullRequestBody::default()),
        };
        let output = plugin.run(vec![candidate]);

        assert_eq!(repo.read_count(), 1);
        assert_eq!(output.candidates.len(), 1);
        assert_eq!(output.ledger.manifest().get("node1"), Some(&Version::new(1, 0, 1)));
    }
}
