use chrono::NaiveDate;
use indexmap::IndexMap;

use cascade_config::{ReleaseConfig, normalize_path};
use cascade_core::{ChangeNote, TagName};
use cascade_updaters::Update;

use super::ledger::ReleaseLedger;
use crate::candidate::ReleaseCandidate;
use crate::strategies::{StrategyInput, strategy_for};
use crate::traits::RepositoryReader;
use crate::workspace::{CargoWorkspace, NodeWorkspace, WorkspacePlugin, WorkspacePluginOptions};
use crate::{OperationError, Result};

pub struct PlanInput {
    /// Change notes keyed by component path, in the order they were given.
    pub notes: Vec<(String, ChangeNote)>,
    pub git_ref: String,
    pub release_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanOutput {
    pub candidates: Vec<ReleaseCandidate>,
    pub ledger: ReleaseLedger,
}

impl PlanOutput {
    /// Every update of every candidate, one per path, the last one winning.
    #[must_use]
    pub fn updates(&self) -> Vec<Update> {
        let mut updates: IndexMap<String, Update> = IndexMap::new();
        for candidate in &self.candidates {
            for update in &candidate.pull_request.updates {
                updates.insert(update.path.clone(), update.clone());
            }
        }
        updates.into_values().collect()
    }
}

/// Turns change notes into release candidates and cascades them through the
/// node and cargo workspaces.
pub struct PlanOperation<R> {
    config: ReleaseConfig,
    repository: R,
}

impl<R> PlanOperation<R>
where
    R: RepositoryReader,
{
    pub fn new(config: ReleaseConfig, repository: R) -> Self {
        Self { config, repository }
    }

    #[must_use]
    pub fn config(&self) -> &ReleaseConfig {
        &self.config
    }

    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, a note names an
    /// unconfigured component, or the ledger cannot be read.
    pub fn execute(&self, input: PlanInput) -> Result<PlanOutput> {
        self.config.validate()?;
        let notes_by_path = self.group_notes(input.notes)?;

        let ledger = ReleaseLedger::load(&self.repository, self.config.manifest_path(), &input.git_ref)?;

        let mut candidates = Vec::new();
        for component in self.config.packages() {
            let Some(notes) = notes_by_path.get(component.path()) else {
                continue;
            };
            let latest_release = ledger
                .manifest()
                .get(component.path())
                .map(|version| TagName::new(version.clone(), component.component()));
            let strategy_input = StrategyInput {
                config: component,
                notes,
                latest_release: latest_release.as_ref(),
                date: input.release_date,
            };
            if let Some(candidate) = strategy_for(component.release_kind()).build_candidate(strategy_input) {
                candidates.push(candidate);
            }
        }

        let options = WorkspacePluginOptions {
            git_ref: input.git_ref.clone(),
            release_date: input.release_date,
        };
        let node = WorkspacePlugin::new(&self.config, NodeWorkspace, &self.repository, &ledger, options.clone())?
            .run(candidates);
        let cargo = WorkspacePlugin::new(&self.config, CargoWorkspace, &self.repository, &node.ledger, options)?
            .run(node.candidates);

        let mut candidates = cargo.candidates;
        let mut manifest = cargo.ledger.manifest().clone();
        for candidate in candidates.iter().filter(|c| c.path != ".") {
            manifest.set(candidate.path.clone(), candidate.version.clone());
        }
        let ledger = cargo.ledger.with_manifest(manifest);

        self.attach_ledger(&mut candidates, &ledger);

        tracing::info!(
            candidates = candidates.len(),
            ledger_entries = ledger.manifest().len(),
            "planned release"
        );
        Ok(PlanOutput { candidates, ledger })
    }

    fn group_notes(&self, notes: Vec<(String, ChangeNote)>) -> Result<IndexMap<String, Vec<ChangeNote>>> {
        let mut grouped: IndexMap<String, Vec<ChangeNote>> = IndexMap::new();
        for (path, note) in notes {
            let path = normalize_path(&path);
            if self.config.package(&path).is_none() {
                return Err(OperationError::UnknownComponent { path });
            }
            grouped.entry(path).or_default().push(note);
        }
        Ok(grouped)
    }

    /// Points every ledger update at the final ledger, adding one to the last
    /// candidate when no workspace merge produced it.
    fn attach_ledger(&self, candidates: &mut [ReleaseCandidate], ledger: &ReleaseLedger) {
        let path = self.config.manifest_path();
        let update = ledger.to_update(path);

        let mut attached = false;
        for candidate in candidates.iter_mut() {
            if candidate.pull_request.update(path).is_some() {
                candidate.pull_request.push_update(update.clone());
                attached = true;
            }
        }
        if !attached {
            if let Some(last) = candidates.last_mut() {
                last.pull_request.push_update(update);
            }
        }
    }
}
