//! Per-kind construction of release candidates from parsed change notes.

mod bazel;
mod cargo;
mod node;
mod simple;

pub use bazel::BazelStrategy;
pub use cargo::CargoStrategy;
pub use node::NodeStrategy;
pub use simple::SimpleStrategy;

use chrono::NaiveDate;

use cascade_changelog::ReleaseSection;
use cascade_config::{ComponentConfig, ReleaseKind};
use cascade_core::{ChangeNote, TagName, Version};
use cascade_updaters::{Changelog, Generic, Update, Updater};
use cascade_version::next_version;

use crate::candidate::{PullRequestBody, ReleaseCandidate, ReleaseData, ReleasePullRequest};

/// Everything a strategy needs to propose one component release.
#[derive(Debug, Clone, Copy)]
pub struct StrategyInput<'a> {
    pub config: &'a ComponentConfig,
    pub notes: &'a [ChangeNote],
    pub latest_release: Option<&'a TagName>,
    pub date: NaiveDate,
}

pub trait Strategy: Send + Sync {
    fn kind(&self) -> ReleaseKind;

    /// Version-bearing file, relative to the component, unless overridden.
    fn default_version_file(&self) -> &'static str;

    fn version_updater(&self, version: &Version) -> Updater;

    /// Whether the version file is written even when it does not exist yet.
    fn creates_version_file(&self) -> bool {
        false
    }

    /// Builds the file edits of a release: changelog, version file and any
    /// configured extra files.
    fn build_updates(
        &self,
        config: &ComponentConfig,
        version: &Version,
        changelog_entry: &str,
    ) -> Vec<Update> {
        let mut updates = vec![
            Update::new(
                config.changelog_path(),
                Updater::Changelog(Changelog::new(version.clone(), changelog_entry)),
            )
            .create_if_missing(),
        ];

        let version_file = Update::new(
            config.version_file_path(self.default_version_file()),
            self.version_updater(version),
        );
        updates.push(if self.creates_version_file() {
            version_file.create_if_missing()
        } else {
            version_file
        });

        updates.extend(
            config
                .extra_file_paths()
                .into_iter()
                .map(|path| Update::new(path, Updater::Generic(Generic::new(version.clone())))),
        );

        updates
    }

    /// Proposes the next release, or `None` when there are no notes to release.
    fn build_candidate(&self, input: StrategyInput<'_>) -> Option<ReleaseCandidate> {
        let previous = input.latest_release.map(TagName::version);
        let version = next_version(previous, input.notes, input.config.initial_version())?;

        let changelog_entry =
            ReleaseSection::from_notes(version.clone(), input.date, input.notes).to_string();

        tracing::debug!(
            path = %input.config.path(),
            kind = %self.kind(),
            previous = ?previous,
            next = %version,
            "built release candidate"
        );

        let body = PullRequestBody::new(vec![ReleaseData {
            component: input.config.component().map(ToString::to_string),
            version: version.clone(),
            notes: changelog_entry.clone(),
        }]);
        let mut pull_request =
            ReleasePullRequest::new(ReleaseCandidate::title_for(input.config, &version), body);
        for update in self.build_updates(input.config, &version, &changelog_entry) {
            pull_request.push_update(update);
        }

        Some(ReleaseCandidate {
            path: input.config.path().to_string(),
            config: input.config.clone(),
            version,
            pull_request,
        })
    }
}

static NODE: NodeStrategy = NodeStrategy;
static CARGO: CargoStrategy = CargoStrategy;
static BAZEL: BazelStrategy = BazelStrategy;
static SIMPLE: SimpleStrategy = SimpleStrategy;

#[must_use]
pub fn strategy_for(kind: ReleaseKind) -> &'static dyn Strategy {
    match kind {
        ReleaseKind::Node => &NODE,
        ReleaseKind::Cargo => &CARGO,
        ReleaseKind::Bazel => &BAZEL,
        ReleaseKind::Simple => &SIMPLE,
    }
}
