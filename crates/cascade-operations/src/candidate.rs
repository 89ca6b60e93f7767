use std::fmt::Write as _;

use cascade_config::ComponentConfig;
use cascade_core::Version;
use cascade_updaters::Update;

const BODY_HEADER: &str = ":package: Release proposal\n---\n";
const BODY_FOOTER: &str = "\n---\nThis release proposal was generated by cascade.\n";

/// Release notes of one component inside a pull request description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseData {
    /// Label of the section; `None` folds the notes into the body unlabeled.
    pub component: Option<String>,
    pub version: Version,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestBody {
    pub releases: Vec<ReleaseData>,
}

impl PullRequestBody {
    #[must_use]
    pub fn new(releases: Vec<ReleaseData>) -> Self {
        Self { releases }
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut output = String::from(BODY_HEADER);

        for release in &self.releases {
            let notes = release.notes.trim();
            output.push('\n');
            match &release.component {
                Some(label) => {
                    let _ = writeln!(
                        output,
                        "<details><summary>{label}: {}</summary>\n\n{notes}\n</details>",
                        release.version
                    );
                }
                None => {
                    output.push_str(notes);
                    output.push('\n');
                }
            }
        }

        output.push_str(BODY_FOOTER);
        output
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePullRequest {
    pub title: String,
    pub body: PullRequestBody,
    pub updates: Vec<Update>,
}

impl ReleasePullRequest {
    #[must_use]
    pub fn new(title: impl Into<String>, body: PullRequestBody) -> Self {
        Self {
            title: title.into(),
            body,
            updates: Vec::new(),
        }
    }

    /// Adds an update, replacing any earlier update of the same path.
    pub fn push_update(&mut self, update: Update) {
        match self.updates.iter_mut().find(|u| u.path == update.path) {
            Some(existing) => *existing = update,
            None => self.updates.push(update),
        }
    }

    #[must_use]
    pub fn update(&self, path: &str) -> Option<&Update> {
        self.updates.iter().find(|u| u.path == path)
    }

    pub fn update_mut(&mut self, path: &str) -> Option<&mut Update> {
        self.updates.iter_mut().find(|u| u.path == path)
    }
}

/// A proposed release of one component, or of a merged set of components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseCandidate {
    pub path: String,
    pub config: ComponentConfig,
    pub version: Version,
    pub pull_request: ReleasePullRequest,
}

impl ReleaseCandidate {
    #[must_use]
    pub fn title_for(config: &ComponentConfig, version: &Version) -> String {
        match config.component() {
            Some(component) => format!("chore: release {component} {version}"),
            None => format!("chore: release {version}"),
        }
    }
}
