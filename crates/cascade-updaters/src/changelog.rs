use cascade_changelog::insert_release;
use cascade_core::Version;

use crate::update::UpdateContent;

/// Inserts one formatted release entry into a changelog document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changelog {
    version: Version,
    entry: String,
}

impl Changelog {
    #[must_use]
    pub fn new(version: Version, entry: impl Into<String>) -> Self {
        Self {
            version,
            entry: entry.into(),
        }
    }

    #[must_use]
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// The raw entry text that will be inserted.
    #[must_use]
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Appends `notes` after the existing entry body, separated by a blank line.
    pub fn append_notes(&mut self, notes: &str) {
        let notes = notes.trim();
        if notes.is_empty() {
            return;
        }
        let trimmed_len = self.entry.trim_end().len();
        self.entry.truncate(trimmed_len);
        if !self.entry.is_empty() {
            self.entry.push_str("\n\n");
        }
        self.entry.push_str(notes);
        self.entry.push('\n');
    }
}

impl UpdateContent for Changelog {
    fn update_content(&self, content: &str) -> String {
        insert_release(content, &self.entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXISTING: &str = "# Changelog\n\n## [1.0.0] - 2024-01-01\n\n### Added\n\n- First release\n";

    fn changelog() -> Changelog {
        Changelog::new(
            Version::new(1, 0, 1),
            "## [1.0.1] - 2024-02-01\n\n### Fixed\n\n- A bug\n",
        )
    }

    #[test]
    fn prepends_entry_above_previous_releases() {
        let updated = changelog().update_content(EXISTING);

        assert_eq!(
            updated,
            "# Changelog\n\n## [1.0.1] - 2024-02-01\n\n### Fixed\n\n- A bug\n\n## [1.0.0] - 2024-01-01\n\n### Added\n\n- First release\n"
        );
    }

    #[test]
    fn empty_document_gets_header() {
        let updated = changelog().update_content("");

        assert!(updated.starts_with("# Changelog\n"));
        assert!(updated.ends_with("- A bug\n"));
    }

    #[test]
    fn appended_notes_follow_entry_body() {
        let mut changelog = changelog();
        changelog.append_notes("* The following workspace dependencies were updated\n");

        assert_eq!(
            changelog.entry(),
            "## [1.0.1] - 2024-02-01\n\n### Fixed\n\n- A bug\n\n* The following workspace dependencies were updated\n"
        );

        let updated = changelog.update_content(EXISTING);
        assert!(updated.contains("- A bug\n\n* The following workspace"));
        assert!(updated.contains("## [1.0.0] - 2024-01-01"));
    }

    #[test]
    fn blank_notes_are_ignored() {
        let mut changelog = changelog();
        let before = changelog.entry().to_string();
        changelog.append_notes("  \n");
        assert_eq!(changelog.entry(), before);
    }
}
