use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use cascade_core::{ChangeCategory, ChangeNote, Version};

/// Preamble written above the first release of a new changelog.
pub const PREAMBLE: &str = "# Changelog\n\nAll notable changes to this project will be documented in this file.\n";

/// Heading line that opens a release section, e.g. `## [1.2.3] - 2025-03-15`.
#[must_use]
pub fn release_heading(version: &Version, date: NaiveDate) -> String {
    format!("## [{version}] - {date}")
}

/// One release worth of changelog lines, grouped by category on render.
///
/// Categories render in declaration order of [`ChangeCategory`]; lines within
/// a category keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSection {
    version: Version,
    date: NaiveDate,
    lines: BTreeMap<ChangeCategory, Vec<String>>,
}

impl ReleaseSection {
    #[must_use]
    pub fn new(version: Version, date: NaiveDate) -> Self {
        Self {
            version,
            date,
            lines: BTreeMap::new(),
        }
    }

    /// Collects the summaries of `notes` under their categories.
    #[must_use]
    pub fn from_notes(version: Version, date: NaiveDate, notes: &[ChangeNote]) -> Self {
        notes.iter().fold(Self::new(version, date), |section, note| {
            section.with_line(note.category, &note.summary)
        })
    }

    #[must_use]
    pub fn with_line(mut self, category: ChangeCategory, line: impl Into<String>) -> Self {
        self.lines.entry(category).or_default().push(line.into());
        self
    }

    #[must_use]
    pub fn version(&self) -> &Version {
        &self.version
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for ReleaseSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", release_heading(&self.version, self.date))?;
        for (category, lines) in &self.lines {
            write!(f, "\n### {category}\n\n")?;
            for line in lines {
                writeln!(f, "- {line}")?;
            }
        }
        Ok(())
    }
}
