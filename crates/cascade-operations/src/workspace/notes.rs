use std::collections::BTreeMap;
use std::fmt::Write as _;

use cascade_core::Version;

const NOTES_HEADING: &str = "* The following workspace dependencies were updated";

/// One internal dependency whose version moved in this release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyBump {
    pub name: String,
    pub section: &'static str,
    pub from: Option<Version>,
    pub to: Version,
}

/// Renders the workspace dependency notes appended to a changelog entry.
///
/// Bumps are grouped by manifest section, sections in first-seen order and
/// names kept in the order given. Returns `None` when nothing was bumped.
#[must_use]
pub fn dependency_notes(bumps: &[DependencyBump]) -> Option<String> {
    if bumps.is_empty() {
        return None;
    }

    let mut order: Vec<&str> = Vec::new();
    let mut groups: BTreeMap<&str, Vec<&DependencyBump>> = BTreeMap::new();
    for bump in bumps {
        if !groups.contains_key(bump.section) {
            order.push(bump.section);
        }
        groups.entry(bump.section).or_default().push(bump);
    }

    let mut notes = String::from(NOTES_HEADING);
    for section in order {
        let _ = write!(notes, "\n  * {section}");
        for bump in &groups[section] {
            match &bump.from {
                Some(from) if from != &bump.to => {
                    let _ = write!(notes, "\n    * {} bumped from {from} to {}", bump.name, bump.to);
                }
                _ => {
                    let _ = write!(notes, "\n    * {} bumped to {}", bump.name, bump.to);
                }
            }
        }
    }

    Some(notes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bump(name: &str, section: &'static str, from: Option<Version>, to: Version) -> DependencyBump {
        DependencyBump {
            name: name.to_string(),
            section,
            from,
            to,
        }
    }

    #[test]
    fn nothing_bumped_means_no_notes() {
        assert_eq!(dependency_notes(&[]), None);
    }

    #[test]
    fn groups_by_section_in_first_seen_order() {
        let notes = dependency_notes(&[
            bump("@here/pkgB", "devDependencies", Some(Version::new(2, 2, 2)), Version::new(2, 2, 3)),
            bump("@here/pkgA", "dependencies", Some(Version::new(3, 3, 3)), Version::new(3, 3, 4)),
            bump("@here/pkgC", "devDependencies", None, Version::new(1, 0, 0)),
        ])
        .expect("notes rendered");

        assert_eq!(
            notes,
            "* The following workspace dependencies were updated\n\
             \x20 * devDependencies\n\
             \x20   * @here/pkgB bumped from 2.2.2 to 2.2.3\n\
             \x20   * @here/pkgC bumped to 1.0.0\n\
             \x20 * dependencies\n\
             \x20   * @here/pkgA bumped from 3.3.3 to 3.3.4"
        );
    }
}
