use cascade_core::{BumpType, ChangeNote, Version};

/// Version assigned to a component that has never been released and has no
/// configured initial version.
pub const DEFAULT_INITIAL_VERSION: Version = Version::new(1, 0, 0);

#[must_use]
pub fn bump_version(version: &Version, bump_type: BumpType) -> Version {
    match bump_type {
        BumpType::Major => version.bump_major(),
        BumpType::Minor => version.bump_minor(),
        BumpType::Patch => version.bump_patch(),
    }
}

#[must_use]
pub fn max_bump_type(notes: &[ChangeNote]) -> Option<BumpType> {
    notes.iter().map(|note| note.bump).max()
}

/// Computes the version of the next release.
///
/// Without a previous release the initial version is used as-is. Otherwise the
/// largest bump among `notes` is applied; `None` means there is nothing to release.
#[must_use]
pub fn next_version(
    previous: Option<&Version>,
    notes: &[ChangeNote],
    initial: Option<&Version>,
) -> Option<Version> {
    let bump = max_bump_type(notes)?;
    match previous {
        Some(previous) => Some(bump_version(previous, bump)),
        None => Some(initial.cloned().unwrap_or(DEFAULT_INITIAL_VERSION)),
    }
}
