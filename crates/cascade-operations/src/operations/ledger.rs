use cascade_manifest::ReleaseManifest;
use cascade_updaters::Update;

use crate::Result;
use crate::traits::RepositoryReader;

/// The release manifest together with the content it was loaded from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseLedger {
    manifest: ReleaseManifest,
    original: Option<String>,
}

impl ReleaseLedger {
    #[must_use]
    pub fn new(manifest: ReleaseManifest, original: Option<String>) -> Self {
        Self { manifest, original }
    }

    /// Reads the ledger at `path`; a missing file yields an empty ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read for a reason other than
    /// not existing, or its content is not a valid ledger.
    pub fn load<R>(repository: &R, path: &str, git_ref: &str) -> Result<Self>
    where
        R: RepositoryReader + ?Sized,
    {
        let original = match repository.read_file(path, git_ref) {
            Ok(content) => Some(content),
            Err(err) if err.is_not_found() => {
                tracing::debug!(path, git_ref, "release manifest not found");
                None
            }
            Err(err) => return Err(err),
        };

        let manifest = ReleaseManifest::load(original.as_deref())?;
        Ok(Self { manifest, original })
    }

    #[must_use]
    pub fn manifest(&self) -> &ReleaseManifest {
        &self.manifest
    }

    /// Content the ledger was loaded from, `None` if the file did not exist.
    #[must_use]
    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }

    /// Same origin, new entries.
    #[must_use]
    pub fn with_manifest(&self, manifest: ReleaseManifest) -> Self {
        Self {
            manifest,
            original: self.original.clone(),
        }
    }

    #[must_use]
    pub fn to_update(&self, path: &str) -> Update {
        self.manifest.to_update(path, self.original.as_deref())
    }
}
