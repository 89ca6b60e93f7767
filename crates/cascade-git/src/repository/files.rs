use std::path::Path;

use crate::{GitError, Result};

use super::Repository;

impl Repository {
    /// Reads the content of `path` as recorded in the tree of `refspec`.
    ///
    /// Returns `Ok(None)` when the ref resolves but the path does not exist in
    /// its tree, or names a directory.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::UnresolvedRef`] if `refspec` cannot be resolved and
    /// [`GitError::NonUtf8Content`] if the blob is not valid UTF-8.
    pub fn read_file_at(&self, refspec: &str, path: &Path) -> Result<Option<String>> {
        let relative_path = self.tree_path(path);

        let object = self
            .inner
            .revparse_single(refspec)
            .map_err(|source| GitError::UnresolvedRef {
                refspec: refspec.to_string(),
                source,
            })?;
        let tree = object.peel_to_tree()?;

        let entry = match tree.get_path(&relative_path) {
            Ok(entry) => entry,
            Err(err) if err.code() == git2::ErrorCode::NotFound => {
                tracing::debug!(refspec, path = %relative_path.display(), "file not present at ref");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let object = entry.to_object(&self.inner)?;
        let Some(blob) = object.as_blob() else {
            return Ok(None);
        };

        String::from_utf8(blob.content().to_vec())
            .map(Some)
            .map_err(|_| GitError::NonUtf8Content {
                path: relative_path,
                refspec: refspec.to_string(),
            })
    }
}
