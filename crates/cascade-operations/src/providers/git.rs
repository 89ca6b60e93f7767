use std::path::{Path, PathBuf};

use cascade_git::Repository;

use crate::traits::RepositoryReader;
use crate::{OperationError, Result};

/// Reads committed file content through libgit2.
///
/// The repository is opened per read so the provider can be shared across
/// threads.
pub struct Git2Repository {
    root: PathBuf,
}

impl Git2Repository {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl RepositoryReader for Git2Repository {
    fn read_file(&self, path: &str, git_ref: &str) -> Result<String> {
        let repo = Repository::open(&self.root)?;
        repo.read_file_at(git_ref, Path::new(path))?
            .ok_or_else(|| OperationError::NotFound {
                path: path.to_string(),
                git_ref: git_ref.to_string(),
            })
    }
}
