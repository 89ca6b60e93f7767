use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::traits::{RepositoryReader, RepositoryWriter};
use crate::{OperationError, Result};

/// Working-tree access; the ref is ignored.
///
/// Writes go to a temporary file next to the target which is then renamed
/// over it.
pub struct FileSystemRepository {
    root: PathBuf,
}

impl FileSystemRepository {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl RepositoryReader for FileSystemRepository {
    fn read_file(&self, path: &str, git_ref: &str) -> Result<String> {
        let absolute = self.root.join(path);
        match std::fs::read_to_string(&absolute) {
            Ok(content) => Ok(content),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(OperationError::NotFound {
                path: path.to_string(),
                git_ref: git_ref.to_string(),
            }),
            Err(source) => Err(OperationError::FileRead {
                path: absolute,
                source,
            }),
        }
    }
}

impl RepositoryWriter for FileSystemRepository {
    fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let absolute = self.root.join(path);
        let parent = absolute.parent().unwrap_or(self.root.as_path()).to_path_buf();
        let write_error = |source: std::io::Error| OperationError::FileWrite {
            path: absolute.clone(),
            source,
        };

        std::fs::create_dir_all(&parent).map_err(|source| OperationError::FileWrite {
            path: parent.clone(),
            source,
        })?;

        let mut staged = NamedTempFile::new_in(&parent).map_err(write_error)?;
        staged.write_all(content.as_bytes()).map_err(write_error)?;
        staged.as_file().sync_all().map_err(write_error)?;
        staged
            .persist(&absolute)
            .map_err(|err| write_error(err.error))?;
        Ok(())
    }

    fn remove_file(&self, path: &str) -> Result<()> {
        let absolute = self.root.join(path);
        match std::fs::remove_file(&absolute) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(OperationError::FileWrite {
                path: absolute,
                source,
            }),
        }
    }
}
