use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::traits::{RepositoryReader, RepositoryWriter};
use crate::{OperationError, Result};

/// Repository snapshot held in memory, for dry runs and fixtures.
///
/// Files are keyed by path only; every ref sees the same content.
#[derive(Default)]
pub struct InMemoryRepository {
    files: RwLock<BTreeMap<String, String>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file(self, path: impl Into<String>, content: impl Into<String>) -> Self {
        if let Ok(mut files) = self.files.write() {
            files.insert(path.into(), content.into());
        }
        self
    }

    #[must_use]
    pub fn file(&self, path: &str) -> Option<String> {
        self.files.read().ok()?.get(path).cloned()
    }

    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.files
            .read()
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl RepositoryReader for InMemoryRepository {
    fn read_file(&self, path: &str, git_ref: &str) -> Result<String> {
        self.file(path).ok_or_else(|| OperationError::NotFound {
            path: path.to_string(),
            git_ref: git_ref.to_string(),
        })
    }
}

impl RepositoryWriter for InMemoryRepository {
    fn write_file(&self, path: &str, content: &str) -> Result<()> {
        if let Ok(mut files) = self.files.write() {
            files.insert(path.to_string(), content.to_string());
        }
        Ok(())
    }

    fn remove_file(&self, path: &str) -> Result<()> {
        if let Ok(mut files) = self.files.write() {
            files.remove(path);
        }
        Ok(())
    }
}
