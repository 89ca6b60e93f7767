use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::traits::{RepositoryReader, RepositoryWriter};
use crate::{OperationError, Result};

/// Repository double that records every read and write.
pub struct MockRepository {
    files: BTreeMap<String, String>,
    failure: Option<String>,
    failing_write: Option<String>,
    reads: Mutex<Vec<(String, String)>>,
    written: Mutex<Vec<(String, String)>>,
    removed: Mutex<Vec<String>>,
}

impl MockRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            files: BTreeMap::new(),
            failure: None,
            failing_write: None,
            reads: Mutex::new(Vec::new()),
            written: Mutex::new(Vec::new()),
            removed: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), content.to_string());
        self
    }

    /// Makes every read fail with an I/O error carrying `message`.
    #[must_use]
    pub fn fail_reads_with(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    /// Makes writes to `path` fail.
    #[must_use]
    pub fn fail_writes_to(mut self, path: &str) -> Self {
        self.failing_write = Some(path.to_string());
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn read_count(&self) -> usize {
        self.reads.lock().expect("lock poisoned").len()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn reads(&self) -> Vec<(String, String)> {
        self.reads.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn written(&self) -> Vec<(String, String)> {
        self.written.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn removed(&self) -> Vec<String> {
        self.removed.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryReader for MockRepository {
    fn read_file(&self, path: &str, git_ref: &str) -> Result<String> {
        self.reads
            .lock()
            .expect("lock poisoned")
            .push((path.to_string(), git_ref.to_string()));

        if let Some(message) = &self.failure {
            return Err(OperationError::FileRead {
                path: PathBuf::from(path),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, message.clone()),
            });
        }

        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| OperationError::NotFound {
                path: path.to_string(),
                git_ref: git_ref.to_string(),
            })
    }
}

impl RepositoryWriter for MockRepository {
    fn write_file(&self, path: &str, content: &str) -> Result<()> {
        if self.failing_write.as_deref() == Some(path) {
            return Err(OperationError::FileWrite {
                path: PathBuf::from(path),
                source: std::io::Error::new(std::io::ErrorKind::StorageFull, "disk full"),
            });
        }
        self.written
            .lock()
            .expect("lock poisoned")
            .push((path.to_string(), content.to_string()));
        Ok(())
    }

    fn remove_file(&self, path: &str) -> Result<()> {
        self.removed
            .lock()
            .expect("lock poisoned")
            .push(path.to_string());
        Ok(())
    }
}
