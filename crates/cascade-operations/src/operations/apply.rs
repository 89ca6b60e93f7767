use indexmap::IndexMap;

use cascade_updaters::{Update, Updater};

use crate::traits::{RepositoryReader, RepositoryWriter};
use crate::{OperationError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyOutput {
    pub written: Vec<String>,
    pub unchanged: Vec<String>,
    /// Missing files whose updates may not create them.
    pub skipped: Vec<String>,
}

/// A computed file replacement and what it replaces.
struct StagedWrite {
    previous: Option<String>,
    content: String,
    ledger: bool,
}

/// Writes the result of each update back to the repository.
pub struct ApplyOperation<R, W> {
    reader: R,
    writer: W,
}

impl<R, W> ApplyOperation<R, W>
where
    R: RepositoryReader,
    W: RepositoryWriter,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Applies `updates` in order against the content at `git_ref`.
    ///
    /// Every new file content is computed before anything is written. Only
    /// files whose content changes are written, release ledgers last. When a
    /// write fails, the files already written are restored to their previous
    /// content, or removed if they did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read for a reason other than not
    /// existing. A failed write returns [`OperationError::ApplyFailed`], or
    /// [`OperationError::RollbackFailed`] if some files could not be restored.
    pub fn execute(&self, updates: &[Update], git_ref: &str) -> Result<ApplyOutput> {
        let mut output = ApplyOutput::default();
        let mut staged: IndexMap<String, StagedWrite> = IndexMap::new();

        for update in updates {
            let current = match staged.get(&update.path) {
                Some(write) => Some(write.content.clone()),
                None => self.read_current(&update.path, git_ref)?,
            };

            let Some(updated) = update.apply(current.as_deref()) else {
                tracing::debug!(path = %update.path, "file missing and not creatable, skipping");
                output.skipped.push(update.path.clone());
                continue;
            };

            let ledger = matches!(update.updater, Updater::ReleaseManifest(_));
            match staged.get_mut(&update.path) {
                Some(write) => {
                    write.content = updated;
                    write.ledger |= ledger;
                }
                None => {
                    staged.insert(
                        update.path.clone(),
                        StagedWrite {
                            previous: current,
                            content: updated,
                            ledger,
                        },
                    );
                }
            }
        }

        staged.retain(|path, write| {
            let unchanged = write.previous.as_deref() == Some(write.content.as_str());
            if unchanged {
                output.unchanged.push(path.clone());
            }
            !unchanged
        });

        let (ledgers, files): (Vec<_>, Vec<_>) =
            staged.into_iter().partition(|(_, write)| write.ledger);
        let mut committed: Vec<(String, Option<String>)> = Vec::new();

        for (path, write) in files.into_iter().chain(ledgers) {
            if let Err(err) = self.writer.write_file(&path, &write.content) {
                return Err(self.roll_back(path, committed, err));
            }
            tracing::debug!(path = %path, "wrote file");
            output.written.push(path.clone());
            committed.push((path, write.previous));
        }

        Ok(output)
    }

    fn read_current(&self, path: &str, git_ref: &str) -> Result<Option<String>> {
        match self.reader.read_file(path, git_ref) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Undoes `committed` writes, newest first.
    fn roll_back(
        &self,
        path: String,
        committed: Vec<(String, Option<String>)>,
        source: OperationError,
    ) -> OperationError {
        tracing::warn!(%path, written = committed.len(), "write failed, rolling back");

        let mut restored = 0;
        let mut unrestored = Vec::new();
        for (written, previous) in committed.into_iter().rev() {
            let result = match &previous {
                Some(content) => self.writer.write_file(&written, content),
                None => self.writer.remove_file(&written),
            };
            match result {
                Ok(()) => restored += 1,
                Err(err) => {
                    tracing::warn!(path = %written, error = %err, "could not restore file");
                    unrestored.push(written);
                }
            }
        }

        let source = Box::new(source);
        if unrestored.is_empty() {
            OperationError::ApplyFailed {
                path,
                restored,
                source,
            }
        } else {
            OperationError::RollbackFailed {
                path,
                unrestored,
                source,
            }
        }
    }
}
