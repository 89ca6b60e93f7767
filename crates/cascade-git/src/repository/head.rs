use crate::{GitError, Result};

use super::Repository;

impl Repository {
    /// # Errors
    ///
    /// Returns [`GitError::DetachedHead`] unless HEAD is a symbolic reference
    /// to a local branch.
    pub fn current_branch(&self) -> Result<String> {
        let head = self.inner.head()?;
        match head.shorthand() {
            Some(name) if head.is_branch() => Ok(name.to_string()),
            _ => Err(GitError::DetachedHead),
        }
    }
}
