use crate::Result;

/// Read access to repository files at a given ref.
pub trait RepositoryReader: Send + Sync {
    /// # Errors
    ///
    /// Returns [`crate::OperationError::NotFound`] if `path` does not exist at
    /// `git_ref`, or another error if the repository cannot be read.
    fn read_file(&self, path: &str, git_ref: &str) -> Result<String>;
}

pub trait RepositoryWriter: Send + Sync {
    /// Replaces the content of `path`, creating it if needed.
    ///
    /// Readers observe either the old or the new content, never a partial
    /// write.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write_file(&self, path: &str, content: &str) -> Result<()>;

    /// Removes `path`; a file that does not exist is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    fn remove_file(&self, path: &str) -> Result<()>;
}

impl<T: RepositoryReader + ?Sized> RepositoryReader for &T {
    fn read_file(&self, path: &str, git_ref: &str) -> Result<String> {
        (**self).read_file(path, git_ref)
    }
}

impl<T: RepositoryWriter + ?Sized> RepositoryWriter for &T {
    fn write_file(&self, path: &str, content: &str) -> Result<()> {
        (**self).write_file(path, content)
    }

    fn remove_file(&self, path: &str) -> Result<()> {
        (**self).remove_file(path)
    }
}
