//! Read-only access to committed content through libgit2.

mod error;
mod repository;

use std::path::Path;

pub use error::GitError;
pub use repository::Repository;

pub type Result<T> = std::result::Result<T, GitError>;

/// Name of the branch checked out in the repository containing `path`.
///
/// # Errors
///
/// Fails when no repository contains `path` or HEAD is detached.
pub fn current_branch(path: &Path) -> Result<String> {
    Repository::open(path).and_then(|repo| repo.current_branch())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::tests::scratch_repo;

    #[test]
    fn current_branch_opens_from_any_path() -> anyhow::Result<()> {
        let (dir, _repo) = scratch_repo()?;
        let nested = dir.path().join("packages");
        std::fs::create_dir_all(&nested)?;

        let branch = current_branch(&nested)?;

        assert!(["main", "master"].contains(&branch.as_str()));
        Ok(())
    }

    #[test]
    fn current_branch_outside_a_repository() -> anyhow::Result<()> {
        let dir = tempfile::TempDir::new()?;
        assert!(matches!(
            current_branch(dir.path()),
            Err(GitError::NotARepository { .. })
        ));
        Ok(())
    }
}
