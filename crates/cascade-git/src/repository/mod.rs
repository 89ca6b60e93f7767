mod files;
mod head;

use std::path::{Path, PathBuf};

use crate::{GitError, Result};

/// A non-bare repository discovered from some path inside its work tree.
pub struct Repository {
    pub(crate) inner: git2::Repository,
    workdir: PathBuf,
}

impl Repository {
    /// Opens the repository whose work tree contains `path`.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NotARepository`] when discovery fails and
    /// [`GitError::BareRepository`] when the repository has no work tree.
    pub fn open(path: &Path) -> Result<Self> {
        let inner = git2::Repository::discover(path).map_err(|source| GitError::NotARepository {
            path: path.to_path_buf(),
            source,
        })?;
        let workdir = match inner.workdir() {
            // dunce strips the verbatim prefix canonicalization adds on Windows
            Some(workdir) => dunce::simplified(workdir).to_path_buf(),
            None => {
                return Err(GitError::BareRepository {
                    path: path.to_path_buf(),
                });
            }
        };

        Ok(Self { inner, workdir })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.workdir
    }

    /// Tree paths are relative to the work tree; absolute paths under it are
    /// stripped, anything else passes through.
    pub(crate) fn tree_path(&self, path: &Path) -> PathBuf {
        if !path.is_absolute() {
            return path.to_path_buf();
        }
        dunce::simplified(path)
            .strip_prefix(&self.workdir)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn signature() -> std::result::Result<git2::Signature<'static>, git2::Error> {
        git2::Signature::now("Release Bot", "release-bot@example.com")
    }

    /// A repository with one empty commit on its default branch.
    pub(crate) fn scratch_repo() -> anyhow::Result<(TempDir, Repository)> {
        let dir = TempDir::new()?;
        {
            let repo = git2::Repository::init(dir.path())?;
            let sig = signature()?;
            let empty = repo.find_tree(repo.index()?.write_tree()?)?;
            repo.commit(Some("HEAD"), &sig, &sig, "root", &empty, &[])?;
        }
        let repository = Repository::open(dir.path())?;
        Ok((dir, repository))
    }

    /// Writes and stages `files`, then commits them on top of HEAD.
    pub(crate) fn commit(
        dir: &TempDir,
        repo: &Repository,
        files: &[(&str, &str)],
        message: &str,
    ) -> anyhow::Result<()> {
        let mut index = repo.inner.index()?;
        for (path, content) in files {
            let target = dir.path().join(path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, content)?;
            index.add_path(Path::new(path))?;
        }
        index.write()?;

        let sig = signature()?;
        let tree = repo.inner.find_tree(index.write_tree()?)?;
        let parent = repo.inner.head()?.peel_to_commit()?;
        repo.inner
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &[&parent])?;
        Ok(())
    }

    #[test]
    fn root_is_the_work_tree() -> anyhow::Result<()> {
        let (dir, repo) = scratch_repo()?;
        assert_eq!(repo.root().canonicalize()?, dir.path().canonicalize()?);
        Ok(())
    }

    #[test]
    fn discovery_walks_up_from_subdirectories() -> anyhow::Result<()> {
        let (dir, _repo) = scratch_repo()?;
        let nested = dir.path().join("packages").join("a");
        fs::create_dir_all(&nested)?;

        let repo = Repository::open(&nested)?;

        assert_eq!(repo.root().canonicalize()?, dir.path().canonicalize()?);
        Ok(())
    }

    #[test]
    fn plain_directory_is_not_a_repository() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        assert!(matches!(
            Repository::open(dir.path()),
            Err(GitError::NotARepository { .. })
        ));
        Ok(())
    }

    #[test]
    fn bare_repository_is_rejected() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        git2::Repository::init_bare(dir.path())?;
        assert!(matches!(
            Repository::open(dir.path()),
            Err(GitError::BareRepository { .. })
        ));
        Ok(())
    }

    #[test]
    fn relative_paths_pass_through() -> anyhow::Result<()> {
        let (_dir, repo) = scratch_repo()?;
        assert_eq!(repo.tree_path(Path::new("a/b.json")), PathBuf::from("a/b.json"));
        Ok(())
    }
}
