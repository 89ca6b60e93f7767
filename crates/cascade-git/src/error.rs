use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("libgit2 call failed")]
    Git(#[from] git2::Error),

    #[error("no git repository contains '{}'", path.display())]
    NotARepository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("repository at '{}' has no work tree", path.display())]
    BareRepository { path: PathBuf },

    #[error("cannot resolve '{refspec}' to a tree")]
    UnresolvedRef {
        refspec: String,
        #[source]
        source: git2::Error,
    },

    #[error("'{}' at '{refspec}' is not UTF-8 text", path.display())]
    NonUtf8Content { path: PathBuf, refspec: String },

    #[error("HEAD does not point at a branch")]
    DetachedHead,
}
