mod candidate;
mod error;
pub mod operations;
pub mod providers;
pub mod strategies;
pub mod traits;
pub mod workspace;

#[cfg(test)]
pub mod mocks;

pub use candidate::{PullRequestBody, ReleaseCandidate, ReleaseData, ReleasePullRequest};
pub use error::{OperationError, Result};
