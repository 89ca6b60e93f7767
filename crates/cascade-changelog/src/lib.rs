//! Keep-a-changelog style release sections and their insertion into an
//! existing `CHANGELOG.md`.

mod changelog;
mod section;

pub use changelog::insert_release;
pub use section::{PREAMBLE, ReleaseSection, release_heading};
