pub mod error;
mod tag;
pub mod types;
mod version;

pub use error::*;
pub use tag::TagName;
pub use types::*;
pub use version::Version;
