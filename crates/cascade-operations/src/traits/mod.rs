mod repository;

pub use repository::{RepositoryReader, RepositoryWriter};
