mod filesystem;
mod git;
mod memory;

pub use filesystem::FileSystemRepository;
pub use git::Git2Repository;
pub use memory::InMemoryRepository;
