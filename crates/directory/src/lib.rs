mod error;
mod memory;
mod paged;
mod provider;

pub use error::DirectoryError;
pub use memory::InMemoryDirectory;
pub use paged::{GroupPage, PageSource, stream_pages};
pub use provider::{GroupStream, GroupsProvider};

pub type Result<T> = std::result::Result<T, DirectoryError>;
