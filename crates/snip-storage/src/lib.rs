//! Repository implementations for the snip URL shortener.

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryRepository;
pub use snip_core::repository::{ReadRepository, Repository, Result};
pub use snip_core::StorageError;
pub use sqlite::{SqliteRepository, SqliteSettings};
