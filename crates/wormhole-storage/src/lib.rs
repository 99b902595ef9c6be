//! [`UrlStore`](wormhole_core::UrlStore) implementations.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::InMemoryStore;
