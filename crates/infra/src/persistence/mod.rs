//! Key/value persistence boundary.
//!
//! The inventory store writes each collection as one whole value under its own
//! key and reads it back at startup. Nothing here knows what the bytes mean.

pub mod file;
pub mod in_memory;
pub mod r#trait;

pub use file::FilePersistenceStore;
pub use in_memory::InMemoryPersistenceStore;
pub use r#trait::{PersistenceError, PersistenceStore};
