//! Storage module
//!
//! Provides the key/value backend abstraction plus the file-backed and
//! in-memory implementations.

pub mod backend;
pub mod file;
pub mod memory;

pub use backend::StorageBackend;
pub use file::FileBackend;
pub use memory::MemoryBackend;
