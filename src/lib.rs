//! flashroll core library
//!
//! Local-first state for walk-in "get what you get" tattoo stations: a
//! pool of flash designs organized into folders, a uniform-random roll
//! with a limited reroll budget, artist-gated settings, and a capped
//! choose history — all persisted as JSON under a handful of storage
//! keys behind an injected backend.

pub mod config;
pub mod error;
pub mod services;
pub mod storage;
pub mod store;

pub use error::{AppError, Result};
pub use services::{
    ChosenHistoryService, DesignService, FolderService, HistoryService, LockService, PinService,
    SettingsService,
};
pub use storage::{FileBackend, MemoryBackend, StorageBackend};
pub use store::DocumentStore;
