//! Services module
//!
//! High-level facades the UI screens call into. One service per concern;
//! each operation is a single read-modify-write cycle against the store
//! or one of the standalone storage keys.

pub mod chosen_history;
pub mod designs;
pub mod folders;
pub mod history;
pub mod lock;
pub mod pin;
pub mod settings;

pub use chosen_history::ChosenHistoryService;
pub use designs::DesignService;
pub use folders::FolderService;
pub use history::HistoryService;
pub use lock::LockService;
pub use pin::PinService;
pub use settings::SettingsService;
