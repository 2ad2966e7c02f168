//! Error types for flashroll
//!
//! All errors use thiserror for structured error handling. Only the
//! storage backends surface these: the document store and the services
//! swallow backend failures and degrade to defaults, so a broken storage
//! medium never blocks the station UI.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
