//! Error types for jotter-core

use thiserror::Error;

use crate::models::NoteId;

/// Result type alias using jotter-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in jotter-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// `SQLite` error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored note vanished while it was being written
    #[error("Note {0} no longer exists")]
    NoteNotFound(NoteId),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A blocking database task panicked or was cancelled
    #[error("Background task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
