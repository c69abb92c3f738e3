use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] jotter_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("No note content provided")]
    EmptyContent,
    #[error("Note ID cannot be empty")]
    EmptyNoteId,
    #[error("Invalid note ID: {0}")]
    InvalidNoteId(String),
    #[error("Note not found: {0}")]
    NoteNotFound(String),
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
    #[error("Editor command failed: {0}")]
    EditorFailed(String),
    #[error("Refusing to {0} without confirmation; pass --yes to skip the prompt")]
    ConfirmationRequired(&'static str),
}
