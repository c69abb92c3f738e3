//! Storage contracts the controllers are written against.
//!
//! Controllers receive these as `Arc<dyn ...>` at construction. "Not found" is
//! never an error here: lookups return `None`, and every mutation keyed by a
//! note id or category name quietly does nothing when the row is absent, so
//! repeating a call is always safe.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::Result;
use crate::models::{Category, Note, NoteFlags, NoteId, PreferenceChange, Preferences};

/// Category names, unique by name
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Live category list, alphabetical, never containing the empty name
    fn get_all_categories(&self) -> watch::Receiver<Vec<Category>>;

    /// Insert a category; an existing name is left alone
    async fn insert_category(&self, name: &str) -> Result<()>;

    /// Delete a category by name.
    ///
    /// Stored notes filed under it become uncategorized.
    async fn delete_category_by_name(&self, name: &str) -> Result<()>;
}

/// Notes and their lifecycle transitions
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Live collection of every note, most recently updated first
    fn observe_notes(&self) -> watch::Receiver<Vec<Note>>;

    async fn get_note_by_id(&self, id: NoteId) -> Result<Option<Note>>;

    /// Insert a note and return the id the store assigned
    async fn add_note(&self, note: &Note) -> Result<NoteId>;

    /// Overwrite the note stored under `note.id`
    async fn update_note(&self, note: &Note) -> Result<()>;

    /// Write only the pinned/locked/status fields
    async fn update_note_status(&self, id: NoteId, flags: NoteFlags) -> Result<()>;

    /// Remove the row permanently
    async fn delete_note(&self, id: NoteId) -> Result<()>;

    /// Soft delete into the trash
    async fn trash_note(&self, id: NoteId) -> Result<()>;

    /// Bring a trashed note back to the home shelf
    async fn restore_note(&self, id: NoteId) -> Result<()>;

    async fn archive_note(&self, id: NoteId) -> Result<()>;

    async fn unarchive_note(&self, id: NoteId) -> Result<()>;

    /// Move every archived note back home, returning how many moved
    async fn restore_all_archived(&self) -> Result<usize>;

    /// Hard delete everything in the trash, returning how many were removed
    async fn empty_trash(&self) -> Result<usize>;
}

/// Application preferences, written one field at a time
#[async_trait]
pub trait PreferencesRepository: Send + Sync {
    /// Live preferences record
    fn observe(&self) -> watch::Receiver<Preferences>;

    /// Current preferences without subscribing
    fn load(&self) -> Preferences {
        self.observe().borrow().clone()
    }

    async fn set(&self, change: PreferenceChange) -> Result<()>;

    /// Reset every preference to its default
    async fn clear_all(&self) -> Result<()>;
}
