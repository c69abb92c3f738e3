//! Trash shelf.

use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::models::{Note, NoteId, NoteStatus, Preferences};
use crate::reactive::{ConfirmDialog, ConfirmGate, SharedProjection, Subscription};
use crate::store::{NoteRepository, PreferencesRepository};

use super::Repositories;

/// Snapshot rendered by the trash screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrashState {
    /// Trashed notes, most recently trashed first
    pub notes: Vec<Note>,
    pub is_grid_view: bool,
    pub show_empty_trash_dialog: bool,
}

fn project_trash(preferences: &Preferences, notes: &[Note], dialog: ConfirmDialog) -> TrashState {
    TrashState {
        notes: notes
            .iter()
            .filter(|note| note.status == NoteStatus::Trashed)
            .cloned()
            .collect(),
        is_grid_view: preferences.is_grid_view,
        show_empty_trash_dialog: dialog.is_visible(),
    }
}

pub struct TrashController {
    notes: Arc<dyn NoteRepository>,
    preferences: Arc<dyn PreferencesRepository>,
    empty_trash: ConfirmGate,
    projection: SharedProjection<TrashState>,
}

impl TrashController {
    pub fn new(repositories: &Repositories, idle_grace: Duration) -> Self {
        let empty_trash = ConfirmGate::new();
        let projection = SharedProjection::combine3(
            repositories.preferences.observe(),
            repositories.notes.observe_notes(),
            empty_trash.subscribe(),
            idle_grace,
            |preferences, notes, dialog| project_trash(preferences, notes, *dialog),
        );

        Self {
            notes: Arc::clone(&repositories.notes),
            preferences: Arc::clone(&repositories.preferences),
            empty_trash,
            projection,
        }
    }

    pub fn subscribe(&self) -> Subscription<TrashState> {
        self.projection.subscribe()
    }

    /// Compute the snapshot from the stores' current values
    pub fn snapshot(&self) -> TrashState {
        let preferences = self.preferences.load();
        let feed = self.notes.observe_notes();
        let notes = feed.borrow();
        project_trash(&preferences, &notes, self.empty_trash.state())
    }

    pub fn request_empty_trash(&self) {
        self.empty_trash.request();
    }

    pub fn dismiss_empty_trash(&self) {
        self.empty_trash.dismiss();
    }

    /// Permanently delete everything in the trash once confirmed.
    ///
    /// Returns how many notes were removed; 0 when no confirmation was pending.
    pub async fn confirm_empty_trash(&self) -> Result<usize> {
        let removed = self
            .empty_trash
            .confirm(|| self.notes.empty_trash())
            .await
            .inspect_err(|error| tracing::error!("Failed to empty trash: {}", error))?;
        Ok(removed.unwrap_or(0))
    }

    /// Put one note back on the home shelf
    pub async fn restore(&self, id: NoteId) -> Result<()> {
        self.notes
            .restore_note(id)
            .await
            .inspect_err(|error| tracing::error!("Failed to restore note {}: {}", id, error))
    }

    /// Permanently delete one note
    pub async fn delete_forever(&self, id: NoteId) -> Result<()> {
        self.notes
            .delete_note(id)
            .await
            .inspect_err(|error| tracing::error!("Failed to delete note {}: {}", id, error))
    }
}
