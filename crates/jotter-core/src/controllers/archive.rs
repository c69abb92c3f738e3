//! Archive shelf.

use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::models::{Note, NoteId, NoteStatus, Preferences};
use crate::reactive::{ConfirmDialog, ConfirmGate, SharedProjection, Subscription};
use crate::store::{NoteRepository, PreferencesRepository};

use super::Repositories;

/// Snapshot rendered by the archive screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveState {
    /// Archived notes, most recently updated first
    pub notes: Vec<Note>,
    pub is_grid_view: bool,
    pub show_restore_all_dialog: bool,
}

fn project_archive(preferences: &Preferences, notes: &[Note], dialog: ConfirmDialog) -> ArchiveState {
    ArchiveState {
        notes: notes
            .iter()
            .filter(|note| note.status == NoteStatus::Archived)
            .cloned()
            .collect(),
        is_grid_view: preferences.is_grid_view,
        show_restore_all_dialog: dialog.is_visible(),
    }
}

pub struct ArchiveController {
    notes: Arc<dyn NoteRepository>,
    preferences: Arc<dyn PreferencesRepository>,
    restore_all: ConfirmGate,
    projection: SharedProjection<ArchiveState>,
}

impl ArchiveController {
    pub fn new(repositories: &Repositories, idle_grace: Duration) -> Self {
        let restore_all = ConfirmGate::new();
        let projection = SharedProjection::combine3(
            repositories.preferences.observe(),
            repositories.notes.observe_notes(),
            restore_all.subscribe(),
            idle_grace,
            |preferences, notes, dialog| project_archive(preferences, notes, *dialog),
        );

        Self {
            notes: Arc::clone(&repositories.notes),
            preferences: Arc::clone(&repositories.preferences),
            restore_all,
            projection,
        }
    }

    pub fn subscribe(&self) -> Subscription<ArchiveState> {
        self.projection.subscribe()
    }

    /// Compute the snapshot from the stores' current values
    pub fn snapshot(&self) -> ArchiveState {
        let preferences = self.preferences.load();
        let feed = self.notes.observe_notes();
        let notes = feed.borrow();
        project_archive(&preferences, &notes, self.restore_all.state())
    }

    /// Ask for confirmation before restoring everything
    pub fn request_restore_all(&self) {
        self.restore_all.request();
    }

    pub fn dismiss_restore_all(&self) {
        self.restore_all.dismiss();
    }

    /// Move every archived note back home once confirmed.
    ///
    /// Returns how many notes moved; 0 when no confirmation was pending.
    pub async fn confirm_restore_all(&self) -> Result<usize> {
        let restored = self
            .restore_all
            .confirm(|| self.notes.restore_all_archived())
            .await
            .inspect_err(|error| tracing::error!("Failed to restore archived notes: {}", error))?;
        Ok(restored.unwrap_or(0))
    }

    /// Move one note back to the home shelf
    pub async fn unarchive(&self, id: NoteId) -> Result<()> {
        self.notes
            .unarchive_note(id)
            .await
            .inspect_err(|error| tracing::error!("Failed to unarchive note {}: {}", id, error))
    }
}
