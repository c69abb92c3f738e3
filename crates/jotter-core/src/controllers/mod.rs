//! Per-screen controllers.
//!
//! Each controller receives its stores as trait objects and exposes its state
//! through `tokio::sync::watch` channels or a [`SharedProjection`]. None of
//! them render anything; a front end subscribes and draws.
//!
//! [`SharedProjection`]: crate::reactive::SharedProjection

mod archive;
mod home;
mod note_detail;
mod settings;
mod trash;

use std::sync::Arc;

use crate::services::DatabaseService;
use crate::store::{CategoryRepository, NoteRepository, PreferencesRepository};

pub use archive::{ArchiveController, ArchiveState};
pub use home::{filter_notes, project_home, HomeController, HomeState, NoteFilter};
pub use note_detail::{DeleteOutcome, NoteDetailController, NoteDetailState};
pub use settings::{SettingsController, SettingsState};
pub use trash::{TrashController, TrashState};

/// The store handles every controller is built from.
#[derive(Clone)]
pub struct Repositories {
    pub notes: Arc<dyn NoteRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub preferences: Arc<dyn PreferencesRepository>,
}

impl Repositories {
    /// Back every store with one database service
    pub fn from_service(service: &DatabaseService) -> Self {
        let service = Arc::new(service.clone());
        Self {
            notes: service.clone(),
            categories: service.clone(),
            preferences: service,
        }
    }
}
