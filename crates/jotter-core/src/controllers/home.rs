//! Home shelf: every active note, filtered by a category chip.

use std::cmp::Reverse;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::error::Result;
use crate::models::{Note, NoteStatus, PreferenceChange, Preferences};
use crate::reactive::{SharedProjection, Subscription};
use crate::store::{CategoryRepository, NoteRepository, PreferencesRepository};

use super::Repositories;

/// Which notes the home shelf shows
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum NoteFilter {
    #[default]
    All,
    Pinned,
    Locked,
    /// Exact category name match
    Category(String),
}

impl NoteFilter {
    /// Parse a chip label. `All`, `Pinned` and `Locked` are reserved; any
    /// other label selects the category with exactly that name.
    pub fn from_selector(selector: &str) -> Self {
        match selector {
            "All" => Self::All,
            "Pinned" => Self::Pinned,
            "Locked" => Self::Locked,
            category => Self::Category(category.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => "All",
            Self::Pinned => "Pinned",
            Self::Locked => "Locked",
            Self::Category(name) => name,
        }
    }

    pub fn matches(&self, note: &Note) -> bool {
        match self {
            Self::All => true,
            Self::Pinned => note.is_pinned,
            Self::Locked => note.is_locked,
            Self::Category(name) => note.category == *name,
        }
    }
}

impl fmt::Display for NoteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Snapshot rendered by the home screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeState {
    /// Filtered notes, pinned first, then most recently updated
    pub notes: Vec<Note>,
    /// Category chips: distinct non-blank categories on the shelf, sorted
    pub categories: Vec<String>,
    pub selected: NoteFilter,
    pub is_grid_view: bool,
    pub has_pinned_notes: bool,
    pub has_locked_notes: bool,
}

/// Keep the notes `filter` selects, pinned first, then newest first
pub fn filter_notes<'a>(notes: impl IntoIterator<Item = &'a Note>, filter: &NoteFilter) -> Vec<Note> {
    let mut selected: Vec<Note> = notes
        .into_iter()
        .filter(|note| filter.matches(note))
        .cloned()
        .collect();
    selected.sort_by_key(|note| (Reverse(note.is_pinned), Reverse(note.updated_time), Reverse(note.id)));
    selected
}

/// Build the home snapshot from preferences, every note and the selection
pub fn project_home(preferences: &Preferences, notes: &[Note], selected: &NoteFilter) -> HomeState {
    let shelf: Vec<&Note> = notes
        .iter()
        .filter(|note| note.status == NoteStatus::Active)
        .collect();

    let mut categories: Vec<String> = shelf
        .iter()
        .filter(|note| note.has_category())
        .map(|note| note.category.clone())
        .collect();
    categories.sort();
    categories.dedup();

    HomeState {
        notes: filter_notes(shelf.iter().copied(), selected),
        categories,
        selected: selected.clone(),
        is_grid_view: preferences.is_grid_view,
        has_pinned_notes: shelf.iter().any(|note| note.is_pinned),
        has_locked_notes: shelf.iter().any(|note| note.is_locked),
    }
}

/// Controller behind the home screen
pub struct HomeController {
    categories: Arc<dyn CategoryRepository>,
    preferences: Arc<dyn PreferencesRepository>,
    notes: Arc<dyn NoteRepository>,
    selection: watch::Sender<NoteFilter>,
    projection: SharedProjection<HomeState>,
}

impl HomeController {
    pub fn new(repositories: &Repositories, idle_grace: Duration) -> Self {
        let (selection, selected) = watch::channel(NoteFilter::All);
        let projection = SharedProjection::combine3(
            repositories.preferences.observe(),
            repositories.notes.observe_notes(),
            selected,
            idle_grace,
            |preferences, notes, selected| project_home(preferences, notes, selected),
        );

        Self {
            categories: Arc::clone(&repositories.categories),
            preferences: Arc::clone(&repositories.preferences),
            notes: Arc::clone(&repositories.notes),
            selection,
            projection,
        }
    }

    /// Observe the home snapshot
    pub fn subscribe(&self) -> Subscription<HomeState> {
        self.projection.subscribe()
    }

    /// Compute the snapshot from the stores' current values
    pub fn snapshot(&self) -> HomeState {
        let preferences = self.preferences.load();
        let selected = self.selection.borrow().clone();
        let feed = self.notes.observe_notes();
        let notes = feed.borrow();
        project_home(&preferences, &notes, &selected)
    }

    pub fn selected(&self) -> NoteFilter {
        self.selection.borrow().clone()
    }

    /// Select a chip by label
    pub fn select_category(&self, selector: &str) {
        self.select(NoteFilter::from_selector(selector));
    }

    pub fn select(&self, filter: NoteFilter) {
        self.selection.send_if_modified(|current| {
            if *current == filter {
                return false;
            }
            *current = filter;
            true
        });
    }

    /// Switch between grid and list layout
    pub async fn toggle_grid_view(&self) -> Result<()> {
        let is_grid_view = self.preferences.load().is_grid_view;
        self.preferences
            .set(PreferenceChange::GridView(!is_grid_view))
            .await
    }

    /// Delete a category; its notes become uncategorized.
    ///
    /// If the deleted category was selected the shelf falls back to `All`.
    pub async fn delete_category(&self, name: &str) -> Result<()> {
        self.categories
            .delete_category_by_name(name)
            .await
            .inspect_err(|error| tracing::error!("Failed to delete category {}: {}", name, error))?;

        self.selection.send_if_modified(|current| {
            let was_selected =
                matches!(current, NoteFilter::Category(selected) if selected.as_str() == name);
            if was_selected {
                *current = NoteFilter::All;
            }
            was_selected
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteId;
    use crate::services::DatabaseService;
    use pretty_assertions::assert_eq;

    fn note(id: i64, title: &str) -> Note {
        Note {
            id: NoteId::new(id),
            updated_time: id * 1_000,
            ..Note::new(title, "")
        }
    }

    fn titles(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|note| note.title.as_str()).collect()
    }

    /// A pinned, B filed under Work, C trashed
    fn fixture() -> Vec<Note> {
        let a = Note {
            is_pinned: true,
            ..note(1, "A")
        };
        let b = note(2, "B").with_category("Work");
        let c = Note {
            status: NoteStatus::Trashed,
            ..note(3, "C")
        };
        vec![c, b, a]
    }

    #[test]
    fn filters_follow_selection() {
        let notes = fixture();
        let preferences = Preferences::default();

        let pinned = project_home(&preferences, &notes, &NoteFilter::Pinned);
        assert_eq!(titles(&pinned.notes), vec!["A"]);

        let work = project_home(&preferences, &notes, &NoteFilter::from_selector("Work"));
        assert_eq!(titles(&work.notes), vec!["B"]);

        let all = project_home(&preferences, &notes, &NoteFilter::All);
        assert_eq!(titles(&all.notes), vec!["A", "B"]);
    }

    #[test]
    fn pinned_notes_sort_first() {
        let older_pinned = Note {
            is_pinned: true,
            ..note(1, "old pinned")
        };
        let notes = vec![note(3, "newest"), note(2, "middle"), older_pinned];

        let sorted = filter_notes(&notes, &NoteFilter::All);

        assert_eq!(titles(&sorted), vec!["old pinned", "newest", "middle"]);
    }

    #[test]
    fn chips_and_flags_come_from_the_shelf() {
        let mut notes = fixture();
        notes.push(note(4, "D").with_category("Home"));
        notes.push(Note {
            status: NoteStatus::Archived,
            is_locked: true,
            ..note(5, "E").with_category("Old")
        });

        let state = project_home(&Preferences::default(), &notes, &NoteFilter::All);

        assert_eq!(state.categories, vec!["Home", "Work"]);
        assert!(state.has_pinned_notes);
        assert!(!state.has_locked_notes);
        assert!(state.is_grid_view);
    }

    #[test]
    fn selector_keywords() {
        assert_eq!(NoteFilter::from_selector("All"), NoteFilter::All);
        assert_eq!(NoteFilter::from_selector("Locked"), NoteFilter::Locked);
        assert_eq!(
            NoteFilter::from_selector("pinned"),
            NoteFilter::Category("pinned".to_string())
        );
        assert_eq!(NoteFilter::Category("Work".into()).to_string(), "Work");
    }

    async fn controller() -> (DatabaseService, HomeController) {
        let service = DatabaseService::open_in_memory().await.unwrap();
        let controller = HomeController::new(
            &Repositories::from_service(&service),
            Duration::from_secs(5),
        );
        (service, controller)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn projection_follows_note_writes() {
        let (service, controller) = controller().await;
        let mut home = controller.subscribe();

        service.add_note(&Note::new("fresh", "")).await.unwrap();

        let state = home.wait_for(|state| state.notes.len() == 1).await.unwrap();
        assert_eq!(state.notes[0].title, "fresh");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn selection_and_grid_toggle_update_snapshot() {
        let (service, controller) = controller().await;
        service
            .add_note(&Note::new("memo", "").with_category("Work"))
            .await
            .unwrap();
        service.add_note(&Note::new("other", "")).await.unwrap();
        let mut home = controller.subscribe();

        controller.select_category("Work");
        let state = home
            .wait_for(|state| state.selected == NoteFilter::Category("Work".into()))
            .await
            .unwrap();
        assert_eq!(titles(&state.notes), vec!["memo"]);

        controller.toggle_grid_view().await.unwrap();
        let state = home.wait_for(|state| !state.is_grid_view).await.unwrap();
        assert_eq!(state.selected.label(), "Work");
        assert!(!controller.snapshot().is_grid_view);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn deleting_selected_category_resets_selection() {
        let (service, controller) = controller().await;
        service.insert_category("Work").await.unwrap();
        service
            .add_note(&Note::new("memo", "").with_category("Work"))
            .await
            .unwrap();
        controller.select_category("Work");

        controller.delete_category("Work").await.unwrap();

        let state = controller.snapshot();
        assert_eq!(state.selected, NoteFilter::All);
        assert!(state.categories.is_empty());
        assert_eq!(state.notes[0].category, "");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn deleting_other_category_keeps_selection() {
        let (service, controller) = controller().await;
        service.insert_category("Home").await.unwrap();
        controller.select_category("Work");

        controller.delete_category("Home").await.unwrap();

        assert_eq!(controller.selected(), NoteFilter::Category("Work".into()));
    }
}
