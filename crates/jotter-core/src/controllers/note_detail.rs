//! Editing a single note.
//!
//! The controller owns one draft. Text edits stay in memory until [`save`];
//! pin, lock and archive toggles are written straight away without touching
//! the stored text. While the controller is alive it watches the category
//! list and clears a draft category that stops existing.
//!
//! [`save`]: NoteDetailController::save

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};
use crate::models::{category_names, Category, Note, NoteFlags, NoteId, NoteStatus};
use crate::reactive::LatestTask;
use crate::store::{CategoryRepository, NoteRepository};
use crate::util::{is_blank, now_millis};

/// The editable draft shown by a note screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDetailState {
    /// Store id; `None` until the first save
    pub id: Option<NoteId>,
    pub title: String,
    pub content: String,
    pub category: String,
    pub is_pinned: bool,
    pub is_locked: bool,
    pub status: NoteStatus,
    /// Timestamp of the last persist (Unix ms)
    pub last_edited: i64,
    pub is_persisted: bool,
    pub is_loading: bool,
}

impl Default for NoteDetailState {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            content: String::new(),
            category: String::new(),
            is_pinned: false,
            is_locked: false,
            status: NoteStatus::Active,
            last_edited: now_millis(),
            is_persisted: false,
            is_loading: true,
        }
    }
}

impl NoteDetailState {
    /// A blank draft that is ready for editing
    fn empty() -> Self {
        Self {
            is_loading: false,
            ..Self::default()
        }
    }

    /// Draft mirroring a stored note
    pub fn from_note(note: Note) -> Self {
        Self {
            id: Some(note.id),
            title: note.title,
            content: note.content,
            category: note.category,
            is_pinned: note.is_pinned,
            is_locked: note.is_locked,
            status: note.status,
            last_edited: note.updated_time,
            is_persisted: true,
            is_loading: false,
        }
    }

    /// The id of the stored row this draft edits, if any
    pub fn persisted_id(&self) -> Option<NoteId> {
        self.id
            .filter(|id| self.is_persisted && !id.is_unsaved())
    }

    pub const fn flags(&self) -> NoteFlags {
        NoteFlags {
            is_pinned: self.is_pinned,
            is_locked: self.is_locked,
            status: self.status,
        }
    }

    fn set_flags(&mut self, flags: NoteFlags) {
        self.is_pinned = flags.is_pinned;
        self.is_locked = flags.is_locked;
        self.status = flags.status;
    }

    /// The draft as a note record ready to write
    pub fn to_note(&self) -> Note {
        Note {
            id: self.id.unwrap_or(NoteId::UNSAVED),
            title: self.title.clone(),
            content: self.content.clone(),
            category: self.category.clone(),
            is_pinned: self.is_pinned,
            is_locked: self.is_locked,
            status: self.status,
            updated_time: self.last_edited,
        }
    }
}

/// What [`NoteDetailController::delete_note`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Moved to the trash
    Trashed,
    /// Removed permanently
    Deleted,
}

/// Controller behind the note editor screen
pub struct NoteDetailController {
    notes: Arc<dyn NoteRepository>,
    state: Arc<watch::Sender<NoteDetailState>>,
    categories: Arc<dyn CategoryRepository>,
    category_feed: watch::Receiver<Vec<Category>>,
    shutdown: CancellationToken,
}

impl NoteDetailController {
    /// Start with a blank, unsaved draft.
    ///
    /// Must be called from within a Tokio runtime: the category watcher is
    /// spawned here and runs until the controller is dropped.
    pub fn new(notes: Arc<dyn NoteRepository>, categories: Arc<dyn CategoryRepository>) -> Self {
        let state = Arc::new(watch::channel(NoteDetailState::empty()).0);
        let category_feed = categories.get_all_categories();
        let shutdown = CancellationToken::new();
        let listed = category_names(&category_feed.borrow()).into_iter().collect();

        tokio::spawn(watch_categories(
            category_feed.clone(),
            listed,
            Arc::clone(&state),
            shutdown.clone(),
        ));

        Self {
            notes,
            state,
            categories,
            category_feed,
            shutdown,
        }
    }

    /// Open the editor for `note_id`, or for a new note when `None`.
    pub async fn open(
        notes: Arc<dyn NoteRepository>,
        categories: Arc<dyn CategoryRepository>,
        note_id: Option<NoteId>,
    ) -> Result<Self> {
        let controller = Self::new(notes, categories);
        if let Some(id) = note_id {
            controller.load(id).await?;
        }
        Ok(controller)
    }

    pub fn subscribe(&self) -> watch::Receiver<NoteDetailState> {
        self.state.subscribe()
    }

    /// Snapshot of the current draft
    pub fn state(&self) -> NoteDetailState {
        self.state.borrow().clone()
    }

    /// Names offered by the category picker
    pub fn available_categories(&self) -> Vec<String> {
        category_names(&self.category_feed.borrow())
    }

    /// Replace the draft with the stored note.
    ///
    /// A missing note yields a blank unsaved draft rather than an error.
    pub async fn load(&self, id: NoteId) -> Result<()> {
        self.state.send_modify(|state| state.is_loading = true);

        let note = match self.notes.get_note_by_id(id).await {
            Ok(note) => note,
            Err(error) => {
                tracing::error!("Failed to load note {}: {}", id, error);
                self.state.send_modify(|state| state.is_loading = false);
                return Err(error);
            }
        };

        if note.is_none() {
            tracing::debug!(note_id = %id, "Note not found, starting blank draft");
        }
        self.state
            .send_replace(note.map_or_else(NoteDetailState::empty, NoteDetailState::from_note));
        clear_dangling_category(&self.state, &self.available_categories());
        Ok(())
    }

    pub fn update_title(&self, title: impl Into<String>) {
        let title = title.into();
        self.state.send_modify(|state| state.title = title);
    }

    pub fn update_content(&self, content: impl Into<String>) {
        let content = content.into();
        self.state.send_modify(|state| state.content = content);
    }

    pub fn update_category(&self, category: impl Into<String>) {
        let category = category.into();
        self.state.send_modify(|state| state.category = category);
    }

    /// Flip the pinned flag and persist it without saving the text
    pub async fn toggle_pin(&self) -> Result<()> {
        self.toggle_flags("pin", |flags| flags.is_pinned = !flags.is_pinned)
            .await
    }

    /// Flip the locked flag and persist it without saving the text
    pub async fn toggle_lock(&self) -> Result<()> {
        self.toggle_flags("lock", |flags| flags.is_locked = !flags.is_locked)
            .await
    }

    /// Move the note between the home shelf and the archive.
    ///
    /// Does nothing for a trashed note.
    pub async fn toggle_archive(&self) -> Result<()> {
        self.toggle_flags("archive", |flags| {
            flags.status = match flags.status {
                NoteStatus::Active => NoteStatus::Archived,
                NoteStatus::Archived => NoteStatus::Active,
                status @ (NoteStatus::Trashed | NoteStatus::ArchivedTrashed) => status,
            };
        })
        .await
    }

    async fn toggle_flags(&self, action: &str, flip: impl FnOnce(&mut NoteFlags)) -> Result<()> {
        let draft = self.state();
        let before = draft.flags();
        let mut after = before;
        flip(&mut after);
        if after == before {
            return Ok(());
        }

        self.state.send_modify(|state| state.set_flags(after));
        let Some(id) = draft.persisted_id() else {
            return Ok(());
        };

        if let Err(error) = self.notes.update_note_status(id, after).await {
            tracing::error!("Failed to {} note {}: {}", action, id, error);
            self.state.send_modify(|state| state.set_flags(before));
            return Err(error);
        }
        Ok(())
    }

    /// Persist the draft and return its id.
    ///
    /// A non-blank category is registered first. The stored row is then
    /// re-read so the draft carries the assigned id and write timestamp; a row
    /// deleted elsewhere in the meantime fails with [`Error::NoteNotFound`].
    pub async fn save(&self) -> Result<NoteId> {
        let draft = self.state();
        self.persist(&draft).await.inspect_err(|error| {
            tracing::error!("Failed to save note: {}", error);
        })
    }

    async fn persist(&self, draft: &NoteDetailState) -> Result<NoteId> {
        if !is_blank(&draft.category) {
            self.categories.insert_category(&draft.category).await?;
        }

        let note = draft.to_note();
        let id = match draft.persisted_id() {
            Some(id) => {
                self.notes.update_note(&note).await?;
                id
            }
            None => self.notes.add_note(&note).await?,
        };

        let stored = self
            .notes
            .get_note_by_id(id)
            .await?
            .ok_or(Error::NoteNotFound(id))?;
        self.state.send_modify(|state| {
            state.id = Some(stored.id);
            state.is_persisted = true;
            state.last_edited = stored.updated_time;
        });
        tracing::debug!(note_id = %id, "Saved note");
        Ok(id)
    }

    /// Trash the note, or delete it for good when it is already trashed.
    pub async fn delete_note(&self) -> Result<DeleteOutcome> {
        let draft = self.state();
        let id = draft.id.unwrap_or(NoteId::UNSAVED);

        if draft.status.is_trashed() {
            self.notes.delete_note(id).await.inspect_err(|error| {
                tracing::error!("Failed to delete note {}: {}", id, error);
            })?;
            self.state.send_modify(|state| {
                state.id = None;
                state.is_persisted = false;
            });
            return Ok(DeleteOutcome::Deleted);
        }

        self.notes.trash_note(id).await.inspect_err(|error| {
            tracing::error!("Failed to trash note {}: {}", id, error);
        })?;
        if draft.persisted_id().is_some() {
            self.state
                .send_modify(|state| state.status = NoteStatus::Trashed);
        }
        Ok(DeleteOutcome::Trashed)
    }

    /// Take the note out of the trash
    pub async fn restore_note(&self) -> Result<()> {
        let draft = self.state();
        let id = draft.id.unwrap_or(NoteId::UNSAVED);

        self.notes.restore_note(id).await.inspect_err(|error| {
            tracing::error!("Failed to restore note {}: {}", id, error);
        })?;
        if draft.status.is_trashed() && draft.persisted_id().is_some() {
            self.state
                .send_modify(|state| state.status = NoteStatus::Active);
        }
        Ok(())
    }

    /// Throw away unsaved edits by reloading the stored note
    pub async fn undo_changes(&self) -> Result<()> {
        match self.state().persisted_id() {
            Some(id) => self.load(id).await,
            None => Ok(()),
        }
    }
}

impl Drop for NoteDetailController {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Re-check the draft category on every category list change.
///
/// Only names that have been listed before and are now gone count as
/// deleted, so a category typed into the draft but not stored yet survives
/// until `save` registers it. Only the check for the newest list may run; an
/// older one still pending is aborted.
async fn watch_categories(
    mut feed: watch::Receiver<Vec<Category>>,
    mut seen: BTreeSet<String>,
    state: Arc<watch::Sender<NoteDetailState>>,
    shutdown: CancellationToken,
) {
    let mut latest = LatestTask::new();
    loop {
        tokio::select! {
            () = shutdown.cancelled() => break,
            changed = feed.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }

        let names = category_names(&feed.borrow_and_update());
        seen.extend(names.iter().cloned());
        let removed: BTreeSet<String> = seen
            .iter()
            .filter(|name| !names.contains(name))
            .cloned()
            .collect();

        let state = Arc::clone(&state);
        latest.spawn(async move {
            clear_category_where(&state, |category| removed.contains(category));
        });
    }
}

/// Blank the draft category if it is not in `names`
fn clear_dangling_category(state: &watch::Sender<NoteDetailState>, names: &[String]) {
    clear_category_where(state, |category| !names.iter().any(|name| name == category));
}

fn clear_category_where(state: &watch::Sender<NoteDetailState>, is_gone: impl Fn(&str) -> bool) {
    state.send_if_modified(|draft| {
        if is_blank(&draft.category) || !is_gone(&draft.category) {
            return false;
        }
        tracing::debug!(category = %draft.category, "Draft category was deleted, clearing it");
        draft.category.clear();
        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::DatabaseService;
    use crate::Error;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    async fn setup() -> (DatabaseService, NoteDetailController) {
        let service = DatabaseService::open_in_memory().await.unwrap();
        let controller =
            NoteDetailController::new(Arc::new(service.clone()), Arc::new(service.clone()));
        (service, controller)
    }

    async fn open(service: &DatabaseService, id: NoteId) -> NoteDetailController {
        NoteDetailController::open(
            Arc::new(service.clone()),
            Arc::new(service.clone()),
            Some(id),
        )
        .await
        .unwrap()
    }

    async fn wait_for_state(
        controller: &NoteDetailController,
        predicate: impl FnMut(&NoteDetailState) -> bool,
    ) -> NoteDetailState {
        let mut state = controller.subscribe();
        let snapshot = tokio::time::timeout(Duration::from_secs(5), state.wait_for(predicate))
            .await
            .expect("timed out waiting for draft state")
            .unwrap()
            .clone();
        snapshot
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn save_roundtrip_refreshes_updated_time() {
        let (service, controller) = setup().await;
        controller.update_title("Groceries");
        controller.update_content("milk, eggs");

        let id = controller.save().await.unwrap();

        let stored = service.get_note_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Groceries");
        assert_eq!(stored.content, "milk, eggs");

        let state = controller.state();
        assert_eq!(state.id, Some(id));
        assert!(state.is_persisted);
        assert_eq!(state.last_edited, stored.updated_time);

        controller.update_content("milk, eggs, bread");
        assert_eq!(controller.save().await.unwrap(), id);
        let resaved = service.get_note_by_id(id).await.unwrap().unwrap();
        assert_eq!(resaved.content, "milk, eggs, bread");
        assert!(resaved.updated_time > stored.updated_time);
        assert_eq!(controller.state().last_edited, resaved.updated_time);
        assert_eq!(service.observe_notes().borrow().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn blank_note_is_saved() {
        let (service, controller) = setup().await;

        let id = controller.save().await.unwrap();

        let stored = service.get_note_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.title, "");
        assert_eq!(stored.content, "");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn save_registers_category() {
        let (service, controller) = setup().await;
        controller.update_category("Work");

        controller.save().await.unwrap();

        assert_eq!(
            *service.get_all_categories().borrow(),
            vec![Category::new("Work")]
        );
        assert_eq!(controller.state().category, "Work");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn open_missing_note_gives_blank_draft() {
        let service = DatabaseService::open_in_memory().await.unwrap();
        let controller = open(&service, NoteId::new(999)).await;

        let state = controller.state();
        assert_eq!(state.id, None);
        assert!(!state.is_persisted);
        assert!(!state.is_loading);
        assert_eq!(state.title, "");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn open_existing_note_loads_it() {
        let service = DatabaseService::open_in_memory().await.unwrap();
        service.insert_category("Work").await.unwrap();
        let id = service
            .add_note(&Note::new("Plan", "ship").with_category("Work"))
            .await
            .unwrap();

        let controller = open(&service, id).await;

        let state = controller.state();
        assert_eq!(state.persisted_id(), Some(id));
        assert_eq!(state.title, "Plan");
        assert_eq!(state.category, "Work");
        assert!(!state.is_loading);
        assert_eq!(controller.available_categories(), vec!["Work"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn deleting_category_clears_draft_category() {
        let service = DatabaseService::open_in_memory().await.unwrap();
        service.insert_category("Work").await.unwrap();
        let id = service
            .add_note(&Note::new("memo", "").with_category("Work"))
            .await
            .unwrap();
        let controller = open(&service, id).await;
        assert_eq!(controller.state().category, "Work");

        service.delete_category_by_name("Work").await.unwrap();

        let state = wait_for_state(&controller, |state| state.category.is_empty()).await;
        assert_eq!(state.title, "memo");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn unrelated_category_change_keeps_draft_category() {
        let service = DatabaseService::open_in_memory().await.unwrap();
        service.insert_category("Work").await.unwrap();
        let id = service
            .add_note(&Note::new("memo", "").with_category("Work"))
            .await
            .unwrap();
        let controller = open(&service, id).await;

        service.insert_category("Home").await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(controller.state().category, "Work");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn new_category_survives_until_save() {
        let (service, controller) = setup().await;
        controller.update_category("Fresh");
        tokio::time::sleep(Duration::from_millis(20)).await;

        service.insert_category("Other").await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(controller.state().category, "Fresh");

        let id = controller.save().await.unwrap();
        let stored = service.get_note_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.category, "Fresh");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn saved_category_is_cleared_once_deleted() {
        let (service, controller) = setup().await;
        controller.update_category("Fresh");
        controller.save().await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        service.delete_category_by_name("Fresh").await.unwrap();

        wait_for_state(&controller, |state| state.category.is_empty()).await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn save_fails_when_note_was_deleted_elsewhere() {
        let (service, controller) = setup().await;
        let id = controller.save().await.unwrap();
        service.delete_note(id).await.unwrap();
        controller.update_title("too late");

        let error = controller.save().await.unwrap_err();

        assert!(matches!(error, Error::NoteNotFound(missing) if missing == id));
        assert_eq!(service.get_note_by_id(id).await.unwrap(), None);
        assert_eq!(controller.state().title, "too late");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn toggle_pin_persists_without_saving_text() {
        let service = DatabaseService::open_in_memory().await.unwrap();
        let id = service.add_note(&Note::new("original", "")).await.unwrap();
        let controller = open(&service, id).await;
        controller.update_title("edited but unsaved");

        controller.toggle_pin().await.unwrap();

        let stored = service.get_note_by_id(id).await.unwrap().unwrap();
        assert!(stored.is_pinned);
        assert_eq!(stored.title, "original");
        assert!(controller.state().is_pinned);
        assert_eq!(controller.state().title, "edited but unsaved");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn toggle_lock_on_unsaved_draft_stays_in_memory() {
        let (service, controller) = setup().await;

        controller.toggle_lock().await.unwrap();

        assert!(controller.state().is_locked);
        assert!(service.observe_notes().borrow().is_empty());

        let id = controller.save().await.unwrap();
        assert!(service.get_note_by_id(id).await.unwrap().unwrap().is_locked);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn toggle_archive_moves_between_shelves() {
        let service = DatabaseService::open_in_memory().await.unwrap();
        let id = service.add_note(&Note::new("old", "")).await.unwrap();
        let controller = open(&service, id).await;

        controller.toggle_archive().await.unwrap();
        let stored = service.get_note_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.status, NoteStatus::Archived);

        controller.toggle_archive().await.unwrap();
        let stored = service.get_note_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.status, NoteStatus::Active);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn delete_is_soft_then_hard() {
        let service = DatabaseService::open_in_memory().await.unwrap();
        let id = service.add_note(&Note::new("doomed", "")).await.unwrap();
        let controller = open(&service, id).await;

        assert_eq!(
            controller.delete_note().await.unwrap(),
            DeleteOutcome::Trashed
        );
        let stored = service.get_note_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.status, NoteStatus::Trashed);

        assert_eq!(
            controller.delete_note().await.unwrap(),
            DeleteOutcome::Deleted
        );
        assert_eq!(service.get_note_by_id(id).await.unwrap(), None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn delete_and_restore_unsaved_draft_are_noops() {
        let (service, controller) = setup().await;
        controller.update_title("never saved");

        assert_eq!(
            controller.delete_note().await.unwrap(),
            DeleteOutcome::Trashed
        );
        controller.restore_note().await.unwrap();

        assert_eq!(controller.state().status, NoteStatus::Active);
        assert!(service.observe_notes().borrow().is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn restore_brings_note_back() {
        let service = DatabaseService::open_in_memory().await.unwrap();
        let id = service.add_note(&Note::new("oops", "")).await.unwrap();
        service.trash_note(id).await.unwrap();
        let controller = open(&service, id).await;
        assert_eq!(controller.state().status, NoteStatus::Trashed);

        controller.restore_note().await.unwrap();

        assert_eq!(controller.state().status, NoteStatus::Active);
        let stored = service.get_note_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.status, NoteStatus::Active);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn undo_changes_reloads_stored_note() {
        let service = DatabaseService::open_in_memory().await.unwrap();
        let id = service.add_note(&Note::new("kept", "body")).await.unwrap();
        let controller = open(&service, id).await;
        controller.update_title("scratch");
        controller.update_content("scratch");

        controller.undo_changes().await.unwrap();

        let state = controller.state();
        assert_eq!(state.title, "kept");
        assert_eq!(state.content, "body");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn undo_changes_on_unsaved_draft_is_noop() {
        let (_service, controller) = setup().await;
        controller.update_title("draft");

        controller.undo_changes().await.unwrap();

        assert_eq!(controller.state().title, "draft");
    }

    /// Store whose writes always fail
    struct OfflineNotes {
        feed: watch::Sender<Vec<Note>>,
        note: Note,
    }

    impl OfflineNotes {
        fn new(note: Note) -> Self {
            Self {
                feed: watch::channel(Vec::new()).0,
                note,
            }
        }
    }

    fn offline() -> Error {
        Error::Database("offline".to_string())
    }

    #[async_trait]
    impl NoteRepository for OfflineNotes {
        fn observe_notes(&self) -> watch::Receiver<Vec<Note>> {
            self.feed.subscribe()
        }
        async fn get_note_by_id(&self, _id: NoteId) -> Result<Option<Note>> {
            Ok(Some(self.note.clone()))
        }
        async fn add_note(&self, _note: &Note) -> Result<NoteId> {
            Err(offline())
        }
        async fn update_note(&self, _note: &Note) -> Result<()> {
            Err(offline())
        }
        async fn update_note_status(&self, _id: NoteId, _flags: NoteFlags) -> Result<()> {
            Err(offline())
        }
        async fn delete_note(&self, _id: NoteId) -> Result<()> {
            Err(offline())
        }
        async fn trash_note(&self, _id: NoteId) -> Result<()> {
            Err(offline())
        }
        async fn restore_note(&self, _id: NoteId) -> Result<()> {
            Err(offline())
        }
        async fn archive_note(&self, _id: NoteId) -> Result<()> {
            Err(offline())
        }
        async fn unarchive_note(&self, _id: NoteId) -> Result<()> {
            Err(offline())
        }
        async fn restore_all_archived(&self) -> Result<usize> {
            Err(offline())
        }
        async fn empty_trash(&self) -> Result<usize> {
            Err(offline())
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn failed_writes_leave_draft_untouched() {
        let service = DatabaseService::open_in_memory().await.unwrap();
        let stored = Note {
            id: NoteId::new(7),
            ..Note::new("stored", "")
        };
        let controller = NoteDetailController::open(
            Arc::new(OfflineNotes::new(stored)),
            Arc::new(service.clone()),
            Some(NoteId::new(7)),
        )
        .await
        .unwrap();
        let before = controller.state();

        assert!(controller.toggle_pin().await.is_err());
        assert!(controller.delete_note().await.is_err());
        assert!(controller.save().await.is_err());

        assert_eq!(controller.state(), before);
    }
}
