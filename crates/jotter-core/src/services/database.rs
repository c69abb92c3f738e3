//! Shared database service implementing the store contracts.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::watch;

use crate::db::{CategoryTable, Database, NoteTable, SettingsTable};
use crate::models::{Category, Note, NoteFlags, NoteId, PreferenceChange, Preferences};
use crate::store::{CategoryRepository, NoteRepository, PreferencesRepository};
use crate::{Error, Result};

/// Thread-safe service for DB and repository operations.
///
/// Every statement runs on Tokio's blocking pool behind one connection lock,
/// so writes to the same row are serialized and async callers never block.
/// After a write the affected table is re-read and published while the lock
/// is still held, which keeps the live feeds in write order.
#[derive(Clone)]
pub struct DatabaseService {
    db: Arc<Mutex<Database>>,
    feeds: Arc<Feeds>,
}

/// Latest materialized contents of each observable table
struct Feeds {
    notes: watch::Sender<Vec<Note>>,
    categories: watch::Sender<Vec<Category>>,
    preferences: watch::Sender<Preferences>,
}

impl Feeds {
    fn load(db: &Database) -> Result<Self> {
        let conn = db.connection();
        Ok(Self {
            notes: watch::channel(NoteTable::new(conn).list_all()?).0,
            categories: watch::channel(CategoryTable::new(conn).list()?).0,
            preferences: watch::channel(SettingsTable::new(conn).load()?).0,
        })
    }

    fn publish_notes(&self, db: &Database) -> Result<()> {
        let notes = NoteTable::new(db.connection()).list_all()?;
        publish(&self.notes, notes);
        Ok(())
    }

    fn publish_categories(&self, db: &Database) -> Result<()> {
        let categories = CategoryTable::new(db.connection()).list()?;
        publish(&self.categories, categories);
        Ok(())
    }

    fn publish_preferences(&self, db: &Database) -> Result<()> {
        let preferences = SettingsTable::new(db.connection()).load()?;
        publish(&self.preferences, preferences);
        Ok(())
    }
}

/// Replace the feed value, notifying observers only when it differs
fn publish<T: PartialEq>(feed: &watch::Sender<T>, value: T) {
    feed.send_if_modified(|current| {
        if *current == value {
            false
        } else {
            *current = value;
            true
        }
    });
}

impl DatabaseService {
    /// Open a database service at the given filesystem path.
    pub async fn open_path(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        tokio::task::spawn_blocking(move || {
            tracing::info!("Opening note database at {}", db_path.display());
            Self::from_database(Database::open(&db_path)?)
        })
        .await?
    }

    /// Open an in-memory database service (primarily for tests).
    pub async fn open_in_memory() -> Result<Self> {
        tokio::task::spawn_blocking(|| Self::from_database(Database::open_in_memory()?)).await?
    }

    fn from_database(db: Database) -> Result<Self> {
        let feeds = Feeds::load(&db)?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            feeds: Arc::new(feeds),
        })
    }

    /// Run `op` against the locked connection on the blocking pool.
    async fn run<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Database, &Feeds) -> Result<T> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        let feeds = Arc::clone(&self.feeds);
        tokio::task::spawn_blocking(move || {
            let guard = db
                .lock()
                .map_err(|_| Error::Database("database lock poisoned".to_string()))?;
            op(&guard, &feeds)
        })
        .await?
    }

    /// Apply a guarded single-note write and publish the notes feed if it matched
    async fn write_note<F>(&self, id: NoteId, action: &'static str, op: F) -> Result<()>
    where
        F: FnOnce(&NoteTable<'_>) -> Result<bool> + Send + 'static,
    {
        self.run(move |db, feeds| {
            let changed = op(&NoteTable::new(db.connection()))?;
            if changed {
                feeds.publish_notes(db)?;
            }
            tracing::debug!(note_id = %id, changed, "{action}");
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl CategoryRepository for DatabaseService {
    fn get_all_categories(&self) -> watch::Receiver<Vec<Category>> {
        self.feeds.categories.subscribe()
    }

    async fn insert_category(&self, name: &str) -> Result<()> {
        let name = name.to_owned();
        self.run(move |db, feeds| {
            if CategoryTable::new(db.connection()).insert(&name)? {
                tracing::debug!(category = %name, "Inserted category");
                feeds.publish_categories(db)?;
            }
            Ok(())
        })
        .await
    }

    async fn delete_category_by_name(&self, name: &str) -> Result<()> {
        let name = name.to_owned();
        self.run(move |db, feeds| {
            let tx = db.connection().unchecked_transaction()?;
            let removed = CategoryTable::new(&tx).delete(&name)?;
            let uncategorized = NoteTable::new(&tx).clear_category(&name)?;
            tx.commit()?;

            if removed {
                feeds.publish_categories(db)?;
            }
            if uncategorized > 0 {
                feeds.publish_notes(db)?;
            }
            tracing::debug!(category = %name, removed, uncategorized, "Deleted category");
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl NoteRepository for DatabaseService {
    fn observe_notes(&self) -> watch::Receiver<Vec<Note>> {
        self.feeds.notes.subscribe()
    }

    async fn get_note_by_id(&self, id: NoteId) -> Result<Option<Note>> {
        self.run(move |db, _| NoteTable::new(db.connection()).get(id))
            .await
    }

    async fn add_note(&self, note: &Note) -> Result<NoteId> {
        let note = note.clone();
        self.run(move |db, feeds| {
            let id = NoteTable::new(db.connection()).insert(&note)?;
            feeds.publish_notes(db)?;
            tracing::debug!(note_id = %id, "Inserted note");
            Ok(id)
        })
        .await
    }

    async fn update_note(&self, note: &Note) -> Result<()> {
        let note = note.clone();
        self.write_note(note.id, "Updated note", move |table| table.update(&note))
            .await
    }

    async fn update_note_status(&self, id: NoteId, flags: NoteFlags) -> Result<()> {
        self.write_note(id, "Updated note status", move |table| {
            table.update_status(id, flags)
        })
        .await
    }

    async fn delete_note(&self, id: NoteId) -> Result<()> {
        self.write_note(id, "Deleted note", move |table| table.delete(id))
            .await
    }

    async fn trash_note(&self, id: NoteId) -> Result<()> {
        self.write_note(id, "Trashed note", move |table| table.trash(id))
            .await
    }

    async fn restore_note(&self, id: NoteId) -> Result<()> {
        self.write_note(id, "Restored note", move |table| table.restore(id))
            .await
    }

    async fn archive_note(&self, id: NoteId) -> Result<()> {
        self.write_note(id, "Archived note", move |table| table.archive(id))
            .await
    }

    async fn unarchive_note(&self, id: NoteId) -> Result<()> {
        self.write_note(id, "Unarchived note", move |table| table.unarchive(id))
            .await
    }

    async fn restore_all_archived(&self) -> Result<usize> {
        self.run(|db, feeds| {
            let restored = NoteTable::new(db.connection()).unarchive_all()?;
            if restored > 0 {
                feeds.publish_notes(db)?;
            }
            tracing::info!(restored, "Restored archived notes");
            Ok(restored)
        })
        .await
    }

    async fn empty_trash(&self) -> Result<usize> {
        self.run(|db, feeds| {
            let removed = NoteTable::new(db.connection()).delete_trashed()?;
            if removed > 0 {
                feeds.publish_notes(db)?;
            }
            tracing::info!(removed, "Emptied trash");
            Ok(removed)
        })
        .await
    }
}

#[async_trait]
impl PreferencesRepository for DatabaseService {
    fn observe(&self) -> watch::Receiver<Preferences> {
        self.feeds.preferences.subscribe()
    }

    async fn set(&self, change: PreferenceChange) -> Result<()> {
        self.run(move |db, feeds| {
            SettingsTable::new(db.connection()).apply(change)?;
            feeds.publish_preferences(db)?;
            tracing::debug!(key = change.key(), "Saved preference");
            Ok(())
        })
        .await
    }

    async fn clear_all(&self) -> Result<()> {
        self.run(|db, feeds| {
            SettingsTable::new(db.connection()).clear()?;
            feeds.publish_preferences(db)?;
            tracing::info!("Cleared all preferences");
            Ok(())
        })
        .await
    }
}
