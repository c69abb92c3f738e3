//! Note and category tables

use crate::error::Result;
use crate::models::{Category, Note, NoteFlags, NoteId, NoteStatus};
use crate::util::now_millis;
use rusqlite::{params, Connection, OptionalExtension};

const NOTE_COLUMNS: &str =
    "id, title, content, category, isPinned, isLocked, isArchived, isTrashed, updatedTime";

/// `updatedTime` never moves backwards and always advances on write
const TOUCH_UPDATED_TIME: &str = "updatedTime = MAX(?1, updatedTime + 1)";

/// Row access for the `notes` table
pub struct NoteTable<'a> {
    conn: &'a Connection,
}

impl<'a> NoteTable<'a> {
    /// Create a new table handle on the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Parse a note from a database row
    fn parse_note(row: &rusqlite::Row<'_>) -> rusqlite::Result<Note> {
        Ok(Note {
            id: NoteId::new(row.get(0)?),
            title: row.get(1)?,
            content: row.get(2)?,
            category: row.get(3)?,
            is_pinned: row.get(4)?,
            is_locked: row.get(5)?,
            status: NoteStatus::from_columns(row.get(6)?, row.get(7)?),
            updated_time: row.get(8)?,
        })
    }

    /// Insert a note, ignoring its id, and return the assigned id
    pub fn insert(&self, note: &Note) -> Result<NoteId> {
        let (is_archived, is_trashed) = note.status.to_columns();
        self.conn.execute(
            "INSERT INTO notes (title, content, category, isPinned, isLocked, isArchived, isTrashed, updatedTime)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                note.title,
                note.content,
                note.category,
                note.is_pinned,
                note.is_locked,
                is_archived,
                is_trashed,
                now_millis(),
            ],
        )?;
        Ok(NoteId::new(self.conn.last_insert_rowid()))
    }

    /// Get a note by id
    pub fn get(&self, id: NoteId) -> Result<Option<Note>> {
        let note = self
            .conn
            .query_row(
                &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1"),
                params![id.get()],
                Self::parse_note,
            )
            .optional()?;
        Ok(note)
    }

    /// Every note, most recently updated first
    pub fn list_all(&self) -> Result<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes ORDER BY updatedTime DESC, id DESC"
        ))?;

        let notes = stmt
            .query_map([], Self::parse_note)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(notes)
    }

    /// Overwrite every editable column of an existing note.
    ///
    /// Returns whether a row matched.
    pub fn update(&self, note: &Note) -> Result<bool> {
        let (is_archived, is_trashed) = note.status.to_columns();
        let rows = self.conn.execute(
            &format!(
                "UPDATE notes SET title = ?2, content = ?3, category = ?4, isPinned = ?5,
                 isLocked = ?6, isArchived = ?7, isTrashed = ?8, {TOUCH_UPDATED_TIME}
                 WHERE id = ?9"
            ),
            params![
                now_millis(),
                note.title,
                note.content,
                note.category,
                note.is_pinned,
                note.is_locked,
                is_archived,
                is_trashed,
                note.id.get(),
            ],
        )?;
        Ok(rows > 0)
    }

    /// Write only the status columns of a note
    pub fn update_status(&self, id: NoteId, flags: NoteFlags) -> Result<bool> {
        let (is_archived, is_trashed) = flags.status.to_columns();
        let rows = self.conn.execute(
            &format!(
                "UPDATE notes SET isPinned = ?2, isLocked = ?3, isArchived = ?4, isTrashed = ?5,
                 {TOUCH_UPDATED_TIME}
                 WHERE id = ?6"
            ),
            params![
                now_millis(),
                flags.is_pinned,
                flags.is_locked,
                is_archived,
                is_trashed,
                id.get()
            ],
        )?;
        Ok(rows > 0)
    }

    /// Soft delete: move a note into the trash
    pub fn trash(&self, id: NoteId) -> Result<bool> {
        self.set_status_where(id, NoteStatus::Trashed, "isTrashed = 0")
    }

    /// Take a note out of the trash
    pub fn restore(&self, id: NoteId) -> Result<bool> {
        self.set_status_where(id, NoteStatus::Active, "isTrashed = 1")
    }

    /// Move an active note into the archive
    pub fn archive(&self, id: NoteId) -> Result<bool> {
        self.set_status_where(id, NoteStatus::Archived, "isArchived = 0 AND isTrashed = 0")
    }

    /// Move an archived note back to the home shelf
    pub fn unarchive(&self, id: NoteId) -> Result<bool> {
        self.set_status_where(id, NoteStatus::Active, "isArchived = 1 AND isTrashed = 0")
    }

    /// Guarded status transition; a repeated call matches no row and is a no-op
    fn set_status_where(&self, id: NoteId, status: NoteStatus, guard: &str) -> Result<bool> {
        let (is_archived, is_trashed) = status.to_columns();
        let rows = self.conn.execute(
            &format!(
                "UPDATE notes SET isArchived = ?2, isTrashed = ?3, {TOUCH_UPDATED_TIME}
                 WHERE id = ?4 AND {guard}"
            ),
            params![now_millis(), is_archived, is_trashed, id.get()],
        )?;
        Ok(rows > 0)
    }

    /// Hard delete: remove the row permanently
    pub fn delete(&self, id: NoteId) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1", params![id.get()])?;
        Ok(rows > 0)
    }

    /// Move every archived note back to the home shelf, returning how many moved
    pub fn unarchive_all(&self) -> Result<usize> {
        let rows = self.conn.execute(
            &format!(
                "UPDATE notes SET isArchived = 0, {TOUCH_UPDATED_TIME}
                 WHERE isArchived = 1 AND isTrashed = 0"
            ),
            params![now_millis()],
        )?;
        Ok(rows)
    }

    /// Hard delete every note in the trash, returning how many were removed.
    ///
    /// Rows that are also archived are not in the trash and are kept.
    pub fn delete_trashed(&self) -> Result<usize> {
        let rows = self
            .conn
            .execute("DELETE FROM notes WHERE isTrashed = 1 AND isArchived = 0", [])?;
        Ok(rows)
    }

    /// Uncategorize every note filed under `name`
    pub fn clear_category(&self, name: &str) -> Result<usize> {
        let rows = self.conn.execute(
            "UPDATE notes SET category = '' WHERE category = ?1",
            params![name],
        )?;
        Ok(rows)
    }
}

/// Row access for the `categories` table
pub struct CategoryTable<'a> {
    conn: &'a Connection,
}

impl<'a> CategoryTable<'a> {
    /// Create a new table handle on the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// All categories alphabetically. The empty name is never returned.
    pub fn list(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM categories WHERE name != '' ORDER BY name ASC")?;

        let categories = stmt
            .query_map([], |row| Ok(Category::new(row.get::<_, String>(0)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(categories)
    }

    /// Insert a category; an existing name is left alone.
    ///
    /// Returns whether a row was added.
    pub fn insert(&self, name: &str) -> Result<bool> {
        let rows = self.conn.execute(
            "INSERT OR IGNORE INTO categories (name) VALUES (?1)",
            params![name],
        )?;
        Ok(rows > 0)
    }

    /// Delete a category by name. Returns whether a row was removed.
    pub fn delete(&self, name: &str) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM categories WHERE name = ?1", params![name])?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use pretty_assertions::assert_eq;

    fn setup() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let db = setup();
        let table = NoteTable::new(db.connection());

        let note = Note::new("Groceries", "milk, eggs").with_category("Home");
        let id = table.insert(&note).unwrap();
        assert!(!id.is_unsaved());

        let fetched = table.get(id).unwrap().unwrap();
        assert_eq!(fetched.id, id);
        assert_eq!(fetched.title, "Groceries");
        assert_eq!(fetched.content, "milk, eggs");
        assert_eq!(fetched.category, "Home");
        assert_eq!(fetched.status, NoteStatus::Active);
    }

    #[test]
    fn test_get_missing_is_none() {
        let db = setup();
        let table = NoteTable::new(db.connection());
        assert!(table.get(NoteId::new(99)).unwrap().is_none());
        assert!(table.get(NoteId::UNSAVED).unwrap().is_none());
    }

    #[test]
    fn test_update_advances_updated_time() {
        let db = setup();
        let table = NoteTable::new(db.connection());

        let id = table.insert(&Note::new("a", "b")).unwrap();
        let before = table.get(id).unwrap().unwrap();

        let mut edited = before.clone();
        edited.content = "changed".into();
        assert!(table.update(&edited).unwrap());

        let after = table.get(id).unwrap().unwrap();
        assert_eq!(after.content, "changed");
        assert!(after.updated_time > before.updated_time);
    }

    #[test]
    fn test_update_missing_row_is_noop() {
        let db = setup();
        let table = NoteTable::new(db.connection());
        let mut ghost = Note::new("ghost", "");
        ghost.id = NoteId::new(7);
        assert!(!table.update(&ghost).unwrap());
    }

    #[test]
    fn test_status_update_keeps_text() {
        let db = setup();
        let table = NoteTable::new(db.connection());
        let id = table.insert(&Note::new("keep", "me")).unwrap();

        let flags = NoteFlags {
            is_pinned: true,
            is_locked: true,
            status: NoteStatus::Active,
        };
        assert!(table.update_status(id, flags).unwrap());

        let note = table.get(id).unwrap().unwrap();
        assert_eq!(note.flags(), flags);
        assert_eq!(note.title, "keep");
    }

    #[test]
    fn test_trash_restore_are_idempotent() {
        let db = setup();
        let table = NoteTable::new(db.connection());
        let id = table.insert(&Note::new("t", "")).unwrap();

        assert!(table.trash(id).unwrap());
        assert!(!table.trash(id).unwrap());
        assert_eq!(table.get(id).unwrap().unwrap().status, NoteStatus::Trashed);

        assert!(table.restore(id).unwrap());
        assert!(!table.restore(id).unwrap());
        assert_eq!(table.get(id).unwrap().unwrap().status, NoteStatus::Active);
    }

    #[test]
    fn test_trashing_archived_note_leaves_archive() {
        let db = setup();
        let table = NoteTable::new(db.connection());
        let id = table.insert(&Note::new("a", "")).unwrap();

        assert!(table.archive(id).unwrap());
        assert!(table.trash(id).unwrap());

        let (is_archived, is_trashed): (bool, bool) = db
            .connection()
            .query_row(
                "SELECT isArchived, isTrashed FROM notes WHERE id = ?1",
                [id.get()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert!(!is_archived);
        assert!(is_trashed);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let db = setup();
        let table = NoteTable::new(db.connection());
        assert!(!table.delete(NoteId::UNSAVED).unwrap());
    }

    #[test]
    fn test_bulk_operations() {
        let db = setup();
        let table = NoteTable::new(db.connection());
        let archived = table.insert(&Note::new("archived", "")).unwrap();
        let trashed = table.insert(&Note::new("trashed", "")).unwrap();
        let active = table.insert(&Note::new("active", "")).unwrap();
        table.archive(archived).unwrap();
        table.trash(trashed).unwrap();

        assert_eq!(table.unarchive_all().unwrap(), 1);
        assert_eq!(table.delete_trashed().unwrap(), 1);

        let ids: Vec<NoteId> = table.list_all().unwrap().iter().map(|n| n.id).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&archived));
        assert!(ids.contains(&active));
        assert!(table.get(trashed).unwrap().is_none());
    }

    #[test]
    fn test_bulk_operations_skip_archived_trashed_rows() {
        let db = setup();
        db.connection()
            .execute(
                "INSERT INTO notes (title, content, category, isPinned, isLocked, isArchived, isTrashed, updatedTime)
                 VALUES ('both', '', '', 0, 0, 1, 1, 1)",
                [],
            )
            .unwrap();
        let table = NoteTable::new(db.connection());

        assert_eq!(table.delete_trashed().unwrap(), 0);
        assert_eq!(table.unarchive_all().unwrap(), 0);

        let notes = table.list_all().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].status, NoteStatus::ArchivedTrashed);
    }

    #[test]
    fn test_category_insert_is_idempotent() {
        let db = setup();
        let table = CategoryTable::new(db.connection());

        assert!(table.insert("Work").unwrap());
        assert!(!table.insert("Work").unwrap());

        assert_eq!(table.list().unwrap(), vec![Category::new("Work")]);
    }

    #[test]
    fn test_category_list_hides_empty_name_and_sorts() {
        let db = setup();
        let table = CategoryTable::new(db.connection());
        table.insert("Work").unwrap();
        table.insert("").unwrap();
        table.insert("Errands").unwrap();

        let names: Vec<String> = table.list().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Errands".to_string(), "Work".to_string()]);
    }

    #[test]
    fn test_category_delete_is_idempotent() {
        let db = setup();
        let table = CategoryTable::new(db.connection());
        table.insert("Work").unwrap();

        assert!(table.delete("Work").unwrap());
        assert!(!table.delete("Work").unwrap());
        assert!(table.list().unwrap().is_empty());
    }
}
