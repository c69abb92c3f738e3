//! Database migrations

use crate::error::Result;
use rusqlite::{Connection, OptionalExtension};

/// Current schema version
const CURRENT_VERSION: i32 = 2;

/// Run all pending migrations
pub fn run(conn: &Connection) -> Result<()> {
    let version = get_version(conn)?;

    if version < 1 {
        apply(conn, 1, &V1_STATEMENTS)?;
    }
    if version < 2 {
        apply(conn, 2, &V2_STATEMENTS)?;
    }

    Ok(())
}

/// Get the current schema version
fn get_version(conn: &Connection) -> Result<i32> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .optional()?;

    Ok(version.unwrap_or(0))
}

/// Version 1: notes and local settings
const V1_STATEMENTS: [&str; 4] = [
    "CREATE TABLE IF NOT EXISTS schema_version (
        version INTEGER PRIMARY KEY
    )",
    "CREATE TABLE IF NOT EXISTS notes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL DEFAULT '',
        content TEXT NOT NULL DEFAULT '',
        category TEXT NOT NULL DEFAULT '',
        isPinned BOOLEAN NOT NULL DEFAULT 0,
        isLocked BOOLEAN NOT NULL DEFAULT 0,
        isArchived BOOLEAN NOT NULL DEFAULT 0,
        isTrashed BOOLEAN NOT NULL DEFAULT 0,
        updatedTime INTEGER NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_notes_updated ON notes(updatedTime DESC)",
    "CREATE TABLE IF NOT EXISTS settings (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    )",
];

/// Version 2: categories
const V2_STATEMENTS: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS categories (
        name TEXT PRIMARY KEY NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_notes_category ON notes(category)",
    // Backfill from notes that already carry a category
    "INSERT OR IGNORE INTO categories (name)
        SELECT DISTINCT category FROM notes WHERE category != ''",
];

/// Apply one migration step atomically and record its version
fn apply(conn: &Connection, version: i32, statements: &[&str]) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    for stmt in statements {
        tx.execute(stmt, [])?;
    }
    tx.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    tx.commit()?;

    tracing::info!("Migrated database to version {version} (latest {CURRENT_VERSION})");
    Ok(())
}
