//! Note model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Row identifier of a persisted note.
///
/// Identifiers are assigned by the store on first insert. [`NoteId::UNSAVED`]
/// stands in for a draft that has never been written; every store operation
/// keyed by id treats it as a row that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    /// Sentinel id for a note that was never persisted
    pub const UNSAVED: Self = Self(0);

    /// Wrap a raw row id
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw row id
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Whether this id can refer to a stored row
    #[must_use]
    pub const fn is_unsaved(self) -> bool {
        self.0 <= 0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Where a note sits in its lifecycle.
///
/// Pinned and locked are modifiers carried next to the status, not states of
/// their own. Trashing an archived note takes it out of the archive, and
/// restoring from the trash always lands on [`NoteStatus::Active`]. Rows that
/// still carry both columns decode to [`NoteStatus::ArchivedTrashed`], which
/// neither the archive nor the trash lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteStatus {
    /// Visible on the home shelf
    #[default]
    Active,
    /// Hidden from home, listed in the archive
    Archived,
    /// Soft-deleted, listed in the trash
    Trashed,
    /// Both status columns set; listed on no shelf
    #[serde(rename = "archived_trashed")]
    ArchivedTrashed,
}

impl NoteStatus {
    /// Decode the two persisted status columns
    #[must_use]
    pub const fn from_columns(is_archived: bool, is_trashed: bool) -> Self {
        match (is_archived, is_trashed) {
            (true, true) => Self::ArchivedTrashed,
            (false, true) => Self::Trashed,
            (true, false) => Self::Archived,
            (false, false) => Self::Active,
        }
    }

    /// Encode as the `(isArchived, isTrashed)` column pair
    #[must_use]
    pub const fn to_columns(self) -> (bool, bool) {
        match self {
            Self::Active => (false, false),
            Self::Archived => (true, false),
            Self::Trashed => (false, true),
            Self::ArchivedTrashed => (true, true),
        }
    }

    /// Whether the archived column is set
    #[must_use]
    pub const fn is_archived(self) -> bool {
        matches!(self, Self::Archived | Self::ArchivedTrashed)
    }

    /// Whether the trashed column is set; deleting such a note is permanent
    #[must_use]
    pub const fn is_trashed(self) -> bool {
        matches!(self, Self::Trashed | Self::ArchivedTrashed)
    }
}

/// Status fields persisted without touching a note's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NoteFlags {
    pub is_pinned: bool,
    pub is_locked: bool,
    pub status: NoteStatus,
}

/// A note in the system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Row id, [`NoteId::UNSAVED`] until first insert
    pub id: NoteId,
    pub title: String,
    pub content: String,
    /// Category name, empty when uncategorized
    pub category: String,
    pub is_pinned: bool,
    pub is_locked: bool,
    pub status: NoteStatus,
    /// Last persist timestamp (Unix ms)
    pub updated_time: i64,
}

impl Default for Note {
    fn default() -> Self {
        Self {
            id: NoteId::UNSAVED,
            title: String::new(),
            content: String::new(),
            category: String::new(),
            is_pinned: false,
            is_locked: false,
            status: NoteStatus::Active,
            updated_time: chrono::Utc::now().timestamp_millis(),
        }
    }
}

impl Note {
    /// Create an unsaved note with the given title and content
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    /// Set the category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Whether the note carries a non-blank category
    #[must_use]
    pub fn has_category(&self) -> bool {
        !self.category.trim().is_empty()
    }

    /// The status modifiers and lifecycle status of this note
    #[must_use]
    pub const fn flags(&self) -> NoteFlags {
        NoteFlags {
            is_pinned: self.is_pinned,
            is_locked: self.is_locked,
            status: self.status,
        }
    }

    /// Get first line of the title (or content when untitled), truncated to `max_len` characters
    #[must_use]
    pub fn title_preview(&self, max_len: usize) -> String {
        let source = if self.title.trim().is_empty() {
            &self.content
        } else {
            &self.title
        };
        source
            .lines()
            .next()
            .unwrap_or("")
            .chars()
            .take(max_len)
            .collect()
    }
}
