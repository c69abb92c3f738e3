//! Data models for Jotter

mod category;
mod note;
mod preferences;

pub use category::{category_names, Category};
pub use note::{Note, NoteFlags, NoteId, NoteStatus};
pub use preferences::{parse_flag, PreferenceChange, Preferences, ThemeMode, PREFERENCE_KEYS};
