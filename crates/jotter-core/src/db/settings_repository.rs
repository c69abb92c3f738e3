//! Preferences persisted in the key/value `settings` table

use crate::error::Result;
use crate::models::{parse_flag, PreferenceChange, Preferences};
use rusqlite::{params, Connection, OptionalExtension};

/// Row access for the `settings` table
pub struct SettingsTable<'a> {
    conn: &'a Connection,
}

impl<'a> SettingsTable<'a> {
    /// Create a new table handle on the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Load preferences, falling back to defaults for missing or unreadable keys
    pub fn load(&self) -> Result<Preferences> {
        let mut preferences = Preferences::default();

        let flags: [(&str, &mut bool); 7] = [
            ("grid_view", &mut preferences.is_grid_view),
            ("true_black", &mut preferences.is_true_black),
            ("dynamic_color", &mut preferences.is_dynamic_color),
            ("default_open_in_edit", &mut preferences.default_open_in_edit),
            ("haptic", &mut preferences.is_haptic_enabled),
            ("biometric", &mut preferences.is_biometric_enabled),
            ("secure_mode", &mut preferences.is_secure_mode),
        ];
        for (key, slot) in flags {
            if let Some(value) = self.get_setting(key)? {
                match parse_flag(&value) {
                    Some(flag) => *slot = flag,
                    None => tracing::warn!("Ignoring unreadable setting {key}={value}"),
                }
            }
        }

        if let Some(value) = self.get_setting("theme")? {
            preferences.theme = value.parse().unwrap_or_default();
        }

        Ok(preferences)
    }

    /// Persist a single preference
    pub fn apply(&self, change: PreferenceChange) -> Result<()> {
        self.set_setting(change.key(), &change.value())
    }

    /// Remove every stored preference so the defaults apply again
    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM settings", [])?;
        Ok(())
    }

    fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}
