//! User preferences model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Theme mode options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light theme
    Light,
    /// Dark theme
    Dark,
    /// Follow system preference
    #[default]
    System,
}

impl ThemeMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            other => Err(Error::InvalidInput(format!("unknown theme '{other}'"))),
        }
    }
}

/// Application-wide preferences shared by every screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Lay note lists out as a grid instead of a single column
    pub is_grid_view: bool,
    pub theme: ThemeMode,
    /// Pure black backgrounds in dark mode
    pub is_true_black: bool,
    pub is_dynamic_color: bool,
    /// Open notes in edit mode instead of read mode
    pub default_open_in_edit: bool,
    pub is_haptic_enabled: bool,
    /// Stored and surfaced only; nothing in the data layer enforces it
    pub is_biometric_enabled: bool,
    /// Hide screen contents from screenshots and the app switcher
    pub is_secure_mode: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            is_grid_view: true,
            theme: ThemeMode::System,
            is_true_black: false,
            is_dynamic_color: true,
            default_open_in_edit: false,
            is_haptic_enabled: true,
            is_biometric_enabled: false,
            is_secure_mode: false,
        }
    }
}

impl Preferences {
    /// Every field as a change, in [`PREFERENCE_KEYS`] order
    #[must_use]
    pub const fn as_changes(&self) -> [PreferenceChange; 8] {
        [
            PreferenceChange::GridView(self.is_grid_view),
            PreferenceChange::Theme(self.theme),
            PreferenceChange::TrueBlack(self.is_true_black),
            PreferenceChange::DynamicColor(self.is_dynamic_color),
            PreferenceChange::DefaultOpenInEdit(self.default_open_in_edit),
            PreferenceChange::Haptic(self.is_haptic_enabled),
            PreferenceChange::Biometric(self.is_biometric_enabled),
            PreferenceChange::SecureMode(self.is_secure_mode),
        ]
    }
}

/// A single-field preference write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceChange {
    GridView(bool),
    Theme(ThemeMode),
    TrueBlack(bool),
    DynamicColor(bool),
    DefaultOpenInEdit(bool),
    Haptic(bool),
    Biometric(bool),
    SecureMode(bool),
}

/// Keys accepted by [`PreferenceChange::parse`], in storage order
pub const PREFERENCE_KEYS: [&str; 8] = [
    "grid_view",
    "theme",
    "true_black",
    "dynamic_color",
    "default_open_in_edit",
    "haptic",
    "biometric",
    "secure_mode",
];

impl PreferenceChange {
    /// Storage key in the settings table
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::GridView(_) => "grid_view",
            Self::Theme(_) => "theme",
            Self::TrueBlack(_) => "true_black",
            Self::DynamicColor(_) => "dynamic_color",
            Self::DefaultOpenInEdit(_) => "default_open_in_edit",
            Self::Haptic(_) => "haptic",
            Self::Biometric(_) => "biometric",
            Self::SecureMode(_) => "secure_mode",
        }
    }

    /// Stored value in the settings table
    #[must_use]
    pub fn value(self) -> String {
        match self {
            Self::Theme(theme) => theme.as_str().to_string(),
            Self::GridView(value)
            | Self::TrueBlack(value)
            | Self::DynamicColor(value)
            | Self::DefaultOpenInEdit(value)
            | Self::Haptic(value)
            | Self::Biometric(value)
            | Self::SecureMode(value) => value.to_string(),
        }
    }

    /// Write this change into a preferences record
    pub fn apply(self, preferences: &mut Preferences) {
        match self {
            Self::GridView(value) => preferences.is_grid_view = value,
            Self::Theme(theme) => preferences.theme = theme,
            Self::TrueBlack(value) => preferences.is_true_black = value,
            Self::DynamicColor(value) => preferences.is_dynamic_color = value,
            Self::DefaultOpenInEdit(value) => preferences.default_open_in_edit = value,
            Self::Haptic(value) => preferences.is_haptic_enabled = value,
            Self::Biometric(value) => preferences.is_biometric_enabled = value,
            Self::SecureMode(value) => preferences.is_secure_mode = value,
        }
    }

    /// Build a change from a storage key and a textual value
    pub fn parse(key: &str, value: &str) -> Result<Self, Error> {
        let flag = || {
            parse_flag(value)
                .ok_or_else(|| Error::InvalidInput(format!("'{value}' is not a boolean for {key}")))
        };

        match key.trim() {
            "grid_view" => Ok(Self::GridView(flag()?)),
            "theme" => Ok(Self::Theme(value.parse()?)),
            "true_black" => Ok(Self::TrueBlack(flag()?)),
            "dynamic_color" => Ok(Self::DynamicColor(flag()?)),
            "default_open_in_edit" => Ok(Self::DefaultOpenInEdit(flag()?)),
            "haptic" => Ok(Self::Haptic(flag()?)),
            "biometric" => Ok(Self::Biometric(flag()?)),
            "secure_mode" => Ok(Self::SecureMode(flag()?)),
            other => Err(Error::InvalidInput(format!(
                "unknown preference '{other}' (expected one of: {})",
                PREFERENCE_KEYS.join(", ")
            ))),
        }
    }
}

/// Parse the boolean spellings accepted in the settings table
#[must_use]
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
