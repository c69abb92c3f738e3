//! Settings screen.

use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::models::{PreferenceChange, Preferences, ThemeMode};
use crate::reactive::{SharedProjection, Subscription};
use crate::store::PreferencesRepository;

/// Snapshot rendered by the settings screen.
///
/// `is_loading` stays true until the first preferences value has been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsState {
    pub is_loading: bool,
    pub theme: ThemeMode,
    pub is_true_black: bool,
    pub is_dynamic_color: bool,
    pub default_open_in_edit: bool,
    pub is_haptic_enabled: bool,
    pub is_biometric_enabled: bool,
    pub is_secure_mode: bool,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self::loaded(&Preferences::default(), true)
    }
}

impl SettingsState {
    const fn loaded(preferences: &Preferences, is_loading: bool) -> Self {
        Self {
            is_loading,
            theme: preferences.theme,
            is_true_black: preferences.is_true_black,
            is_dynamic_color: preferences.is_dynamic_color,
            default_open_in_edit: preferences.default_open_in_edit,
            is_haptic_enabled: preferences.is_haptic_enabled,
            is_biometric_enabled: preferences.is_biometric_enabled,
            is_secure_mode: preferences.is_secure_mode,
        }
    }
}

impl From<&Preferences> for SettingsState {
    fn from(preferences: &Preferences) -> Self {
        Self::loaded(preferences, false)
    }
}

pub struct SettingsController {
    preferences: Arc<dyn PreferencesRepository>,
    projection: SharedProjection<SettingsState>,
}

impl SettingsController {
    pub fn new(preferences: Arc<dyn PreferencesRepository>, idle_grace: Duration) -> Self {
        let projection = SharedProjection::map(
            preferences.observe(),
            SettingsState::default(),
            idle_grace,
            |preferences: &Preferences| SettingsState::from(preferences),
        );
        Self {
            preferences,
            projection,
        }
    }

    pub fn subscribe(&self) -> Subscription<SettingsState> {
        self.projection.subscribe()
    }

    /// Current settings read straight from the store
    pub fn snapshot(&self) -> SettingsState {
        SettingsState::from(&self.preferences.load())
    }

    pub async fn update_theme(&self, theme: ThemeMode) -> Result<()> {
        self.write(PreferenceChange::Theme(theme)).await
    }

    pub async fn update_true_black(&self, enabled: bool) -> Result<()> {
        self.write(PreferenceChange::TrueBlack(enabled)).await
    }

    pub async fn update_dynamic_color(&self, enabled: bool) -> Result<()> {
        self.write(PreferenceChange::DynamicColor(enabled)).await
    }

    pub async fn update_default_open_in_edit(&self, enabled: bool) -> Result<()> {
        self.write(PreferenceChange::DefaultOpenInEdit(enabled))
            .await
    }

    pub async fn update_haptic(&self, enabled: bool) -> Result<()> {
        self.write(PreferenceChange::Haptic(enabled)).await
    }

    /// Stored for the front end to enforce; the data layer never checks it
    pub async fn update_biometric(&self, enabled: bool) -> Result<()> {
        self.write(PreferenceChange::Biometric(enabled)).await
    }

    pub async fn update_secure_mode(&self, enabled: bool) -> Result<()> {
        self.write(PreferenceChange::SecureMode(enabled)).await
    }

    /// Apply any single-field change
    pub async fn apply(&self, change: PreferenceChange) -> Result<()> {
        self.write(change).await
    }

    /// Reset every preference to its default. Notes are kept.
    pub async fn clear_all_data(&self) -> Result<()> {
        self.preferences
            .clear_all()
            .await
            .inspect_err(|error| tracing::error!("Failed to clear preferences: {}", error))
    }

    async fn write(&self, change: PreferenceChange) -> Result<()> {
        self.preferences.set(change).await.inspect_err(|error| {
            tracing::error!("Failed to save preference {}: {}", change.key(), error);
        })
    }
}
