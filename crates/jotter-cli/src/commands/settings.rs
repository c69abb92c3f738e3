use std::sync::Arc;

use jotter_core::controllers::SettingsController;
use jotter_core::models::{PreferenceChange, Preferences};

use crate::cli::SettingsCommands;
use crate::commands::common::{confirm_action, Context};
use crate::error::CliError;

pub async fn run_settings(
    command: Option<SettingsCommands>,
    context: &Context,
) -> Result<(), CliError> {
    let session = context.open().await?;
    let preferences = Arc::clone(&session.repositories.preferences);
    let settings = SettingsController::new(Arc::clone(&preferences), session.idle_grace);

    match command.unwrap_or(SettingsCommands::Show) {
        SettingsCommands::Show => {
            for line in format_preference_lines(&preferences.load()) {
                println!("{line}");
            }
        }
        SettingsCommands::Set { key, value } => {
            let change = PreferenceChange::parse(&key, &value)?;
            settings.apply(change).await?;
            println!("{} = {}", change.key(), change.value());
        }
        SettingsCommands::Clear { yes } => {
            if confirm_action("Reset every preference to its default?", yes, "reset preferences")? {
                settings.clear_all_data().await?;
                println!("Preferences reset");
            } else {
                println!("Cancelled");
            }
        }
    }
    Ok(())
}

pub fn format_preference_lines(preferences: &Preferences) -> Vec<String> {
    preferences
        .as_changes()
        .iter()
        .map(|change| format!("{:<22}{}", change.key(), change.value()))
        .collect()
}
