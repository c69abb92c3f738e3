//! Jotter CLI - keep short notes from the terminal
//!
//! Quick capture, filtered listing, and the full note lifecycle: pin, lock,
//! archive, trash and restore.

mod cli;
mod commands;
mod error;
#[cfg(test)]
mod tests;

use clap::{CommandFactory, Parser};
use jotter_core::config::JotterConfig;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::archived::run_archived;
use crate::commands::categories::run_categories;
use crate::commands::common::Context;
use crate::commands::completions::run_completions;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::flags::{run_archive, run_lock, run_pin};
use crate::commands::list::run_list;
use crate::commands::restore::run_restore;
use crate::commands::settings::run_settings;
use crate::commands::show::run_show;
use crate::commands::trash::run_trash;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("jotter=info,jotter_core=info")),
        )
        .init();

    let cli = Cli::parse();

    if let Some(Commands::Completions { shell, output }) = &cli.command {
        return run_completions(*shell, output.as_deref());
    }

    let config = JotterConfig::load()?;
    let context = Context::from_config(&config, cli.db_path)?;

    match cli.command {
        Some(Commands::Add {
            title,
            category,
            content,
        }) => run_add(title.as_deref(), category.as_deref(), &content, &context).await?,
        Some(Commands::List {
            filter,
            limit,
            json,
        }) => run_list(&filter, limit, json, &context).await?,
        Some(Commands::Show { id, json }) => run_show(&id, json, &context).await?,
        Some(Commands::Edit {
            id,
            title,
            content,
            category,
        }) => run_edit(&id, title, content, category, &context).await?,
        Some(Commands::Pin { id }) => run_pin(&id, &context).await?,
        Some(Commands::Lock { id }) => run_lock(&id, &context).await?,
        Some(Commands::Archive { id }) => run_archive(&id, &context).await?,
        Some(Commands::Delete { id }) => run_delete(&id, &context).await?,
        Some(Commands::Restore { id }) => run_restore(&id, &context).await?,
        Some(Commands::Archived {
            restore_all,
            yes,
            json,
        }) => run_archived(restore_all, yes, json, &context).await?,
        Some(Commands::Trash { empty, yes, json }) => run_trash(empty, yes, json, &context).await?,
        Some(Commands::Categories { command }) => run_categories(command, &context).await?,
        Some(Commands::Settings { command }) => run_settings(command, &context).await?,
        Some(Commands::Completions { .. }) => {}
        None => {
            // Quick capture mode: jotter "my thought"
            if cli.note.is_empty() {
                Cli::command().print_help().map_err(CliError::Io)?;
                println!();
            } else {
                run_add(None, None, &cli.note, &context).await?;
            }
        }
    }

    Ok(())
}
