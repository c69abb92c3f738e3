use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "jotter")]
#[command(about = "Keep short notes with categories, pins, an archive and a trash")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Quick capture: jotter "my thought here"
    #[arg(trailing_var_arg = true)]
    pub note: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new note
    #[command(alias = "new")]
    Add {
        /// Note title
        #[arg(short, long)]
        title: Option<String>,
        /// File the note under this category (created if missing)
        #[arg(short, long)]
        category: Option<String>,
        /// Note content
        content: Vec<String>,
    },
    /// List notes on the home shelf
    #[command(alias = "ls")]
    List {
        /// `All`, `Pinned`, `Locked`, or a category name
        #[arg(short, long, default_value = "All")]
        filter: String,
        /// Number of notes to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one note in full
    Show {
        /// Note ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit an existing note (opens $EDITOR when no field is given)
    Edit {
        /// Note ID
        id: String,
        /// Replace the title
        #[arg(long)]
        title: Option<String>,
        /// Replace the content
        #[arg(long)]
        content: Option<String>,
        /// Move to another category; an empty value uncategorizes
        #[arg(long)]
        category: Option<String>,
    },
    /// Pin or unpin a note
    Pin {
        /// Note ID
        id: String,
    },
    /// Lock or unlock a note
    Lock {
        /// Note ID
        id: String,
    },
    /// Move a note into or out of the archive
    Archive {
        /// Note ID
        id: String,
    },
    /// Move a note to the trash, or delete it for good if already trashed
    #[command(alias = "rm")]
    Delete {
        /// Note ID
        id: String,
    },
    /// Take a note out of the trash
    Restore {
        /// Note ID
        id: String,
    },
    /// List archived notes
    Archived {
        /// Move every archived note back to the home shelf
        #[arg(long)]
        restore_all: bool,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List trashed notes
    Trash {
        /// Permanently delete every trashed note
        #[arg(long)]
        empty: bool,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List or delete categories
    Categories {
        #[command(subcommand)]
        command: Option<CategoryCommands>,
    },
    /// Show or change preferences
    Settings {
        #[command(subcommand)]
        command: Option<SettingsCommands>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Delete a category; its notes become uncategorized
    Delete {
        /// Category name
        name: String,
    },
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Print every preference
    Show,
    /// Change one preference
    Set {
        /// Preference key, e.g. `theme` or `grid_view`
        key: String,
        /// New value, e.g. `dark` or `off`
        value: String,
    },
    /// Reset every preference to its default
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}
