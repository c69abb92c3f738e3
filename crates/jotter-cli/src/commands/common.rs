use std::env;
use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::Utc;
use jotter_core::config::JotterConfig;
use jotter_core::controllers::{NoteDetailController, Repositories};
use jotter_core::models::NoteStatus;
use jotter_core::services::DatabaseService;
use jotter_core::{Note, NoteId};
use serde::Serialize;

use crate::error::CliError;

/// Where the database lives and how long shared projections linger
pub struct Context {
    pub db_path: PathBuf,
    pub idle_grace: Duration,
}

impl Context {
    pub fn from_config(
        config: &JotterConfig,
        cli_db_path: Option<PathBuf>,
    ) -> Result<Self, CliError> {
        Ok(Self {
            db_path: config.resolve_db_path(cli_db_path)?,
            idle_grace: config.idle_grace(),
        })
    }

    pub async fn open(&self) -> Result<Session, CliError> {
        let service = DatabaseService::open_path(self.db_path.clone()).await?;
        Ok(Session {
            repositories: Repositories::from_service(&service),
            idle_grace: self.idle_grace,
        })
    }
}

/// An open database with the stores every controller needs
pub struct Session {
    pub repositories: Repositories,
    pub idle_grace: Duration,
}

impl Session {
    /// Editor for a blank note
    pub fn new_note(&self) -> NoteDetailController {
        NoteDetailController::new(
            Arc::clone(&self.repositories.notes),
            Arc::clone(&self.repositories.categories),
        )
    }

    /// Editor for a stored note; a missing id is an error here
    pub async fn open_note(&self, id: NoteId) -> Result<NoteDetailController, CliError> {
        let controller = NoteDetailController::open(
            Arc::clone(&self.repositories.notes),
            Arc::clone(&self.repositories.categories),
            Some(id),
        )
        .await?;

        if controller.state().persisted_id().is_none() {
            return Err(CliError::NoteNotFound(id.to_string()));
        }
        Ok(controller)
    }
}

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: i64,
    pub title: String,
    pub preview: String,
    pub content: String,
    pub category: String,
    pub is_pinned: bool,
    pub is_locked: bool,
    pub status: NoteStatus,
    pub updated_time: i64,
    pub relative_time: String,
}

pub fn note_to_list_item(note: &Note) -> NoteListItem {
    let now_ms = Utc::now().timestamp_millis();

    NoteListItem {
        id: note.id.get(),
        title: note.title.clone(),
        preview: note_preview(note, 80),
        content: note.content.clone(),
        category: note.category.clone(),
        is_pinned: note.is_pinned,
        is_locked: note.is_locked,
        status: note.status,
        updated_time: note.updated_time,
        relative_time: format_relative_time(note.updated_time, now_ms),
    }
}

pub fn print_notes(notes: &[Note], as_json: bool) -> Result<(), CliError> {
    if as_json {
        let json_items = notes
            .iter()
            .map(note_to_list_item)
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else {
        for line in format_note_lines(notes) {
            println!("{line}");
        }
    }
    Ok(())
}

pub fn format_note_lines(notes: &[Note]) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    notes
        .iter()
        .map(|note| format_note_line(note, now_ms))
        .collect()
}

pub fn format_note_line(note: &Note, now_ms: i64) -> String {
    let id = note.id.get();
    let flags = render_flags(note);
    let preview = note_preview(note, 40);
    let relative_time = format_relative_time(note.updated_time, now_ms);

    if note.has_category() {
        format!(
            "{id:>5}  {flags}  {preview:<40}  {relative_time:<10}  [{}]",
            note.category
        )
    } else {
        format!("{id:>5}  {flags}  {preview:<40}  {relative_time}")
    }
}

/// Two-column marker: `P` for pinned, `L` for locked
pub fn render_flags(note: &Note) -> String {
    let pinned = if note.is_pinned { 'P' } else { '-' };
    let locked = if note.is_locked { 'L' } else { '-' };
    format!("{pinned}{locked}")
}

pub fn note_preview(note: &Note, max_chars: usize) -> String {
    let first_line = note.title_preview(usize::MAX);
    let collapsed = first_line.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn format_timestamp(timestamp_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(timestamp_ms).map_or_else(
        || timestamp_ms.to_string(),
        |date_time| date_time.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    )
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

pub fn parse_note_id(id: &str) -> Result<NoteId, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(CliError::EmptyNoteId);
    }

    match trimmed.parse::<NoteId>() {
        Ok(note_id) if !note_id.is_unsaved() => Ok(note_id),
        _ => Err(CliError::InvalidNoteId(trimmed.to_string())),
    }
}

/// Content from the arguments, then piped stdin, then `$EDITOR`.
///
/// With `allow_blank` a note without content is fine and the editor is not
/// opened.
pub fn resolve_note_content(
    content_parts: &[String],
    allow_blank: bool,
) -> Result<String, CliError> {
    if let Some(content) = normalize_content(&content_parts.join(" ")) {
        return Ok(content);
    }

    if let Some(content) = read_piped_stdin()? {
        return Ok(content);
    }

    if allow_blank {
        return Ok(String::new());
    }

    if let Some(content) = capture_editor_input()? {
        return Ok(content);
    }

    Err(CliError::EmptyContent)
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Ask before a destructive bulk action.
///
/// `--yes` skips the prompt; without a terminal to ask on the action is
/// refused.
pub fn confirm_action(
    prompt: &str,
    assume_yes: bool,
    action: &'static str,
) -> Result<bool, CliError> {
    if assume_yes {
        return Ok(true);
    }

    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return Err(CliError::ConfirmationRequired(action));
    }

    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    stdin.lock().read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}

pub fn capture_editor_input() -> Result<Option<String>, CliError> {
    capture_editor_input_with_initial("")
}

pub fn capture_editor_input_with_initial(
    initial_content: &str,
) -> Result<Option<String>, CliError> {
    let editor = preferred_editor();
    let temp_file = create_temp_note_file_path();
    std::fs::write(&temp_file, initial_content)?;

    let launch_result = launch_editor(&editor, &temp_file);
    let note_content = std::fs::read_to_string(&temp_file)?;
    let _ = std::fs::remove_file(&temp_file);

    launch_result?;
    Ok(normalize_content(&note_content))
}

pub fn launch_editor(editor: &str, file_path: &Path) -> Result<(), CliError> {
    match Command::new(editor).arg(file_path).status() {
        Ok(status) => {
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let mut parts = editor.split_whitespace();
            let Some(program) = parts.next() else {
                return Err(CliError::EditorFailed("empty EDITOR command".into()));
            };

            let mut command = Command::new(program);
            command.args(parts).arg(file_path);

            let status = command.status()?;
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) => Err(CliError::Io(err)),
    }
}

pub fn preferred_editor() -> String {
    env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| default_editor().to_string())
}

pub const fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "vi"
    }
}

pub fn create_temp_note_file_path() -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    env::temp_dir().join(format!("jotter-note-{}-{now}.md", std::process::id()))
}
