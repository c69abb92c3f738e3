use std::time::Duration;

use jotter_core::controllers::NoteDetailState;
use jotter_core::models::{NoteStatus, Preferences, PREFERENCE_KEYS};
use jotter_core::services::DatabaseService;
use jotter_core::store::NoteRepository;
use jotter_core::{Note, NoteId};
use pretty_assertions::assert_eq;

use crate::cli::{CategoryCommands, CompletionShell};
use crate::commands::add::run_add;
use crate::commands::categories::run_categories;
use crate::commands::common::{
    default_editor, format_note_line, format_relative_time, is_affirmative, normalize_content,
    note_preview, parse_note_id, plural, render_flags, Context,
};
use crate::commands::completions::run_completions;
use crate::commands::delete::run_delete;
use crate::commands::settings::format_preference_lines;
use crate::commands::show::format_detail_lines;
use crate::commands::trash::run_trash;
use crate::error::CliError;

fn test_context(dir: &tempfile::TempDir) -> Context {
    Context {
        db_path: dir.path().join("jotter.db"),
        idle_grace: Duration::from_millis(50),
    }
}

#[test]
fn normalize_content_trims_and_rejects_blank() {
    assert_eq!(normalize_content("  hello  "), Some("hello".to_string()));
    assert_eq!(normalize_content(" \n\t "), None);
}

#[test]
fn default_editor_matches_platform() {
    if cfg!(windows) {
        assert_eq!(default_editor(), "notepad");
    } else {
        assert_eq!(default_editor(), "vi");
    }
}

#[test]
fn format_relative_time_units() {
    let now = 10_000_000_000;
    let day = 24 * 60 * 60_000;
    assert_eq!(format_relative_time(now - 30_000, now), "just now");
    assert_eq!(format_relative_time(now - 120_000, now), "2m ago");
    assert_eq!(format_relative_time(now - 2 * 60 * 60_000, now), "2h ago");
    assert_eq!(format_relative_time(now - 3 * day, now), "3d ago");
    assert_eq!(format_relative_time(now - 14 * day, now), "2w ago");
    assert_eq!(format_relative_time(now - 400 * day, now), "1y ago");
}

#[test]
fn note_preview_truncates_with_ellipsis() {
    let note = Note::new("", "This is a very long sentence that should be shortened");
    let preview = note_preview(&note, 20);
    assert_eq!(preview, "This is a very lo...");
}

#[test]
fn note_preview_prefers_title_and_collapses_whitespace() {
    let note = Note::new("Groceries   list", "milk\neggs");
    assert_eq!(note_preview(&note, 40), "Groceries list");
}

#[test]
fn render_flags_marks_pin_and_lock() {
    let mut note = Note::new("t", "");
    assert_eq!(render_flags(&note), "--");
    note.is_pinned = true;
    assert_eq!(render_flags(&note), "P-");
    note.is_locked = true;
    assert_eq!(render_flags(&note), "PL");
}

#[test]
fn format_note_line_pads_columns_and_shows_category() {
    let now = 10_000_000;
    let mut note = Note::new("Standup", "").with_category("Work");
    note.id = NoteId::new(7);
    note.updated_time = now - 30_000;

    let line = format_note_line(&note, now);
    assert!(line.starts_with("    7  --  Standup"));
    assert!(line.contains("just now"));
    assert!(line.ends_with("[Work]"));

    note.category.clear();
    let line = format_note_line(&note, now);
    assert!(line.ends_with("just now"));
    assert!(!line.contains('['));
}

#[test]
fn parse_note_id_rejects_bad_input() {
    assert!(matches!(parse_note_id("   "), Err(CliError::EmptyNoteId)));
    assert!(matches!(
        parse_note_id("abc"),
        Err(CliError::InvalidNoteId(value)) if value == "abc"
    ));
    assert!(matches!(parse_note_id("0"), Err(CliError::InvalidNoteId(_))));
    assert_eq!(parse_note_id(" 42 ").unwrap(), NoteId::new(42));
}

#[test]
fn is_affirmative_accepts_yes_variants() {
    assert!(is_affirmative("y\n"));
    assert!(is_affirmative(" YES "));
    assert!(!is_affirmative(""));
    assert!(!is_affirmative("nope"));
}

#[test]
fn plural_handles_one_and_many() {
    assert_eq!(plural(1, "note"), "1 note");
    assert_eq!(plural(0, "note"), "0 notes");
    assert_eq!(plural(3, "note"), "3 notes");
}

#[test]
fn format_preference_lines_follow_key_order() {
    let lines = format_preference_lines(&Preferences::default());
    assert_eq!(lines.len(), PREFERENCE_KEYS.len());
    for (line, key) in lines.iter().zip(PREFERENCE_KEYS) {
        assert!(line.starts_with(key), "{line} should start with {key}");
    }
    assert!(lines[0].ends_with("true"));
    assert!(lines[1].ends_with("system"));
}

#[test]
fn format_detail_lines_lists_markers_and_body() {
    let mut note = Note::new("", "body text").with_category("Ideas");
    note.id = NoteId::new(3);
    note.is_pinned = true;
    note.status = NoteStatus::Archived;
    note.updated_time = 0;

    let lines = format_detail_lines(&NoteDetailState::from_note(note));
    assert_eq!(
        lines,
        vec![
            "# (untitled)".to_string(),
            "category: Ideas".to_string(),
            "status:   pinned, archived".to_string(),
            "edited:   1970-01-01 00:00:00 UTC".to_string(),
            String::new(),
            "body text".to_string(),
        ]
    );
}

#[test]
fn completions_write_to_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jotter.bash");

    run_completions(CompletionShell::Bash, Some(&path)).unwrap();

    let script = std::fs::read_to_string(&path).unwrap();
    assert!(script.contains("jotter"));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_trashes_then_removes_note() {
    let dir = tempfile::tempdir().unwrap();
    let context = test_context(&dir);

    run_add(Some("Doomed"), None, &["bye".to_string()], &context)
        .await
        .unwrap();
    run_delete("1", &context).await.unwrap();

    {
        let service = DatabaseService::open_path(&context.db_path).await.unwrap();
        let note = service.get_note_by_id(NoteId::new(1)).await.unwrap().unwrap();
        assert_eq!(note.status, NoteStatus::Trashed);
    }

    run_delete("1", &context).await.unwrap();

    let service = DatabaseService::open_path(&context.db_path).await.unwrap();
    assert_eq!(service.get_note_by_id(NoteId::new(1)).await.unwrap(), None);
    assert!(matches!(
        run_delete("1", &context).await,
        Err(CliError::NoteNotFound(_))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_trash_with_yes_keeps_other_notes() {
    let dir = tempfile::tempdir().unwrap();
    let context = test_context(&dir);

    run_add(Some("Trash me"), None, &["old".to_string()], &context)
        .await
        .unwrap();
    run_add(Some("Keep me"), Some("Work"), &["body".to_string()], &context)
        .await
        .unwrap();
    run_delete("1", &context).await.unwrap();

    run_trash(true, true, false, &context).await.unwrap();

    let service = DatabaseService::open_path(&context.db_path).await.unwrap();
    assert_eq!(service.get_note_by_id(NoteId::new(1)).await.unwrap(), None);
    let kept = service.get_note_by_id(NoteId::new(2)).await.unwrap().unwrap();
    assert_eq!(kept.category, "Work");
    assert_eq!(kept.status, NoteStatus::Active);
}

#[tokio::test(flavor = "multi_thread")]
async fn deleting_unknown_category_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let context = test_context(&dir);

    let result = run_categories(
        Some(CategoryCommands::Delete {
            name: "Nope".to_string(),
        }),
        &context,
    )
    .await;

    assert!(matches!(result, Err(CliError::CategoryNotFound(name)) if name == "Nope"));
}

#[tokio::test(flavor = "multi_thread")]
async fn deleting_category_uncategorizes_notes() {
    let dir = tempfile::tempdir().unwrap();
    let context = test_context(&dir);

    run_add(Some("Standup"), Some("Work"), &["notes".to_string()], &context)
        .await
        .unwrap();
    run_categories(
        Some(CategoryCommands::Delete {
            name: "Work".to_string(),
        }),
        &context,
    )
    .await
    .unwrap();

    let service = DatabaseService::open_path(&context.db_path).await.unwrap();
    let note = service.get_note_by_id(NoteId::new(1)).await.unwrap().unwrap();
    assert_eq!(note.category, "");
}
