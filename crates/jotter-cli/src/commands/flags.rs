use jotter_core::controllers::NoteDetailState;
use jotter_core::NoteId;

use crate::commands::common::{parse_note_id, Context};
use crate::error::CliError;

pub async fn run_pin(id: &str, context: &Context) -> Result<(), CliError> {
    let note_id = parse_note_id(id)?;
    let session = context.open().await?;
    let draft = session.open_note(note_id).await?;

    draft.toggle_pin().await?;
    let verb = if draft.state().is_pinned { "Pinned" } else { "Unpinned" };
    println!("{verb} note {note_id}");
    Ok(())
}

pub async fn run_lock(id: &str, context: &Context) -> Result<(), CliError> {
    let note_id = parse_note_id(id)?;
    let session = context.open().await?;
    let draft = session.open_note(note_id).await?;

    draft.toggle_lock().await?;
    let verb = if draft.state().is_locked { "Locked" } else { "Unlocked" };
    println!("{verb} note {note_id}");
    Ok(())
}

pub async fn run_archive(id: &str, context: &Context) -> Result<(), CliError> {
    let note_id = parse_note_id(id)?;
    let session = context.open().await?;
    let draft = session.open_note(note_id).await?;

    draft.toggle_archive().await?;
    println!("{}", archive_message(&draft.state(), note_id));
    Ok(())
}

fn archive_message(draft: &NoteDetailState, note_id: NoteId) -> String {
    if draft.status.is_trashed() {
        format!("Note {note_id} is in the trash; restore it first")
    } else if draft.status.is_archived() {
        format!("Archived note {note_id}")
    } else {
        format!("Unarchived note {note_id}")
    }
}
