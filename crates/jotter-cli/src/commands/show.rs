use jotter_core::controllers::NoteDetailState;
use jotter_core::models::NoteStatus;

use crate::commands::common::{format_timestamp, note_to_list_item, parse_note_id, Context};
use crate::error::CliError;

pub async fn run_show(id: &str, as_json: bool, context: &Context) -> Result<(), CliError> {
    let note_id = parse_note_id(id)?;
    let session = context.open().await?;
    let draft = session.open_note(note_id).await?.state();

    if as_json {
        let item = note_to_list_item(&draft.to_note());
        println!("{}", serde_json::to_string_pretty(&item)?);
    } else {
        for line in format_detail_lines(&draft) {
            println!("{line}");
        }
    }
    Ok(())
}

pub fn format_detail_lines(draft: &NoteDetailState) -> Vec<String> {
    let mut markers = Vec::new();
    if draft.is_pinned {
        markers.push("pinned");
    }
    if draft.is_locked {
        markers.push("locked");
    }
    match draft.status {
        NoteStatus::Active => {}
        NoteStatus::Archived => markers.push("archived"),
        NoteStatus::Trashed => markers.push("trashed"),
        NoteStatus::ArchivedTrashed => markers.extend(["archived", "trashed"]),
    }

    let mut lines = vec![format!(
        "# {}",
        if draft.title.trim().is_empty() {
            "(untitled)"
        } else {
            draft.title.as_str()
        }
    )];
    if !draft.category.is_empty() {
        lines.push(format!("category: {}", draft.category));
    }
    if !markers.is_empty() {
        lines.push(format!("status:   {}", markers.join(", ")));
    }
    lines.push(format!("edited:   {}", format_timestamp(draft.last_edited)));
    if !draft.content.is_empty() {
        lines.push(String::new());
        lines.push(draft.content.clone());
    }
    lines
}
