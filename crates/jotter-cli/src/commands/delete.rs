use jotter_core::controllers::DeleteOutcome;

use crate::commands::common::{parse_note_id, Context};
use crate::error::CliError;

pub async fn run_delete(id: &str, context: &Context) -> Result<(), CliError> {
    let note_id = parse_note_id(id)?;
    let session = context.open().await?;
    let draft = session.open_note(note_id).await?;

    match draft.delete_note().await? {
        DeleteOutcome::Trashed => println!("Moved note {note_id} to the trash"),
        DeleteOutcome::Deleted => println!("Deleted note {note_id}"),
    }
    Ok(())
}
