use crate::commands::common::{parse_note_id, Context};
use crate::error::CliError;

pub async fn run_restore(id: &str, context: &Context) -> Result<(), CliError> {
    let note_id = parse_note_id(id)?;
    let session = context.open().await?;
    let draft = session.open_note(note_id).await?;

    if !draft.state().status.is_trashed() {
        println!("Note {note_id} is not in the trash");
        return Ok(());
    }

    draft.restore_note().await?;
    println!("Restored note {note_id}");
    Ok(())
}
