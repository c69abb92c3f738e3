use jotter_core::controllers::ArchiveController;

use crate::commands::common::{confirm_action, plural, print_notes, Context};
use crate::error::CliError;

pub async fn run_archived(
    restore_all: bool,
    assume_yes: bool,
    as_json: bool,
    context: &Context,
) -> Result<(), CliError> {
    let session = context.open().await?;
    let archive = ArchiveController::new(&session.repositories, session.idle_grace);

    if !restore_all {
        return print_notes(&archive.snapshot().notes, as_json);
    }

    let count = archive.snapshot().notes.len();
    if count == 0 {
        println!("Archive is empty");
        return Ok(());
    }

    archive.request_restore_all();
    let prompt = format!("Restore {} to the home shelf?", plural(count, "note"));
    if confirm_action(&prompt, assume_yes, "restore the archive")? {
        let restored = archive.confirm_restore_all().await?;
        println!("Restored {}", plural(restored, "note"));
    } else {
        archive.dismiss_restore_all();
        println!("Cancelled");
    }
    Ok(())
}
