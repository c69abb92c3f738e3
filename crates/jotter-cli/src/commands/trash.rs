use jotter_core::controllers::TrashController;

use crate::commands::common::{confirm_action, plural, print_notes, Context};
use crate::error::CliError;

pub async fn run_trash(
    empty: bool,
    assume_yes: bool,
    as_json: bool,
    context: &Context,
) -> Result<(), CliError> {
    let session = context.open().await?;
    let trash = TrashController::new(&session.repositories, session.idle_grace);

    if !empty {
        return print_notes(&trash.snapshot().notes, as_json);
    }

    let count = trash.snapshot().notes.len();
    if count == 0 {
        println!("Trash is empty");
        return Ok(());
    }

    trash.request_empty_trash();
    let prompt = format!(
        "Permanently delete {}? This cannot be undone.",
        plural(count, "note")
    );
    if confirm_action(&prompt, assume_yes, "empty the trash")? {
        let removed = trash.confirm_empty_trash().await?;
        println!("Deleted {}", plural(removed, "note"));
    } else {
        trash.dismiss_empty_trash();
        println!("Cancelled");
    }
    Ok(())
}
