use jotter_core::controllers::HomeController;

use crate::commands::common::{print_notes, Context};
use crate::error::CliError;

pub async fn run_list(
    filter: &str,
    limit: usize,
    as_json: bool,
    context: &Context,
) -> Result<(), CliError> {
    let session = context.open().await?;
    let home = HomeController::new(&session.repositories, session.idle_grace);
    home.select_category(filter.trim());

    let mut state = home.snapshot();
    state.notes.truncate(limit);
    print_notes(&state.notes, as_json)
}
