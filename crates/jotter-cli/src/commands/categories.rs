use jotter_core::controllers::HomeController;
use jotter_core::models::category_names;

use crate::cli::CategoryCommands;
use crate::commands::common::{plural, Context};
use crate::error::CliError;

pub async fn run_categories(
    command: Option<CategoryCommands>,
    context: &Context,
) -> Result<(), CliError> {
    let session = context.open().await?;
    let names = category_names(&session.repositories.categories.get_all_categories().borrow());

    match command {
        None => {
            let notes = session.repositories.notes.observe_notes();
            let notes = notes.borrow();
            for name in &names {
                let count = notes
                    .iter()
                    .filter(|note| note.category == *name && !note.status.is_trashed())
                    .count();
                println!("{name:<24}  {}", plural(count, "note"));
            }
        }
        Some(CategoryCommands::Delete { name }) => {
            let name = name.trim();
            if !names.iter().any(|existing| existing == name) {
                return Err(CliError::CategoryNotFound(name.to_string()));
            }

            let home = HomeController::new(&session.repositories, session.idle_grace);
            home.delete_category(name).await?;
            println!("Deleted category {name}");
        }
    }
    Ok(())
}
