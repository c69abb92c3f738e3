use crate::commands::common::{resolve_note_content, Context};
use crate::error::CliError;

pub async fn run_add(
    title: Option<&str>,
    category: Option<&str>,
    content_parts: &[String],
    context: &Context,
) -> Result<(), CliError> {
    let content = resolve_note_content(content_parts, title.is_some())?;

    let session = context.open().await?;
    let draft = session.new_note();
    draft.update_title(title.unwrap_or_default().trim());
    draft.update_content(content);
    if let Some(category) = category {
        draft.update_category(category.trim());
    }

    let id = draft.save().await?;
    println!("{id}");
    Ok(())
}
