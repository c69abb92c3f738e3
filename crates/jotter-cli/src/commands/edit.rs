use crate::commands::common::{capture_editor_input_with_initial, parse_note_id, Context};
use crate::error::CliError;

pub async fn run_edit(
    id: &str,
    title: Option<String>,
    content: Option<String>,
    category: Option<String>,
    context: &Context,
) -> Result<(), CliError> {
    let note_id = parse_note_id(id)?;
    let session = context.open().await?;
    let draft = session.open_note(note_id).await?;
    let before = draft.state();

    if title.is_none() && content.is_none() && category.is_none() {
        let edited = capture_editor_input_with_initial(&before.content)?.unwrap_or_default();
        draft.update_content(edited);
    } else {
        if let Some(title) = title {
            draft.update_title(title.trim());
        }
        if let Some(content) = content {
            draft.update_content(content);
        }
        if let Some(category) = category {
            draft.update_category(category.trim());
        }
    }

    if draft.state() == before {
        println!("{note_id}");
        return Ok(());
    }

    let id = draft.save().await?;
    println!("{id}");
    Ok(())
}
