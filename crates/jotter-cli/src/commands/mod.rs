pub mod add;
pub mod archived;
pub mod categories;
pub mod common;
pub mod completions;
pub mod delete;
pub mod edit;
pub mod flags;
pub mod list;
pub mod restore;
pub mod settings;
pub mod show;
pub mod trash;
