//! Category model

use serde::{Deserialize, Serialize};

/// A named bucket notes can be filed under.
///
/// The name is the whole identity: there is no rename, only delete and
/// re-insert. The empty name means "uncategorized" and never appears in
/// category listings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
}

impl Category {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Extract the names from a category listing, preserving order
#[must_use]
pub fn category_names(categories: &[Category]) -> Vec<String> {
    categories.iter().map(|category| category.name.clone()).collect()
}
