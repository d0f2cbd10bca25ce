//! What the host should draw.

use std::sync::Arc;

/// One row of the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// Stable key for the host's list widget (the post id as a string).
    pub key: String,
    pub id: u64,
    pub label: Arc<str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    List { entries: Vec<ListEntry> },
    /// A detail activation for `id` is waiting on its fetch.
    Loading { id: u64 },
    Detail { id: u64, text: String },
}

impl View {
    pub fn is_loading(&self) -> bool {
        matches!(self, View::Loading { .. })
    }

    /// Rows of a list view; empty for any other view.
    pub fn entries(&self) -> &[ListEntry] {
        match self {
            View::List { entries } => entries,
            _ => &[],
        }
    }
}
