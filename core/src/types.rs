//! Domain records for the posts API.
//!
//! Field names follow the jsonplaceholder wire format (`userId`). Posts are
//! never mutated after they are fetched.

use serde::{Deserialize, Serialize};

/// A single post as returned by `/posts` or `/posts/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(rename = "userId", default)]
    pub user_id: u64,
}

impl Post {
    /// Text shown for a post in both the list and the detail view.
    pub fn display_text(&self) -> String {
        format!("{}: {}", self.id, self.title)
    }
}
