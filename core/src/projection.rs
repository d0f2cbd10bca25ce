//! Memoized list-entry labels.
//!
//! A label is a pure function of a post. The cache keys entries by post id and
//! only recomputes when the `Arc<Post>` behind that id is a different
//! allocation, so re-rendering an unchanged collection costs no formatting.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::types::Post;

/// Label shown for a post in the list view.
pub fn project(post: &Post) -> String {
    post.display_text()
}

struct CachedLabel {
    post: Arc<Post>,
    label: Arc<str>,
}

#[derive(Default)]
pub struct LabelCache {
    entries: HashMap<u64, CachedLabel>,
    computations: u64,
}

impl LabelCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(&mut self, post: &Arc<Post>) -> Arc<str> {
        if let Some(cached) = self.entries.get(&post.id) {
            if Arc::ptr_eq(&cached.post, post) {
                return Arc::clone(&cached.label);
            }
        }
        let label: Arc<str> = project(post).into();
        self.computations += 1;
        self.entries.insert(
            post.id,
            CachedLabel {
                post: Arc::clone(post),
                label: Arc::clone(&label),
            },
        );
        label
    }

    /// Drop cached labels for posts that are no longer in `posts`.
    pub fn retain(&mut self, posts: &[Arc<Post>]) {
        let live: HashSet<u64> = posts.iter().map(|p| p.id).collect();
        self.entries.retain(|id, _| live.contains(id));
    }

    /// Number of times a label has actually been computed.
    pub fn computations(&self) -> u64 {
        self.computations
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for LabelCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelCache")
            .field("entries", &self.entries.len())
            .field("computations", &self.computations)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: u64, title: &str) -> Arc<Post> {
        Arc::new(Post {
            id,
            title: title.to_string(),
            body: String::new(),
            user_id: 1,
        })
    }

    #[test]
    fn same_arc_is_computed_once() {
        let mut cache = LabelCache::new();
        let p = post(1, "a");
        assert_eq!(&*cache.label(&p), "1: a");
        assert_eq!(&*cache.label(&p), "1: a");
        assert_eq!(&*cache.label(&Arc::clone(&p)), "1: a");
        assert_eq!(cache.computations(), 1);
    }

    #[test]
    fn equal_but_distinct_post_is_recomputed() {
        let mut cache = LabelCache::new();
        cache.label(&post(1, "a"));
        cache.label(&post(1, "a"));
        assert_eq!(cache.computations(), 2);
    }

    #[test]
    fn replaced_post_gets_new_label() {
        let mut cache = LabelCache::new();
        cache.label(&post(1, "old"));
        assert_eq!(&*cache.label(&post(1, "new")), "1: new");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn retain_drops_missing_posts() {
        let mut cache = LabelCache::new();
        let keep = post(1, "a");
        cache.label(&keep);
        cache.label(&post(2, "b"));
        cache.retain(std::slice::from_ref(&keep));
        assert_eq!(cache.len(), 1);
        cache.label(&keep);
        assert_eq!(cache.computations(), 2);
    }
}
