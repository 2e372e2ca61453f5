//! Infinite-scroll pagination over the discovery feed.

use fitlab_core::error::Result;
use fitlab_core::feed::{FeedSource, Post};
use std::sync::Arc;

/// Accumulates feed pages as the user scrolls.
pub struct FeedPaginator {
    source: Arc<dyn FeedSource>,
    items: Vec<Post>,
    next_cursor: Option<String>,
    has_more: bool,
}

impl FeedPaginator {
    pub fn new(source: Arc<dyn FeedSource>) -> Self {
        Self {
            source,
            items: Vec::new(),
            next_cursor: None,
            has_more: true,
        }
    }

    pub fn items(&self) -> &[Post] {
        &self.items
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Scroll-proximity check: load when at most `threshold` items remain
    /// below the viewport.
    pub fn should_load_more(&self, remaining: usize, threshold: usize) -> bool {
        self.has_more && remaining <= threshold
    }

    /// Loads the next page and appends it.
    ///
    /// # Returns
    ///
    /// The number of items appended (0 once the feed is exhausted).
    pub async fn load_more(&mut self) -> Result<usize> {
        if !self.has_more {
            return Ok(0);
        }
        let page = self.source.load_page(self.next_cursor.as_deref()).await?;
        let loaded = page.items.len();

        self.items.extend(page.items);
        self.next_cursor = page.next_cursor;
        self.has_more = page.has_more && self.next_cursor.is_some();
        tracing::debug!(
            "[FeedPaginator] Loaded {} item(s), has_more: {}",
            loaded,
            self.has_more
        );
        Ok(loaded)
    }

    /// Drops everything and loads the first page again.
    pub async fn refresh(&mut self) -> Result<usize> {
        self.items.clear();
        self.next_cursor = None;
        self.has_more = true;
        self.load_more().await
    }
}
