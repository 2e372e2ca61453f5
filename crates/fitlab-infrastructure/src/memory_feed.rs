//! In-memory discovery feed.
//!
//! Posts are served newest first. Cursors are decimal offsets into that order.

use async_trait::async_trait;
use chrono::Utc;
use fitlab_core::config::FeedSettings;
use fitlab_core::error::{LabError, Result};
use fitlab_core::feed::{FeedPage, FeedPublisher, FeedSource, Post, PostDetails};
use fitlab_core::session::LabSnapshot;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::memory_draft_repository::DEFAULT_USER_ID;

#[derive(Debug)]
pub struct InMemoryFeed {
    user_id: String,
    page_size: usize,
    /// Oldest first; pages are read from the back.
    posts: RwLock<Vec<Post>>,
}

impl InMemoryFeed {
    pub fn new(settings: &FeedSettings) -> Self {
        Self {
            user_id: DEFAULT_USER_ID.to_string(),
            page_size: settings.effective_page_size(),
            posts: RwLock::new(Vec::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    /// Increments the like counter of a post.
    ///
    /// Returns the new count, or `None` when the post does not exist.
    pub async fn like_post(&self, post_id: &str) -> Option<u64> {
        let mut posts = self.posts.write().await;
        let post = posts.iter_mut().find(|p| p.id == post_id)?;
        post.likes += 1;
        Some(post.likes)
    }

    /// Increments the save counter of a post.
    pub async fn save_post(&self, post_id: &str) -> Option<u64> {
        let mut posts = self.posts.write().await;
        let post = posts.iter_mut().find(|p| p.id == post_id)?;
        post.saves += 1;
        Some(post.saves)
    }

    fn parse_cursor(cursor: Option<&str>) -> Result<usize> {
        match cursor {
            None => Ok(0),
            Some(raw) => raw
                .parse()
                .map_err(|_| LabError::persistence(format!("invalid feed cursor '{}'", raw))),
        }
    }
}

impl Default for InMemoryFeed {
    fn default() -> Self {
        Self::new(&FeedSettings::default())
    }
}

#[async_trait]
impl FeedPublisher for InMemoryFeed {
    async fn publish(&self, snapshot: &LabSnapshot, details: &PostDetails) -> Result<String> {
        let post = Post {
            id: Uuid::new_v4().to_string(),
            user_id: self.user_id.clone(),
            image_url: snapshot.result.image_url.clone(),
            title: details.title.clone(),
            description: details.description.clone(),
            tags: details.tags.clone(),
            likes: 0,
            saves: 0,
            is_ai_generated: true,
            created_at: Utc::now().to_rfc3339(),
        };
        let id = post.id.clone();

        self.posts.write().await.push(post);
        tracing::info!("[InMemoryFeed] Published post {}", id);
        Ok(id)
    }
}

#[async_trait]
impl FeedSource for InMemoryFeed {
    async fn load_page(&self, cursor: Option<&str>) -> Result<FeedPage<Post>> {
        let offset = Self::parse_cursor(cursor)?;
        let posts = self.posts.read().await;

        let items: Vec<Post> = posts
            .iter()
            .rev()
            .skip(offset)
            .take(self.page_size)
            .cloned()
            .collect();
        let end = offset + items.len();
        let has_more = end < posts.len();

        Ok(FeedPage {
            items,
            next_cursor: has_more.then(|| end.to_string()),
            has_more,
        })
    }
}
