//! Feed publish and pagination traits.

use super::model::{FeedPage, Post, PostDetails};
use crate::error::Result;
use crate::session::LabSnapshot;
use async_trait::async_trait;

/// Promotes a succeeded generation into the public discovery feed.
#[async_trait]
pub trait FeedPublisher: Send + Sync {
    /// Publishes the snapshot's result.
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The id of the new post
    /// - `Err(_)`: `LabError::Persistence` if the post could not be stored
    async fn publish(&self, snapshot: &LabSnapshot, details: &PostDetails) -> Result<String>;
}

/// Generic paginated access to the discovery feed.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Loads the page starting at `cursor` (`None` for the first page).
    async fn load_page(&self, cursor: Option<&str>) -> Result<FeedPage<Post>>;
}
