//! Discovery feed domain module.
//!
//! # Module Structure
//!
//! - `model`: `Post`, `PostDetails` and `FeedPage`
//! - `repository`: publish and pagination traits
//!
//! # Usage
//!
//! ```ignore
//! use fitlab_core::feed::{FeedPage, FeedPublisher, FeedSource, Post};
//! ```

mod model;
pub mod repository;

// Re-export public API
pub use model::{FeedPage, Post, PostDetails};
pub use repository::{FeedPublisher, FeedSource};
