//! File acquisition contract.

use crate::error::Result;
use crate::image::SourceImage;
use async_trait::async_trait;

/// Provides the photograph the user picked.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Acquires an image from the user.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(SourceImage))`: The user picked an image
    /// - `Ok(None)`: The user declined
    /// - `Err(_)`: The image could not be read
    async fn acquire_image(&self) -> Result<Option<SourceImage>>;
}
