//! Generation Service trait.

use super::model::{GeneratedImage, GenerationRequest};
use crate::error::Result;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// The external service that composes a try-on image.
///
/// # Implementation Notes
///
/// - Failures are reported as `LabError::Service`.
/// - `cancel` is best-effort: implementations should stop waiting once it
///   fires, but callers never rely on that. A result produced after
///   cancellation is discarded by the session store.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Generates an outfit image for the given inputs.
    ///
    /// # Arguments
    ///
    /// * `request` - Snapshot of the source image, garments and style params
    /// * `cancel` - Fires when the caller abandons the request
    ///
    /// # Returns
    ///
    /// - `Ok(GeneratedImage)`: Handle to the generated image
    /// - `Err(_)`: The service failed or was cancelled
    async fn generate(
        &self,
        request: &GenerationRequest,
        cancel: CancellationToken,
    ) -> Result<GeneratedImage>;
}
