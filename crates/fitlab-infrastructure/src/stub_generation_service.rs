//! Offline generation service.
//!
//! Sleeps for a configurable delay and answers with a placeholder image.
//! Used when no remote generation API is configured.

use async_trait::async_trait;
use fitlab_core::config::GenerationSettings;
use fitlab_core::error::{LabError, Result};
use fitlab_core::generation::{GeneratedImage, GenerationRequest, GenerationService};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

pub const PLACEHOLDER_IMAGE_URL: &str = "https://placeholder.example.com/generated-outfit.jpg";

#[derive(Debug, Clone)]
pub struct StubGenerationService {
    delay: Duration,
    image_url: String,
}

impl StubGenerationService {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            image_url: PLACEHOLDER_IMAGE_URL.to_string(),
        }
    }

    pub fn from_settings(settings: &GenerationSettings) -> Self {
        Self::new(Duration::from_millis(settings.stub_delay_ms))
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }
}

impl Default for StubGenerationService {
    fn default() -> Self {
        Self::from_settings(&GenerationSettings::default())
    }
}

#[async_trait]
impl GenerationService for StubGenerationService {
    async fn generate(
        &self,
        request: &GenerationRequest,
        cancel: CancellationToken,
    ) -> Result<GeneratedImage> {
        tracing::debug!(
            "[StubGenerationService] Generating with {} garment(s)",
            request.garments.len()
        );
        let started = Instant::now();

        tokio::select! {
            _ = cancel.cancelled() => {
                return Err(LabError::service("request cancelled"));
            }
            _ = tokio::time::sleep(self.delay) => {}
        }

        let mut image = GeneratedImage::new(
            format!("gen-{}", Uuid::new_v4().simple()),
            self.image_url.clone(),
        );
        image.processing_time_ms = started.elapsed().as_millis() as u64;
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitlab_core::garment::{Garment, GarmentSlot};
    use fitlab_core::image::SourceImage;
    use fitlab_core::style::StyleParams;

    fn request() -> GenerationRequest {
        GenerationRequest {
            source_image: SourceImage::new(vec![1, 2, 3], "image/png"),
            garments: vec![Garment::new("top-1", GarmentSlot::Top, "https://shop/top")],
            style_params: StyleParams::default(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_placeholder_after_delay() {
        let service = StubGenerationService::new(Duration::from_secs(2));

        let image = service
            .generate(&request(), CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(image.image_url, PLACEHOLDER_IMAGE_URL);
        assert!(image.id.starts_with("gen-"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_aborts_request() {
        let service = StubGenerationService::new(Duration::from_secs(60));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = service.generate(&request(), cancel).await.unwrap_err();
        assert!(err.is_service_failure());
    }

    #[test]
    fn test_from_settings_uses_stub_delay() {
        let settings = GenerationSettings {
            stub_delay_ms: 5,
            ..GenerationSettings::default()
        };
        let service = StubGenerationService::from_settings(&settings);
        assert_eq!(service.delay, Duration::from_millis(5));
    }
}
