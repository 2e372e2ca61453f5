//! HttpGenerationService - REST client for a remote virtual try-on API.
//!
//! The API receives the photograph as a data URL together with the garment
//! list and style hints, and answers with the URL of the composed image.

use async_trait::async_trait;
use fitlab_core::config::GenerationSettings;
use fitlab_core::error::{LabError, Result};
use fitlab_core::garment::Garment;
use fitlab_core::generation::{GeneratedImage, GenerationRequest, GenerationService};
use fitlab_core::style::StyleParams;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Serialize)]
struct TryOnRequest<'a> {
    user_image: String,
    garments: &'a [Garment],
    #[serde(skip_serializing_if = "Option::is_none")]
    style_params: Option<&'a StyleParams>,
}

#[derive(Debug, Deserialize)]
struct TryOnResponse {
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    id: Option<String>,
    /// Seconds.
    #[serde(default)]
    processing_time: Option<f64>,
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

fn default_success() -> bool {
    true
}

impl<'a> TryOnRequest<'a> {
    fn from_request(request: &'a GenerationRequest) -> Self {
        Self {
            user_image: request.source_image.to_data_url(),
            garments: &request.garments,
            style_params: (!request.style_params.is_empty()).then_some(&request.style_params),
        }
    }
}

impl TryOnResponse {
    fn into_generated_image(self) -> Result<GeneratedImage> {
        if !self.success {
            return Err(LabError::service(
                self.message
                    .unwrap_or_else(|| "generation service reported failure".to_string()),
            ));
        }

        let image_url = self
            .image_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| LabError::service("response did not include an image URL"))?;
        let id = self
            .id
            .unwrap_or_else(|| format!("gen-{}", uuid::Uuid::new_v4().simple()));

        let mut image = GeneratedImage::new(id, image_url);
        image.processing_time_ms = self
            .processing_time
            .map(|secs| (secs.max(0.0) * 1000.0).round() as u64)
            .unwrap_or_default();
        Ok(image)
    }
}

/// Generation service backed by `POST {api_url}/generate`.
#[derive(Clone)]
pub struct HttpGenerationService {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl HttpGenerationService {
    pub fn new(api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            api_key,
        }
    }

    /// Builds the client from settings; `None` when no API URL is configured.
    pub fn from_settings(settings: &GenerationSettings) -> Option<Self> {
        settings
            .api_url
            .as_ref()
            .map(|url| Self::new(url.clone(), settings.api_key.clone()))
    }

    fn endpoint(&self) -> String {
        format!("{}/generate", self.api_url.trim_end_matches('/'))
    }

    async fn send(&self, request: &GenerationRequest) -> Result<GeneratedImage> {
        let body = TryOnRequest::from_request(request);
        let mut builder = self.client.post(self.endpoint()).json(&body);
        if let Some(api_key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| LabError::service(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LabError::service(format!(
                "API error ({}): {}",
                status, error_text
            )));
        }

        let parsed: TryOnResponse = response
            .json()
            .await
            .map_err(|e| LabError::service(format!("failed to parse response: {}", e)))?;
        parsed.into_generated_image()
    }
}

#[async_trait]
impl GenerationService for HttpGenerationService {
    async fn generate(
        &self,
        request: &GenerationRequest,
        cancel: CancellationToken,
    ) -> Result<GeneratedImage> {
        tracing::info!(
            "[HttpGenerationService] POST {} ({} garment(s))",
            self.endpoint(),
            request.garments.len()
        );

        tokio::select! {
            _ = cancel.cancelled() => Err(LabError::service("request cancelled")),
            result = self.send(request) => result,
        }
    }
}
