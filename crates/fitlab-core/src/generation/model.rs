//! Generation request and result models.

use crate::garment::Garment;
use crate::image::SourceImage;
use crate::style::StyleParams;
use serde::{Deserialize, Serialize};

/// Inputs recorded when a generation job begins.
///
/// This is a snapshot: later edits to the session do not change it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub source_image: SourceImage,
    pub garments: Vec<Garment>,
    pub style_params: StyleParams,
}

/// Handle to an image produced by the Generation Service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub id: String,
    pub image_url: String,
    #[serde(default)]
    pub processing_time_ms: u64,
}

impl GeneratedImage {
    pub fn new(id: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            image_url: image_url.into(),
            processing_time_ms: 0,
        }
    }
}
