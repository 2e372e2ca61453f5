//! File-backed image acquisition.

use async_trait::async_trait;
use fitlab_core::acquisition::ImageSource;
use fitlab_core::error::{Result, ValidationError};
use fitlab_core::image::SourceImage;
use std::path::PathBuf;

/// Reads the photograph from a file the user picked.
///
/// No path means the user declined. Files over the size limit are rejected
/// from their metadata before any content is read.
#[derive(Debug, Clone, Default)]
pub struct FileImageSource {
    path: Option<PathBuf>,
    max_file_size: Option<u64>,
}

impl FileImageSource {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            max_file_size: None,
        }
    }

    pub fn with_max_file_size(mut self, limit: u64) -> Self {
        self.max_file_size = Some(limit);
        self
    }
}

#[async_trait]
impl ImageSource for FileImageSource {
    async fn acquire_image(&self) -> Result<Option<SourceImage>> {
        let Some(path) = &self.path else {
            return Ok(None);
        };

        if let Some(limit) = self.max_file_size {
            let size = tokio::fs::metadata(path).await?.len();
            if size > limit {
                tracing::warn!(
                    "[FileImageSource] {} is {} bytes, limit is {}",
                    path.display(),
                    size,
                    limit
                );
                return Err(ValidationError::ImageTooLarge { size, limit }.into());
            }
        }

        let data = tokio::fs::read(path).await?;
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        tracing::debug!(
            "[FileImageSource] Read {} ({}, {} bytes)",
            path.display(),
            mime_type,
            data.len()
        );

        let mut image = SourceImage::new(data, mime_type);
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            image = image.with_file_name(name);
        }
        Ok(Some(image))
    }
}
