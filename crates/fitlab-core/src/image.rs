//! Uploaded source photograph.

use crate::error::{LabError, Result, ValidationError};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;
use std::sync::Arc;

/// The user's uploaded photograph.
///
/// The payload is opaque to the session; it is shared behind an `Arc` so
/// snapshots and generation requests do not copy the bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct SourceImage {
    data: Arc<Vec<u8>>,
    mime_type: String,
    file_name: Option<String>,
}

impl SourceImage {
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data: Arc::new(data),
            mime_type: mime_type.into(),
            file_name: None,
        }
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Checks the payload against the upload rules.
    pub fn validate(&self, max_size: u64) -> std::result::Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyImage);
        }
        if !self.mime_type.starts_with("image/") {
            return Err(ValidationError::UnsupportedImageType {
                mime_type: self.mime_type.clone(),
            });
        }
        let size = self.data.len() as u64;
        if size > max_size {
            return Err(ValidationError::ImageTooLarge {
                size,
                limit: max_size,
            });
        }
        Ok(())
    }

    /// Encodes the payload as a `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(self.data.as_slice()))
    }

    /// Decodes a base64 `data:` URL.
    pub fn from_data_url(url: &str) -> Result<Self> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| LabError::Serialization {
                format: "data-url".to_string(),
                message: "missing 'data:' prefix".to_string(),
            })?;
        let (mime_type, payload) =
            rest.split_once(";base64,")
                .ok_or_else(|| LabError::Serialization {
                    format: "data-url".to_string(),
                    message: "only base64 data URLs are supported".to_string(),
                })?;
        let data = STANDARD
            .decode(payload)
            .map_err(|e| LabError::Serialization {
                format: "data-url".to_string(),
                message: e.to_string(),
            })?;
        Ok(Self::new(data, mime_type))
    }
}

impl fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceImage")
            .field("mime_type", &self.mime_type)
            .field("file_name", &self.file_name)
            .field("len", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_round_trip() {
        let image = SourceImage::new(vec![0x89, 0x50, 0x4e, 0x47], "image/png");
        let url = image.to_data_url();

        assert_eq!(url, "data:image/png;base64,iVBORw==");
        assert_eq!(SourceImage::from_data_url(&url).unwrap(), image);
    }

    #[test]
    fn test_from_data_url_rejects_plain_url() {
        let err = SourceImage::from_data_url("https://example.com/a.png").unwrap_err();
        assert!(matches!(err, LabError::Serialization { .. }));
    }

    #[test]
    fn test_validate_upload_rules() {
        let empty = SourceImage::new(Vec::new(), "image/png");
        assert_eq!(empty.validate(10), Err(ValidationError::EmptyImage));

        let text = SourceImage::new(b"hello".to_vec(), "text/plain");
        assert!(matches!(
            text.validate(10),
            Err(ValidationError::UnsupportedImageType { .. })
        ));

        let big = SourceImage::new(vec![0; 11], "image/jpeg");
        assert_eq!(
            big.validate(10),
            Err(ValidationError::ImageTooLarge { size: 11, limit: 10 })
        );

        let ok = SourceImage::new(vec![0; 10], "image/jpeg");
        assert!(ok.validate(10).is_ok());
    }

    #[test]
    fn test_debug_does_not_dump_bytes() {
        let image = SourceImage::new(vec![1, 2, 3], "image/png").with_file_name("me.png");
        let debug = format!("{:?}", image);
        assert!(debug.contains("len: 3"));
        assert!(debug.contains("me.png"));
    }
}
