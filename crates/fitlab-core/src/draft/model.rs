//! Draft domain model.

use crate::garment::Garment;
use crate::style::StyleParams;
use serde::{Deserialize, Serialize};

/// Optional descriptive fields supplied when saving a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftDetails {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A persisted draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub id: String,
    pub user_id: String,
    /// URL of the generated image.
    pub image_url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub garments: Vec<Garment>,
    #[serde(default)]
    pub style_params: StyleParams,
    /// Creation timestamp (ISO 8601 format)
    pub created_at: String,
    /// Last update timestamp (ISO 8601 format)
    pub updated_at: String,
}

/// Partial update for a [`Draft`]. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub garments: Option<Vec<Garment>>,
    #[serde(default)]
    pub style_params: Option<StyleParams>,
}

impl DraftPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
            && self.garments.is_none()
            && self.style_params.is_none()
    }

    /// Applies the set fields to `draft`. Does not touch timestamps.
    pub fn apply_to(self, draft: &mut Draft) {
        if let Some(title) = self.title {
            draft.title = Some(title);
        }
        if let Some(description) = self.description {
            draft.description = Some(description);
        }
        if let Some(image_url) = self.image_url {
            draft.image_url = image_url;
        }
        if let Some(garments) = self.garments {
            draft.garments = garments;
        }
        if let Some(style_params) = self.style_params {
            draft.style_params = style_params;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::garment::GarmentSlot;

    fn draft() -> Draft {
        Draft {
            id: "d1".to_string(),
            user_id: "user-1".to_string(),
            image_url: "https://cdn/1.jpg".to_string(),
            title: Some("Old".to_string()),
            description: Some("keep me".to_string()),
            garments: Vec::new(),
            style_params: StyleParams::default(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_patch_only_touches_set_fields() {
        let mut target = draft();
        let patch = DraftPatch {
            title: Some("New".to_string()),
            garments: Some(vec![Garment::new("top-1", GarmentSlot::Top, "u1")]),
            ..DraftPatch::default()
        };
        assert!(!patch.is_empty());

        patch.apply_to(&mut target);

        assert_eq!(target.title.as_deref(), Some("New"));
        assert_eq!(target.description.as_deref(), Some("keep me"));
        assert_eq!(target.image_url, "https://cdn/1.jpg");
        assert_eq!(target.garments.len(), 1);
        assert_eq!(target.updated_at, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_empty_patch() {
        assert!(DraftPatch::default().is_empty());
    }
}
