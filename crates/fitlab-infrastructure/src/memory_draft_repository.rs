//! In-memory draft storage.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use fitlab_core::draft::{Draft, DraftDetails, DraftPatch, DraftRepository};
use fitlab_core::error::Result;
use fitlab_core::session::LabSnapshot;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Owner recorded on drafts until accounts exist.
pub const DEFAULT_USER_ID: &str = "user-1";

/// Draft repository that keeps drafts for the lifetime of the process.
#[derive(Debug)]
pub struct InMemoryDraftRepository {
    user_id: String,
    drafts: RwLock<HashMap<String, Draft>>,
}

impl InMemoryDraftRepository {
    pub fn new() -> Self {
        Self::for_user(DEFAULT_USER_ID)
    }

    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            drafts: RwLock::new(HashMap::new()),
        }
    }
}

/// Fixed-width RFC 3339 so timestamps order lexically.
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

impl Default for InMemoryDraftRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DraftRepository for InMemoryDraftRepository {
    async fn save_draft(&self, snapshot: &LabSnapshot, details: &DraftDetails) -> Result<String> {
        let now = timestamp();
        let draft = Draft {
            id: Uuid::new_v4().to_string(),
            user_id: self.user_id.clone(),
            image_url: snapshot.result.image_url.clone(),
            title: details.title.clone(),
            description: details.description.clone(),
            garments: snapshot.garments.clone(),
            style_params: snapshot.style_params.clone(),
            created_at: now.clone(),
            updated_at: now,
        };
        let id = draft.id.clone();

        self.drafts.write().await.insert(id.clone(), draft);
        tracing::debug!("[InMemoryDraftRepository] Stored draft {}", id);
        Ok(id)
    }

    async fn find_by_id(&self, draft_id: &str) -> Result<Option<Draft>> {
        Ok(self.drafts.read().await.get(draft_id).cloned())
    }

    async fn update(&self, draft_id: &str, patch: DraftPatch) -> Result<Option<Draft>> {
        let mut drafts = self.drafts.write().await;
        let Some(draft) = drafts.get_mut(draft_id) else {
            return Ok(None);
        };
        patch.apply_to(draft);
        draft.updated_at = timestamp();
        tracing::debug!("[InMemoryDraftRepository] Updated draft {}", draft_id);
        Ok(Some(draft.clone()))
    }

    async fn list(&self) -> Result<Vec<Draft>> {
        let mut drafts: Vec<Draft> = self.drafts.read().await.values().cloned().collect();
        drafts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.id.cmp(&b.id)));
        Ok(drafts)
    }

    async fn delete(&self, draft_id: &str) -> Result<bool> {
        Ok(self.drafts.write().await.remove(draft_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitlab_core::garment::{Garment, GarmentSlot};
    use fitlab_core::generation::GeneratedImage;
    use fitlab_core::image::SourceImage;
    use fitlab_core::style::StyleParams;

    fn snapshot() -> LabSnapshot {
        LabSnapshot {
            source_image: SourceImage::new(vec![1], "image/png"),
            garments: vec![Garment::new("top-1", GarmentSlot::Top, "https://shop/top")],
            style_params: StyleParams {
                occasion: Some("wedding".to_string()),
                ..StyleParams::default()
            },
            result: GeneratedImage::new("gen-1", "https://cdn/gen-1.jpg"),
        }
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let repo = InMemoryDraftRepository::new();
        let details = DraftDetails {
            title: Some("Summer look".to_string()),
            description: None,
        };

        let id = repo.save_draft(&snapshot(), &details).await.unwrap();
        let draft = repo.find_by_id(&id).await.unwrap().unwrap();

        assert_eq!(draft.user_id, DEFAULT_USER_ID);
        assert_eq!(draft.image_url, "https://cdn/gen-1.jpg");
        assert_eq!(draft.title.as_deref(), Some("Summer look"));
        assert_eq!(draft.garments.len(), 1);
        assert_eq!(draft.style_params.occasion.as_deref(), Some("wedding"));
        assert_eq!(draft.created_at, draft.updated_at);
    }

    #[tokio::test]
    async fn test_update_patches_fields_and_bumps_updated_at() {
        let repo = InMemoryDraftRepository::new();
        let id = repo
            .save_draft(&snapshot(), &DraftDetails::default())
            .await
            .unwrap();
        let created = repo.find_by_id(&id).await.unwrap().unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let patch = DraftPatch {
            title: Some("Renamed".to_string()),
            garments: Some(Vec::new()),
            ..DraftPatch::default()
        };
        let updated = repo.update(&id, patch).await.unwrap().unwrap();

        assert_eq!(updated.title.as_deref(), Some("Renamed"));
        assert!(updated.garments.is_empty());
        assert_eq!(updated.image_url, created.image_url);
        assert_eq!(updated.style_params, created.style_params);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(repo.find_by_id(&id).await.unwrap(), Some(updated));

        assert_eq!(repo.update("missing", DraftPatch::default()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let repo = InMemoryDraftRepository::for_user("someone");
        let first = repo.save_draft(&snapshot(), &DraftDetails::default()).await.unwrap();
        let second = repo.save_draft(&snapshot(), &DraftDetails::default()).await.unwrap();
        assert_ne!(first, second);
        assert_eq!(repo.list().await.unwrap().len(), 2);

        assert!(repo.delete(&first).await.unwrap());
        assert!(!repo.delete(&first).await.unwrap());

        let remaining = repo.list().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, second);
        assert_eq!(remaining[0].user_id, "someone");
    }
}
