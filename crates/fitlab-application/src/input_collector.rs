//! Lab input collection.
//!
//! Gathers the source photograph and garment references and decides when a
//! generation may be requested.

use crate::orchestrator::GenerationOrchestrator;
use fitlab_core::acquisition::ImageSource;
use fitlab_core::error::Result;
use fitlab_core::garment::{Garment, GarmentSlot};
use fitlab_core::image::SourceImage;
use fitlab_core::session::SessionStore;
use fitlab_core::style::StyleParamsPatch;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Collects and validates generation inputs.
///
/// Pending garment references are local to the collector until they are
/// committed; everything else goes straight to the session store.
pub struct InputCollector {
    store: Arc<SessionStore>,
    orchestrator: Arc<GenerationOrchestrator>,
    max_file_size: u64,
    pending: HashMap<GarmentSlot, String>,
}

impl InputCollector {
    pub fn new(
        store: Arc<SessionStore>,
        orchestrator: Arc<GenerationOrchestrator>,
        max_file_size: u64,
    ) -> Self {
        Self {
            store,
            orchestrator,
            max_file_size,
            pending: HashMap::new(),
        }
    }

    /// Asks `source` for a photograph and uses it as the source image.
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: The image was accepted
    /// - `Ok(false)`: The user declined; nothing changed
    /// - `Err(_)`: The image could not be read or failed validation
    pub async fn upload(&self, source: &dyn ImageSource) -> Result<bool> {
        match source.acquire_image().await? {
            Some(image) => {
                self.set_source_image(image).await?;
                Ok(true)
            }
            None => {
                tracing::debug!("[InputCollector] Image acquisition declined");
                Ok(false)
            }
        }
    }

    /// Replaces the source image.
    ///
    /// A running generation is cancelled because its result would belong to
    /// the previous image.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error, leaving the session untouched, when the
    /// payload is empty, not an image, or larger than the upload limit.
    pub async fn set_source_image(&self, image: SourceImage) -> Result<()> {
        image.validate(self.max_file_size)?;
        if let Some(token) = self.orchestrator.cancel().await {
            tracing::info!("[InputCollector] New image cancelled job {}", token);
        }
        tracing::info!(
            "[InputCollector] Source image set ({}, {} bytes)",
            image.mime_type(),
            image.len()
        );
        self.store.set_source_image(Some(image));
        Ok(())
    }

    /// Removes the source image.
    pub async fn clear_source_image(&self) {
        self.orchestrator.cancel().await;
        self.store.set_source_image(None);
    }

    /// Updates the not-yet-committed reference for `slot`.
    pub fn set_pending(&mut self, slot: GarmentSlot, reference: impl Into<String>) {
        self.pending.insert(slot, reference.into());
    }

    /// Returns the pending reference for `slot` (empty when none).
    pub fn pending(&self, slot: GarmentSlot) -> &str {
        self.pending.get(&slot).map(String::as_str).unwrap_or("")
    }

    /// Turns the pending reference for `slot` into a garment.
    ///
    /// Blank references are ignored. On success the pending value is cleared.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Garment))`: The garment that was added
    /// - `Ok(None)`: Nothing was pending
    pub fn commit_pending(&mut self, slot: GarmentSlot) -> Result<Option<Garment>> {
        let url = self.pending(slot).trim().to_string();
        if url.is_empty() {
            return Ok(None);
        }

        let garment = Garment::new(format!("{}-{}", slot, Uuid::new_v4().simple()), slot, url.clone())
            .with_product_url(url);
        self.store.add_garment(garment.clone())?;
        self.pending.remove(&slot);
        Ok(Some(garment))
    }

    /// Adds a fully specified garment.
    pub fn add_garment(&self, garment: Garment) -> Result<()> {
        self.store.add_garment(garment)
    }

    /// Removes a garment; absent ids are ignored.
    pub fn remove_garment(&self, id: &str) -> bool {
        self.store.remove_garment(id)
    }

    pub fn update_style_params(&self, patch: StyleParamsPatch) {
        self.store.update_style_params(patch);
    }

    /// Checks that a generation may be requested.
    ///
    /// # Errors
    ///
    /// `ValidationError::MissingSourceImage` or `ValidationError::NoGarments`.
    pub fn validate(&self) -> Result<()> {
        Ok(self.store.snapshot().check_inputs()?)
    }

    /// Whether the generate action should be enabled.
    pub fn can_generate(&self) -> bool {
        self.validate().is_ok()
    }
}
