//! Draft repository trait.
//!
//! Defines the interface for draft persistence operations.

use super::model::{Draft, DraftDetails, DraftPatch};
use crate::error::Result;
use crate::session::LabSnapshot;
use async_trait::async_trait;

/// An abstract repository for managing draft persistence.
///
/// This trait decouples the Lab from the specific storage mechanism
/// (e.g., in-memory, database, remote API). Failures are reported as
/// `LabError::Persistence`.
#[async_trait]
pub trait DraftRepository: Send + Sync {
    /// Saves a succeeded generation as a new draft.
    ///
    /// # Arguments
    ///
    /// * `snapshot` - The result and the inputs that produced it
    /// * `details` - Optional title and description
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The id of the new draft
    /// - `Err(_)`: Error occurred during save
    async fn save_draft(&self, snapshot: &LabSnapshot, details: &DraftDetails) -> Result<String>;

    /// Finds a draft by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Draft))`: Draft found
    /// - `Ok(None)`: Draft not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_id(&self, draft_id: &str) -> Result<Option<Draft>>;

    /// Applies `patch` to a draft and refreshes its `updated_at`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Draft))`: The updated draft
    /// - `Ok(None)`: Draft not found
    async fn update(&self, draft_id: &str, patch: DraftPatch) -> Result<Option<Draft>>;

    /// Lists all drafts, most recently updated first.
    async fn list(&self) -> Result<Vec<Draft>>;

    /// Deletes a draft.
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: Draft deleted
    /// - `Ok(false)`: Draft did not exist
    /// - `Err(_)`: Error occurred during deletion
    async fn delete(&self, draft_id: &str) -> Result<bool>;
}
