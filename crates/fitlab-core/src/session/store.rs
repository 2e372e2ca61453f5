//! Observable session state container.

use super::model::{GenerationJob, JobStatus, JobToken, Session};
use crate::error::{LabError, Result};
use crate::garment::Garment;
use crate::generation::{GeneratedImage, GenerationRequest};
use crate::image::SourceImage;
use crate::style::StyleParamsPatch;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// Single source of truth for a Lab session.
///
/// `SessionStore` is responsible for:
/// - Applying every mutation atomically, in invocation order
/// - Enforcing the job lifecycle (Idle → Running → Succeeded/Failed/Idle)
/// - Issuing job tokens and discarding completions that carry a stale one
/// - Notifying subscribers after each state change
///
/// The store is shared as `Arc<SessionStore>` between the input collector,
/// the orchestrator and the result presenter. It never awaits.
#[derive(Debug)]
pub struct SessionStore {
    state: watch::Sender<Session>,
    /// Last issued job epoch. Survives `reset`.
    epoch: AtomicU64,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Creates a store holding an empty session.
    pub fn new() -> Self {
        let (state, _) = watch::channel(Session::default());
        Self {
            state,
            epoch: AtomicU64::new(0),
        }
    }

    /// Returns a consistent copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Returns the current job status.
    pub fn status(&self) -> JobStatus {
        self.state.borrow().job.status
    }

    /// Returns the token of the current job, if it is still valid.
    pub fn current_token(&self) -> Option<JobToken> {
        self.state.borrow().job.token
    }

    /// Subscribes to session changes.
    ///
    /// The receiver is notified after every state-changing operation.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Replaces the source image.
    ///
    /// A running job is cancelled and any finished result is dropped, since
    /// a result is only valid for the image that produced it.
    ///
    /// # Returns
    ///
    /// The token of the job that was cancelled, if one was running.
    pub fn set_source_image(&self, image: Option<SourceImage>) -> Option<JobToken> {
        self.mutate(|session| {
            let cancelled = match session.job.status {
                JobStatus::Running => session.job.token,
                _ => None,
            };
            if let Some(token) = cancelled {
                tracing::info!("[SessionStore] Source image replaced, cancelling job {}", token);
            }
            session.source_image = image;
            session.job = GenerationJob::default();
            (true, Ok(cancelled))
        })
        .unwrap_or(None)
    }

    /// Adds a garment to the session.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateGarment` if a garment with the same id is present.
    pub fn add_garment(&self, garment: Garment) -> Result<()> {
        self.mutate(|session| {
            if session.contains_garment(&garment.id) {
                return (false, Err(LabError::DuplicateGarment { id: garment.id }));
            }
            tracing::debug!("[SessionStore] Adding garment {} ({})", garment.id, garment.slot);
            session.garments.push(garment);
            (true, Ok(()))
        })
    }

    /// Removes a garment by id. Removing an absent id is a no-op.
    ///
    /// # Returns
    ///
    /// `true` if a garment was removed.
    pub fn remove_garment(&self, id: &str) -> bool {
        self.mutate(|session| {
            let before = session.garments.len();
            session.garments.retain(|g| g.id != id);
            let removed = session.garments.len() != before;
            (removed, Ok(removed))
        })
        .unwrap_or(false)
    }

    /// Shallow-merges `patch` into the style parameters.
    pub fn update_style_params(&self, patch: StyleParamsPatch) {
        if patch.is_empty() {
            return;
        }
        let _ = self.mutate(|session| {
            session.style_params.merge(patch);
            (true, Ok(()))
        });
    }

    /// Moves the session into `Running` and records the input snapshot.
    ///
    /// Allowed from Idle, Failed and Succeeded; a previous result is cleared.
    ///
    /// # Errors
    ///
    /// - `Validation` if the source image or garments are missing
    /// - `InvalidTransition` if a job is already running
    pub fn begin_generation(&self) -> Result<(JobToken, GenerationRequest)> {
        self.mutate(|session| {
            if session.job.is_running() {
                return (
                    false,
                    Err(LabError::invalid_transition("begin generation", JobStatus::Running)),
                );
            }
            let request = match session.generation_request() {
                Ok(request) => request,
                Err(e) => return (false, Err(e.into())),
            };
            let token = JobToken::new(self.epoch.fetch_add(1, Ordering::SeqCst) + 1);
            tracing::info!(
                "[SessionStore] Job {} started with {} garment(s)",
                token,
                request.garments.len()
            );
            session.job = GenerationJob {
                token: Some(token),
                status: JobStatus::Running,
                inputs: Some(request.clone()),
                result: None,
                failure: None,
            };
            (true, Ok((token, request)))
        })
    }

    /// Stores the result of the running job.
    ///
    /// # Errors
    ///
    /// Returns `StaleJobDiscarded` if `token` is not the running job's token.
    /// The session is left untouched in that case.
    pub fn complete_generation(&self, token: JobToken, result: GeneratedImage) -> Result<()> {
        self.mutate(|session| {
            if let Err(e) = Self::ensure_current(&session.job, token) {
                return (false, Err(e));
            }
            tracing::info!("[SessionStore] Job {} succeeded: {}", token, result.image_url);
            session.job.status = JobStatus::Succeeded;
            session.job.result = Some(result);
            session.job.failure = None;
            (true, Ok(()))
        })
    }

    /// Marks the running job as failed, keeping all inputs for a retry.
    ///
    /// # Errors
    ///
    /// Returns `StaleJobDiscarded` if `token` is not the running job's token.
    pub fn fail_generation(&self, token: JobToken, reason: impl Into<String>) -> Result<()> {
        let reason = reason.into();
        self.mutate(|session| {
            if let Err(e) = Self::ensure_current(&session.job, token) {
                return (false, Err(e));
            }
            tracing::warn!("[SessionStore] Job {} failed: {}", token, reason);
            session.job.status = JobStatus::Failed;
            session.job.result = None;
            session.job.failure = Some(reason);
            (true, Ok(()))
        })
    }

    /// Cancels the running job and invalidates its token.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if no job is running.
    pub fn cancel_generation(&self) -> Result<JobToken> {
        self.mutate(|session| {
            let token = match (session.job.status, session.job.token) {
                (JobStatus::Running, Some(token)) => token,
                (status, _) => {
                    return (false, Err(LabError::invalid_transition("cancel generation", status)));
                }
            };
            tracing::info!("[SessionStore] Job {} cancelled", token);
            session.job = GenerationJob::default();
            (true, Ok(token))
        })
    }

    /// Clears the whole session back to its initial state.
    ///
    /// The job token is invalidated; the epoch keeps counting so tokens are
    /// never reused.
    pub fn reset(&self) {
        let _ = self.mutate(|session| {
            tracing::debug!("[SessionStore] Resetting session");
            *session = Session::default();
            (true, Ok(()))
        });
    }

    fn ensure_current(job: &GenerationJob, token: JobToken) -> Result<()> {
        if job.is_running() && job.token == Some(token) {
            return Ok(());
        }
        tracing::debug!(
            "[SessionStore] Discarding stale job {} (current: {:?}, status: {})",
            token,
            job.token,
            job.status
        );
        Err(LabError::StaleJobDiscarded { token })
    }

    /// Applies `f` under the channel's write lock.
    ///
    /// `f` returns whether the session changed (which decides if subscribers
    /// are notified) together with the operation result.
    fn mutate<T>(&self, f: impl FnOnce(&mut Session) -> (bool, Result<T>)) -> Result<T> {
        let mut outcome = Err(LabError::internal("session mutation was not applied"));
        self.state.send_if_modified(|session| {
            let (changed, result) = f(session);
            outcome = result;
            changed
        });
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::garment::GarmentSlot;
    use crate::style::{Fit, StyleParams};
    use proptest::prelude::*;

    fn image(tag: u8) -> SourceImage {
        SourceImage::new(vec![tag; 4], "image/png")
    }

    fn top(id: &str) -> Garment {
        Garment::new(id, GarmentSlot::Top, "u1")
    }

    fn ready_store() -> SessionStore {
        let store = SessionStore::new();
        store.set_source_image(Some(image(1)));
        store.add_garment(top("top-1")).unwrap();
        store
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = SessionStore::new();
        assert!(store.snapshot().is_empty());
        assert_eq!(store.status(), JobStatus::Idle);
        assert_eq!(store.current_token(), None);
    }

    #[test]
    fn test_add_garment_rejects_duplicate_id() {
        let store = SessionStore::new();
        store.add_garment(top("top-1")).unwrap();

        let err = store.add_garment(top("top-1")).unwrap_err();
        assert_eq!(err, LabError::DuplicateGarment { id: "top-1".to_string() });
        assert_eq!(store.snapshot().garments.len(), 1);
    }

    #[test]
    fn test_garments_keep_insertion_order_and_allow_shared_slot() {
        let store = SessionStore::new();
        store.add_garment(top("b")).unwrap();
        store.add_garment(top("a")).unwrap();
        store
            .add_garment(Garment::new("c", GarmentSlot::Footwear, "u3"))
            .unwrap();

        let ids: Vec<_> = store.snapshot().garments.into_iter().map(|g| g.id).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_remove_absent_garment_is_noop() {
        let store = SessionStore::new();
        store.add_garment(top("top-1")).unwrap();

        assert!(!store.remove_garment("missing"));
        assert!(store.remove_garment("top-1"));
        assert!(!store.remove_garment("top-1"));
        assert!(store.snapshot().garments.is_empty());
    }

    #[test]
    fn test_update_style_params_merges() {
        let store = SessionStore::new();
        store.update_style_params(StyleParamsPatch::fit(Fit::Tight));
        store.update_style_params(StyleParamsPatch::style("minimal"));

        assert_eq!(
            store.snapshot().style_params,
            StyleParams {
                style: Some("minimal".to_string()),
                fit: Some(Fit::Tight),
                occasion: None,
            }
        );
    }

    #[test]
    fn test_begin_generation_requires_image() {
        let store = SessionStore::new();
        store.add_garment(top("top-1")).unwrap();
        let before = store.snapshot();

        let err = store.begin_generation().unwrap_err();
        assert_eq!(err, LabError::Validation(ValidationError::MissingSourceImage));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_begin_generation_requires_garments() {
        let store = SessionStore::new();
        store.set_source_image(Some(image(1)));
        let before = store.snapshot();

        let err = store.begin_generation().unwrap_err();
        assert_eq!(err, LabError::Validation(ValidationError::NoGarments));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_begin_generation_records_inputs() {
        let store = ready_store();
        store.update_style_params(StyleParamsPatch::occasion("gala"));

        let (token, request) = store.begin_generation().unwrap();
        let session = store.snapshot();

        assert_eq!(session.job.status, JobStatus::Running);
        assert_eq!(session.job.token, Some(token));
        assert_eq!(session.job.inputs.as_ref(), Some(&request));
        assert_eq!(request.style_params.occasion.as_deref(), Some("gala"));
    }

    #[test]
    fn test_begin_generation_rejected_while_running() {
        let store = ready_store();
        store.begin_generation().unwrap();

        let err = store.begin_generation().unwrap_err();
        assert!(matches!(err, LabError::InvalidTransition { .. }));
    }

    #[test]
    fn test_complete_generation_stores_result() {
        let store = ready_store();
        let (token, _) = store.begin_generation().unwrap();

        store
            .complete_generation(token, GeneratedImage::new("gen-1", "H"))
            .unwrap();

        let session = store.snapshot();
        assert_eq!(session.job.status, JobStatus::Succeeded);
        assert_eq!(session.job.result.unwrap().image_url, "H");
    }

    #[test]
    fn test_fail_generation_keeps_inputs() {
        let store = ready_store();
        let (token, _) = store.begin_generation().unwrap();

        store.fail_generation(token, "model overloaded").unwrap();

        let session = store.snapshot();
        assert_eq!(session.job.status, JobStatus::Failed);
        assert!(session.job.result.is_none());
        assert_eq!(session.job.failure.as_deref(), Some("model overloaded"));
        assert_eq!(session.source_image, Some(image(1)));
        assert_eq!(session.garments.len(), 1);
    }

    #[test]
    fn test_retry_after_failure_issues_new_token() {
        let store = ready_store();
        let (first, _) = store.begin_generation().unwrap();
        store.fail_generation(first, "boom").unwrap();

        let (second, _) = store.begin_generation().unwrap();
        assert!(second > first);
        assert_eq!(store.snapshot().job.failure, None);
    }

    #[test]
    fn test_begin_after_success_clears_previous_result() {
        let store = ready_store();
        let (token, _) = store.begin_generation().unwrap();
        store
            .complete_generation(token, GeneratedImage::new("gen-1", "H"))
            .unwrap();

        store.begin_generation().unwrap();
        let session = store.snapshot();
        assert_eq!(session.job.status, JobStatus::Running);
        assert!(session.job.result.is_none());
    }

    #[test]
    fn test_set_source_image_while_running_invalidates_token() {
        let store = ready_store();
        let (token, _) = store.begin_generation().unwrap();

        let cancelled = store.set_source_image(Some(image(2)));
        assert_eq!(cancelled, Some(token));
        assert_eq!(store.status(), JobStatus::Idle);

        let err = store
            .complete_generation(token, GeneratedImage::new("gen-1", "H1"))
            .unwrap_err();
        assert!(err.is_stale());

        let session = store.snapshot();
        assert_eq!(session.job.status, JobStatus::Idle);
        assert!(session.job.result.is_none());
        assert_eq!(session.source_image, Some(image(2)));
    }

    #[test]
    fn test_set_source_image_clears_finished_result() {
        let store = ready_store();
        let (token, _) = store.begin_generation().unwrap();
        store
            .complete_generation(token, GeneratedImage::new("gen-1", "H"))
            .unwrap();

        assert_eq!(store.set_source_image(None), None);
        let session = store.snapshot();
        assert_eq!(session.job, GenerationJob::default());
        assert!(session.source_image.is_none());
    }

    #[test]
    fn test_cancel_generation_only_from_running() {
        let store = ready_store();
        assert!(matches!(
            store.cancel_generation(),
            Err(LabError::InvalidTransition { .. })
        ));

        let (token, _) = store.begin_generation().unwrap();
        assert_eq!(store.cancel_generation().unwrap(), token);
        assert_eq!(store.status(), JobStatus::Idle);

        let err = store.fail_generation(token, "late").unwrap_err();
        assert!(err.is_stale());
        assert_eq!(store.snapshot().job.failure, None);
    }

    #[test]
    fn test_duplicate_completion_is_discarded() {
        let store = ready_store();
        let (token, _) = store.begin_generation().unwrap();
        store
            .complete_generation(token, GeneratedImage::new("gen-1", "H"))
            .unwrap();

        let err = store
            .complete_generation(token, GeneratedImage::new("gen-2", "H2"))
            .unwrap_err();
        assert!(err.is_stale());
        assert_eq!(store.snapshot().job.result.unwrap().id, "gen-1");
    }

    #[test]
    fn test_reset_clears_everything_and_tokens_keep_increasing() {
        let store = ready_store();
        store.update_style_params(StyleParamsPatch::fit(Fit::Loose));
        let (token, _) = store.begin_generation().unwrap();

        store.reset();
        assert!(store.snapshot().is_empty());
        assert!(store.complete_generation(token, GeneratedImage::new("g", "H")).is_err());

        store.set_source_image(Some(image(3)));
        store.add_garment(top("top-2")).unwrap();
        let (next, _) = store.begin_generation().unwrap();
        assert!(next > token);
    }

    #[tokio::test]
    async fn test_subscribers_are_notified() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();

        store.add_garment(top("top-1")).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().garments.len(), 1);

        // Rejected operations do not notify.
        let _ = store.add_garment(top("top-1"));
        assert!(!rx.has_changed().unwrap());
    }

    #[derive(Debug, Clone)]
    enum GarmentOp {
        Add(u8),
        Remove(u8),
    }

    fn garment_op() -> impl Strategy<Value = GarmentOp> {
        prop_oneof![
            (0u8..6).prop_map(GarmentOp::Add),
            (0u8..6).prop_map(GarmentOp::Remove),
        ]
    }

    proptest! {
        #[test]
        fn prop_garment_set_matches_added_minus_removed(
            ops in proptest::collection::vec(garment_op(), 0..40)
        ) {
            let store = SessionStore::new();
            let mut expected: Vec<String> = Vec::new();

            for op in ops {
                match op {
                    GarmentOp::Add(n) => {
                        let id = format!("g-{}", n);
                        let result = store.add_garment(top(&id));
                        if expected.contains(&id) {
                            prop_assert!(result.is_err());
                        } else {
                            prop_assert!(result.is_ok());
                            expected.push(id);
                        }
                    }
                    GarmentOp::Remove(n) => {
                        let id = format!("g-{}", n);
                        let removed = store.remove_garment(&id);
                        prop_assert_eq!(removed, expected.contains(&id));
                        expected.retain(|e| e != &id);
                    }
                }
            }

            let ids: Vec<String> = store.snapshot().garments.into_iter().map(|g| g.id).collect();
            prop_assert_eq!(ids, expected);
        }
    }
}
