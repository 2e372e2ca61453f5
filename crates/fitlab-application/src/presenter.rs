//! Result presentation and terminal actions.

use crate::orchestrator::GenerationOrchestrator;
use fitlab_core::draft::{DraftDetails, DraftRepository};
use fitlab_core::error::{LabError, Result};
use fitlab_core::feed::{FeedPublisher, PostDetails};
use fitlab_core::generation::GeneratedImage;
use fitlab_core::navigation::{Navigator, Route};
use fitlab_core::session::{JobStatus, JobToken, LabSnapshot, SessionStore};
use std::sync::Arc;

/// What the Lab canvas should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterView {
    /// Nothing generated yet.
    AwaitingInput,
    /// A generation is in flight.
    Processing,
    /// A result is ready; draft and publish are available.
    Ready(GeneratedImage),
    /// The last generation failed; inputs can be edited or retried.
    Failed(String),
}

/// Renders session status and brokers the save-draft and publish actions.
pub struct ResultPresenter {
    store: Arc<SessionStore>,
    orchestrator: Arc<GenerationOrchestrator>,
    drafts: Arc<dyn DraftRepository>,
    publisher: Arc<dyn FeedPublisher>,
    navigator: Arc<dyn Navigator>,
}

impl ResultPresenter {
    pub fn new(
        store: Arc<SessionStore>,
        orchestrator: Arc<GenerationOrchestrator>,
        drafts: Arc<dyn DraftRepository>,
        publisher: Arc<dyn FeedPublisher>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            store,
            orchestrator,
            drafts,
            publisher,
            navigator,
        }
    }

    pub fn view(&self) -> PresenterView {
        let job = self.store.snapshot().job;
        match job.status {
            JobStatus::Idle => PresenterView::AwaitingInput,
            JobStatus::Running => PresenterView::Processing,
            JobStatus::Succeeded => match job.result {
                Some(result) => PresenterView::Ready(result),
                None => PresenterView::AwaitingInput,
            },
            JobStatus::Failed => PresenterView::Failed(job.failure.unwrap_or_default()),
        }
    }

    /// Whether save-draft and publish are available.
    pub fn has_result(&self) -> bool {
        matches!(self.view(), PresenterView::Ready(_))
    }

    /// Saves the current result as a draft.
    ///
    /// The session is kept so the user can keep iterating.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` when there is no result
    /// - `Persistence` when the draft could not be stored; the session is unchanged
    pub async fn save_draft(&self, details: &DraftDetails) -> Result<String> {
        let (_, snapshot) = self.ready_snapshot("save a draft")?;
        let draft_id = self.drafts.save_draft(&snapshot, details).await.map_err(|e| {
            tracing::warn!("[ResultPresenter] Saving draft failed: {}", e);
            into_persistence(e)
        })?;
        tracing::info!("[ResultPresenter] Saved draft {}", draft_id);
        Ok(draft_id)
    }

    /// Publishes the current result to the discovery feed.
    ///
    /// On success any running job is cancelled and the user is sent to the
    /// feed. The session is reset only if it still holds the published
    /// result; inputs changed while the publish was pending are kept.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` when there is no result
    /// - `Persistence` when publishing failed; the session is unchanged so the
    ///   user can retry without generating again
    pub async fn publish(&self, details: &PostDetails) -> Result<String> {
        let (token, snapshot) = self.ready_snapshot("publish")?;
        let post_id = self.publisher.publish(&snapshot, details).await.map_err(|e| {
            tracing::warn!("[ResultPresenter] Publishing failed: {}", e);
            into_persistence(e)
        })?;
        tracing::info!("[ResultPresenter] Published post {}", post_id);

        let unchanged = self.store.current_token() == Some(token);
        if let Some(cancelled) = self.orchestrator.cancel().await {
            tracing::info!("[ResultPresenter] Leaving Lab cancelled job {}", cancelled);
        }
        if unchanged {
            self.store.reset();
        } else {
            tracing::info!(
                "[ResultPresenter] Session moved past job {} while publishing, keeping inputs",
                token
            );
        }
        self.navigator.navigate(Route::Wall);
        Ok(post_id)
    }

    fn ready_snapshot(&self, operation: &str) -> Result<(JobToken, LabSnapshot)> {
        let session = self.store.snapshot();
        match (session.job.token, session.lab_snapshot()) {
            (Some(token), Some(snapshot)) => Ok((token, snapshot)),
            _ => Err(LabError::invalid_transition(operation, session.job.status)),
        }
    }
}

fn into_persistence(error: LabError) -> LabError {
    match error {
        LabError::Persistence(_) => error,
        other => LabError::Persistence(other.to_string()),
    }
}
