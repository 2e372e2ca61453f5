//! Generation orchestration.
//!
//! Bridges the session store and the external Generation Service, keeping
//! at most one request in flight per session.

use fitlab_core::error::{LabError, Result};
use fitlab_core::generation::{GeneratedImage, GenerationRequest, GenerationService};
use fitlab_core::session::{JobStatus, JobToken, SessionStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// How a generation job ended, as seen by the task that ran it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The result was stored in the session.
    Succeeded(GeneratedImage),
    /// The failure (or timeout) was recorded in the session.
    Failed(String),
    /// The job was cancelled before the service answered.
    Cancelled,
    /// The service answered, but the job had been superseded; the answer
    /// was dropped.
    Discarded,
}

/// A started generation job.
#[derive(Debug)]
pub struct GenerationHandle {
    token: JobToken,
    task: JoinHandle<GenerationOutcome>,
}

impl GenerationHandle {
    pub fn token(&self) -> JobToken {
        self.token
    }

    /// Waits for the job's task to finish.
    pub async fn outcome(self) -> GenerationOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => GenerationOutcome::Cancelled,
            Err(e) => GenerationOutcome::Failed(format!("generation task panicked: {}", e)),
        }
    }
}

struct InFlight {
    token: JobToken,
    cancel: CancellationToken,
}

/// Starts, cancels and settles generation jobs.
///
/// `GenerationOrchestrator` is responsible for:
/// - Validating inputs before a job is created
/// - Cancelling the running job before a new one starts
/// - Calling the Generation Service with a timeout and a cancellation token
/// - Applying the result or failure to the store under the job's token
pub struct GenerationOrchestrator {
    store: Arc<SessionStore>,
    service: Arc<dyn GenerationService>,
    timeout: Duration,
    in_flight: Arc<Mutex<Option<InFlight>>>,
}

impl GenerationOrchestrator {
    /// Creates a new orchestrator.
    ///
    /// # Arguments
    ///
    /// * `store` - The session store shared with the other Lab components
    /// * `service` - The external Generation Service
    /// * `timeout` - Upper bound for a single service call
    pub fn new(
        store: Arc<SessionStore>,
        service: Arc<dyn GenerationService>,
        timeout: Duration,
    ) -> Self {
        Self {
            store,
            service,
            timeout,
            in_flight: Arc::new(Mutex::new(None)),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn is_running(&self) -> bool {
        self.store.status() == JobStatus::Running
    }

    /// Starts a new generation job.
    ///
    /// A job that is still running is cancelled first. Retrying after a
    /// failure is just another call to this method.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error, without touching the session, when the
    /// source image or garments are missing.
    pub async fn start_generation(&self) -> Result<GenerationHandle> {
        self.store.snapshot().check_inputs()?;

        if let Some(previous) = self.cancel().await {
            tracing::info!("[Orchestrator] Superseding running job {}", previous);
        }

        let (token, request) = self.store.begin_generation()?;
        let cancel = CancellationToken::new();
        *self.in_flight.lock().await = Some(InFlight {
            token,
            cancel: cancel.clone(),
        });

        let store = self.store.clone();
        let service = self.service.clone();
        let in_flight = self.in_flight.clone();
        let timeout = self.timeout;

        let task = tokio::spawn(async move {
            let outcome = run_job(store, service, token, request, cancel, timeout).await;

            let mut guard = in_flight.lock().await;
            if guard.as_ref().map(|f| f.token) == Some(token) {
                *guard = None;
            }
            outcome
        });

        Ok(GenerationHandle { token, task })
    }

    /// Cancels the running job, if any.
    ///
    /// The state-level cancel is strict: the job's token is invalidated so a
    /// late answer is ignored. The transport-level cancel is best-effort.
    ///
    /// # Returns
    ///
    /// The token of the cancelled job.
    pub async fn cancel(&self) -> Option<JobToken> {
        if let Some(in_flight) = self.in_flight.lock().await.take() {
            tracing::debug!("[Orchestrator] Aborting request for job {}", in_flight.token);
            in_flight.cancel.cancel();
        }
        self.store.cancel_generation().ok()
    }
}

async fn run_job(
    store: Arc<SessionStore>,
    service: Arc<dyn GenerationService>,
    token: JobToken,
    request: GenerationRequest,
    cancel: CancellationToken,
    timeout: Duration,
) -> GenerationOutcome {
    let response = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::debug!("[Orchestrator] Job {} cancelled before the service answered", token);
            return GenerationOutcome::Cancelled;
        }
        response = tokio::time::timeout(timeout, service.generate(&request, cancel.clone())) => response,
    };

    match response {
        Ok(Ok(image)) => match store.complete_generation(token, image.clone()) {
            Ok(()) => GenerationOutcome::Succeeded(image),
            Err(e) => settle_rejected(token, e),
        },
        Ok(Err(e)) => record_failure(&store, token, e),
        Err(_) => record_failure(
            &store,
            token,
            LabError::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            },
        ),
    }
}

fn record_failure(store: &SessionStore, token: JobToken, error: LabError) -> GenerationOutcome {
    let reason = error.to_string();
    match store.fail_generation(token, reason.clone()) {
        Ok(()) => GenerationOutcome::Failed(reason),
        Err(e) => settle_rejected(token, e),
    }
}

fn settle_rejected(token: JobToken, error: LabError) -> GenerationOutcome {
    if error.is_stale() {
        tracing::debug!("[Orchestrator] Dropped answer for superseded job {}", token);
        GenerationOutcome::Discarded
    } else {
        tracing::error!("[Orchestrator] Could not settle job {}: {}", token, error);
        GenerationOutcome::Failed(error.to_string())
    }
}
