//! Lab workspace composition.

use crate::input_collector::InputCollector;
use crate::orchestrator::{GenerationHandle, GenerationOrchestrator};
use crate::presenter::ResultPresenter;
use fitlab_core::config::LabConfig;
use fitlab_core::draft::DraftRepository;
use fitlab_core::error::Result;
use fitlab_core::feed::FeedPublisher;
use fitlab_core::generation::GenerationService;
use fitlab_core::navigation::Navigator;
use fitlab_core::session::{JobToken, SessionStore};
use std::sync::Arc;

/// External collaborators the Lab depends on.
#[derive(Clone)]
pub struct LabServices {
    pub generation: Arc<dyn GenerationService>,
    pub drafts: Arc<dyn DraftRepository>,
    pub publisher: Arc<dyn FeedPublisher>,
    pub navigator: Arc<dyn Navigator>,
}

/// One visit to the Lab.
///
/// Entering creates a fresh session store shared by the input collector,
/// the orchestrator and the result presenter. Leaving cancels any job that
/// is still running.
pub struct LabWorkspace {
    store: Arc<SessionStore>,
    collector: InputCollector,
    orchestrator: Arc<GenerationOrchestrator>,
    presenter: ResultPresenter,
}

impl LabWorkspace {
    /// Enters the Lab with an empty session.
    pub fn enter(services: LabServices, config: &LabConfig) -> Self {
        let store = Arc::new(SessionStore::new());
        let orchestrator = Arc::new(GenerationOrchestrator::new(
            store.clone(),
            services.generation,
            config.generation.timeout(),
        ));
        let collector = InputCollector::new(
            store.clone(),
            orchestrator.clone(),
            config.upload.max_file_size,
        );
        let presenter = ResultPresenter::new(
            store.clone(),
            orchestrator.clone(),
            services.drafts,
            services.publisher,
            services.navigator,
        );

        tracing::debug!("[LabWorkspace] Entered Lab");
        Self {
            store,
            collector,
            orchestrator,
            presenter,
        }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn collector(&self) -> &InputCollector {
        &self.collector
    }

    pub fn collector_mut(&mut self) -> &mut InputCollector {
        &mut self.collector
    }

    pub fn orchestrator(&self) -> &Arc<GenerationOrchestrator> {
        &self.orchestrator
    }

    pub fn presenter(&self) -> &ResultPresenter {
        &self.presenter
    }

    /// Starts a generation with the collected inputs.
    pub async fn generate(&self) -> Result<GenerationHandle> {
        self.collector.validate()?;
        self.orchestrator.start_generation().await
    }

    /// Leaves the Lab, cancelling a running job.
    ///
    /// # Returns
    ///
    /// The token of the job that was cancelled, if any.
    pub async fn leave(self) -> Option<JobToken> {
        let cancelled = self.orchestrator.cancel().await;
        tracing::debug!("[LabWorkspace] Left Lab (cancelled: {:?})", cancelled);
        cancelled
    }
}
