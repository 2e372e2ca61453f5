//! Application layer for FITLAB.
//!
//! This crate provides the Lab use cases that coordinate the session store
//! with the external collaborators (generation, drafts, feed).

pub mod feed_paginator;
pub mod input_collector;
pub mod orchestrator;
pub mod presenter;
pub mod workspace;

pub use feed_paginator::FeedPaginator;
pub use input_collector::InputCollector;
pub use orchestrator::{GenerationHandle, GenerationOrchestrator, GenerationOutcome};
pub use presenter::{PresenterView, ResultPresenter};
pub use workspace::{LabServices, LabWorkspace};
