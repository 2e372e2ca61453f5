//! Session domain model.

use crate::error::ValidationError;
use crate::garment::Garment;
use crate::generation::{GeneratedImage, GenerationRequest};
use crate::image::SourceImage;
use crate::style::StyleParams;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{AsRefStr, Display};

/// Identifies one generation job within a store.
///
/// Tokens are issued from a monotonically increasing epoch and are never
/// reused, so a completion carrying an old token can always be told apart
/// from the current job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobToken(u64);

impl JobToken {
    pub fn new(epoch: u64) -> Self {
        Self(epoch)
    }

    pub fn epoch(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for JobToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle status of the current generation job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "lowercase")]
pub enum JobStatus {
    /// No job, or the last one was cancelled.
    #[default]
    Idle,
    /// A request is in flight.
    Running,
    /// The service returned a result.
    Succeeded,
    /// The service failed or timed out.
    Failed,
}

/// The current (or most recent) generation job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationJob {
    /// Token of the job; `None` once the job has been cancelled or reset.
    pub token: Option<JobToken>,
    pub status: JobStatus,
    /// Inputs recorded at `begin_generation`.
    pub inputs: Option<GenerationRequest>,
    pub result: Option<GeneratedImage>,
    /// Failure reason while `Failed`.
    pub failure: Option<String>,
}

impl GenerationJob {
    pub fn is_running(&self) -> bool {
        self.status == JobStatus::Running
    }
}

/// Full mutable state of one Lab workspace visit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub source_image: Option<SourceImage>,
    /// Garments in insertion order; ids are unique.
    pub garments: Vec<Garment>,
    pub style_params: StyleParams,
    pub job: GenerationJob,
}

impl Session {
    /// Returns true when the session is in its initial state.
    pub fn is_empty(&self) -> bool {
        self.source_image.is_none()
            && self.garments.is_empty()
            && self.style_params.is_empty()
            && self.job == GenerationJob::default()
    }

    pub fn garment(&self, id: &str) -> Option<&Garment> {
        self.garments.iter().find(|g| g.id == id)
    }

    pub fn contains_garment(&self, id: &str) -> bool {
        self.garment(id).is_some()
    }

    /// Checks that a generation may be requested.
    pub fn check_inputs(&self) -> Result<(), ValidationError> {
        self.generation_request().map(|_| ())
    }

    /// Builds the request snapshot for a new job.
    pub fn generation_request(&self) -> Result<GenerationRequest, ValidationError> {
        let source_image = self
            .source_image
            .clone()
            .ok_or(ValidationError::MissingSourceImage)?;
        if self.garments.is_empty() {
            return Err(ValidationError::NoGarments);
        }
        Ok(GenerationRequest {
            source_image,
            garments: self.garments.clone(),
            style_params: self.style_params.clone(),
        })
    }

    /// Payload for the draft and publish collaborators.
    ///
    /// Only available while the job is `Succeeded`. Inputs come from the
    /// job's recorded snapshot so the payload matches the result.
    pub fn lab_snapshot(&self) -> Option<LabSnapshot> {
        if self.job.status != JobStatus::Succeeded {
            return None;
        }
        let inputs = self.job.inputs.as_ref()?;
        let result = self.job.result.clone()?;
        Some(LabSnapshot {
            source_image: inputs.source_image.clone(),
            garments: inputs.garments.clone(),
            style_params: inputs.style_params.clone(),
            result,
        })
    }
}

/// A succeeded generation together with the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabSnapshot {
    pub source_image: SourceImage,
    pub garments: Vec<Garment>,
    pub style_params: StyleParams,
    pub result: GeneratedImage,
}
