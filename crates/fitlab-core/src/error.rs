//! Error types for the Fitlab application.

use crate::session::{JobStatus, JobToken};
use thiserror::Error;

/// Input problems detected before a generation job is created.
///
/// These never reach the session state machine: the action that produced
/// them is blocked and the session is left as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No photograph has been uploaded yet.
    #[error("Please upload an image before generating")]
    MissingSourceImage,

    /// The garment set is empty.
    #[error("Please add at least one garment before generating")]
    NoGarments,

    /// The uploaded payload contains no bytes.
    #[error("The uploaded image is empty")]
    EmptyImage,

    /// The uploaded payload is not an image.
    #[error("Unsupported image type: {mime_type}")]
    UnsupportedImageType { mime_type: String },

    /// The uploaded payload exceeds the configured size limit.
    #[error("Image is too large: {size} bytes (limit {limit} bytes)")]
    ImageTooLarge { size: u64, limit: u64 },
}

/// A shared error type for the entire Fitlab application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabError {
    /// Generation inputs are missing or invalid
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A garment with the same id is already part of the session
    #[error("Garment '{id}' is already in the session")]
    DuplicateGarment { id: String },

    /// The requested operation is not allowed in the current job status
    #[error("Cannot {operation} while generation is {status}")]
    InvalidTransition {
        operation: String,
        status: JobStatus,
    },

    /// The generation service reported a failure
    #[error("Generation failed: {0}")]
    Service(String),

    /// The generation service did not answer in time
    #[error("Generation timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// Draft or feed persistence failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// A completion arrived for a job that is no longer current
    #[error("Discarded result of stale generation job {token}")]
    StaleJobDiscarded { token: JobToken },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LabError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an InvalidTransition error
    pub fn invalid_transition(operation: impl Into<String>, status: JobStatus) -> Self {
        Self::InvalidTransition {
            operation: operation.into(),
            status,
        }
    }

    /// Creates a Service error
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service(message.into())
    }

    /// Creates a Persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from the generation service.
    ///
    /// Timeouts count as service failures.
    pub fn is_service_failure(&self) -> bool {
        matches!(self, Self::Service(_) | Self::Timeout { .. })
    }

    /// Check if this is a persistence error
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }

    /// Check if this is the internal stale-job guard.
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleJobDiscarded { .. })
    }

    /// Check if the error should be shown to the user.
    ///
    /// Stale-job discards are diagnostics only.
    pub fn is_user_visible(&self) -> bool {
        !self.is_stale()
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for LabError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for LabError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for LabError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for LabError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for LabError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, LabError>`.
pub type Result<T> = std::result::Result<T, LabError>;
