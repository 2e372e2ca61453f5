//! Generation domain module.
//!
//! # Module Structure
//!
//! - `model`: request snapshot and generated-image handle
//! - `service`: the external Generation Service contract
//!
//! # Usage
//!
//! ```ignore
//! use fitlab_core::generation::{GeneratedImage, GenerationRequest, GenerationService};
//! ```

mod model;
pub mod service;

// Re-export public API
pub use model::{GeneratedImage, GenerationRequest};
pub use service::GenerationService;
