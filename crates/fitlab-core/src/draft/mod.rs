//! Draft domain module.
//!
//! A draft is a persisted, unpublished snapshot of a succeeded generation.
//!
//! # Module Structure
//!
//! - `model`: `Draft` record, user-supplied `DraftDetails` and `DraftPatch`
//! - `repository`: Draft persistence trait
//!
//! # Usage
//!
//! ```ignore
//! use fitlab_core::draft::{Draft, DraftDetails, DraftRepository};
//! ```

mod model;
pub mod repository;

// Re-export public API
pub use model::{Draft, DraftDetails, DraftPatch};
pub use repository::DraftRepository;
