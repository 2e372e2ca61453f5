//! Generation session domain module.
//!
//! This module contains the Lab session aggregate and the store that owns
//! every mutation of it.
//!
//! # Module Structure
//!
//! - `model`: Session aggregate, job status and job tokens
//! - `store`: `SessionStore`, the observable state container
//!
//! # Usage
//!
//! ```ignore
//! use fitlab_core::session::{JobStatus, Session, SessionStore};
//! ```

mod model;
mod store;

// Re-export public API
pub use model::{GenerationJob, JobStatus, JobToken, LabSnapshot, Session};
pub use store::SessionStore;
