pub mod acquisition;
pub mod config;
pub mod draft;
pub mod error;
pub mod feed;
pub mod garment;
pub mod generation;
pub mod image;
pub mod navigation;
pub mod session;
pub mod style;

// Re-export common error type
pub use error::{LabError, Result, ValidationError};
