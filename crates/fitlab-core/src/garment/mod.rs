//! Garment domain module.
//!
//! A garment is a reference piece of clothing the user wants to try on.
//!
//! # Usage
//!
//! ```ignore
//! use fitlab_core::garment::{Garment, GarmentSlot};
//! ```

mod model;

// Re-export public API
pub use model::{Garment, GarmentSlot};
