//! pf-core: shared error type, image domain types, and configuration.
//!
//! This crate is the foundational dependency for the other pf-* crates. It
//! holds everything that is pure: the error taxonomy with its HTTP status
//! mapping, the image vocabulary (formats, dimensions, compression levels),
//! the linear range mapper and the per-operation format allow-lists.

pub mod config;
pub mod error;
pub mod image;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use image::*;
