//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Error types for the math backend seam
//! - HTML escaping

pub mod error;
pub mod escape;

// Re-export commonly used items
pub use error::{RenderError, RenderFailure, RenderResult};
pub use escape::escape_html;
