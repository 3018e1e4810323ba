//! # Mixtex
//!
//! Processing for question and answer text that mixes prose with LaTeX math.
//!
//! ## Features
//!
//! - **Segmentation**: split `$…$`, `$$…$$`, `\(…\)` and `\[…\]` spans out of
//!   plain text, losslessly
//! - **Rendering**: HTML or MathML markup, where one malformed formula never
//!   blocks the rest of the text
//! - **Authoring helpers**: best-effort plain-text ⇄ LaTeX conversion for an
//!   edit-in-plain, preview-in-LaTeX workflow
//!
//! ## Example
//!
//! ```
//! use mixtex::{plain_to_latex, render_mixed, split_latex_mixed, RenderMode};
//!
//! let segments = split_latex_mixed("Area is $\\pi r^2$.");
//! assert_eq!(segments.len(), 3);
//!
//! let latex = plain_to_latex("(1/2)");
//! assert_eq!(latex, r"$\frac{1}{2}$");
//!
//! let html = render_mixed(&latex, RenderMode::Html);
//! assert!(html.contains("<math"));
//! ```

pub mod backend;
pub mod core;
pub mod utils;
pub mod wasm;

pub use crate::backend::{BackendKind, MathOptions, MathRenderer, OutputFormat};
pub use crate::backend::{PassthroughRenderer, PulldownRenderer};
#[cfg(feature = "katex")]
pub use crate::backend::KatexRenderer;
pub use crate::core::convert::{latex_to_plain, plain_to_latex};
pub use crate::core::render::{
    render_mixed, render_mixed_with, MixedRenderer, RenderMode, RenderOptions, RenderReport,
};
pub use crate::core::segment::{
    contains_math, reconstruct, split_latex_mixed, Delimiter, Segment, SegmentKind,
};
pub use crate::utils::error::{RenderError, RenderFailure, RenderResult};
