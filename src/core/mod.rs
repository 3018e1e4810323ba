//! Core text processing
//!
//! - [`segment`]: split mixed text into text and math spans
//! - [`render`]: turn a mixed string into markup
//! - [`convert`]: plain-text ⇄ LaTeX heuristics for the editor

pub mod convert;
pub mod render;
pub mod segment;
