//! Math typesetting backends
//!
//! The renderer hands every math segment to a [`MathRenderer`]. Backends:
//! - [`PulldownRenderer`]: pure Rust MathML via `pulldown-latex` (default)
//! - [`PassthroughRenderer`]: escaped TeX for client-side typesetting
//! - `KatexRenderer`: KaTeX HTML+MathML (feature `katex`)

mod passthrough;
mod pulldown;

#[cfg(feature = "katex")]
mod katex;

pub use passthrough::PassthroughRenderer;
pub use pulldown::PulldownRenderer;

#[cfg(feature = "katex")]
pub use self::katex::KatexRenderer;

use serde::{Deserialize, Serialize};

use crate::utils::error::RenderResult;

/// Output requested from the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputFormat {
    /// HTML with embedded MathML for accessibility
    #[default]
    HtmlAndMathml,
    /// MathML only
    Mathml,
}

/// Options passed to the backend for one math fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MathOptions {
    /// Render as display (block) math
    pub display_mode: bool,
    /// Report malformed math as an error instead of best-effort output
    pub throw_on_error: bool,
    pub output_format: OutputFormat,
}

impl MathOptions {
    pub fn inline(output_format: OutputFormat) -> Self {
        Self {
            display_mode: false,
            throw_on_error: false,
            output_format,
        }
    }

    pub fn display(output_format: OutputFormat) -> Self {
        Self {
            display_mode: true,
            ..Self::inline(output_format)
        }
    }
}

/// A math typesetting collaborator.
///
/// Implementations turn one LaTeX fragment (without delimiters) into markup.
/// An `Err`, or an `Ok` that is blank, makes the caller fall back to the
/// escaped source for that fragment.
pub trait MathRenderer {
    fn render_math(&self, source: &str, options: &MathOptions) -> RenderResult<String>;
}

impl<R: MathRenderer + ?Sized> MathRenderer for &R {
    fn render_math(&self, source: &str, options: &MathOptions) -> RenderResult<String> {
        (**self).render_math(source, options)
    }
}

impl<R: MathRenderer + ?Sized> MathRenderer for Box<R> {
    fn render_math(&self, source: &str, options: &MathOptions) -> RenderResult<String> {
        (**self).render_math(source, options)
    }
}

/// Backend selector for the CLI and WASM front ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Pulldown,
    Passthrough,
    #[cfg(feature = "katex")]
    Katex,
}

impl BackendKind {
    /// Instantiate the backend.
    pub fn build(self) -> Box<dyn MathRenderer> {
        match self {
            BackendKind::Pulldown => Box::new(PulldownRenderer::new()),
            BackendKind::Passthrough => Box::new(PassthroughRenderer::new()),
            #[cfg(feature = "katex")]
            BackendKind::Katex => Box::new(KatexRenderer::new()),
        }
    }
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pulldown" => Ok(BackendKind::Pulldown),
            "passthrough" => Ok(BackendKind::Passthrough),
            #[cfg(feature = "katex")]
            "katex" => Ok(BackendKind::Katex),
            other => Err(format!("unknown math backend '{}'", other)),
        }
    }
}
