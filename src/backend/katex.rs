//! KaTeX backend (feature `katex`), runs KaTeX in an embedded JS engine.

use std::panic::{catch_unwind, AssertUnwindSafe};

use super::{MathOptions, MathRenderer, OutputFormat};
use crate::utils::error::{RenderError, RenderResult};

/// Renders through KaTeX, matching what the browser would produce.
///
/// With `throw_on_error` off, KaTeX itself renders malformed input as a
/// red error node and returns `Ok`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KatexRenderer;

impl KatexRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl MathRenderer for KatexRenderer {
    fn render_math(&self, source: &str, options: &MathOptions) -> RenderResult<String> {
        let output_type = match options.output_format {
            OutputFormat::HtmlAndMathml => katex::OutputType::HtmlAndMathml,
            OutputFormat::Mathml => katex::OutputType::Mathml,
        };
        let opts = katex::Opts::builder()
            .display_mode(options.display_mode)
            .throw_on_error(options.throw_on_error)
            .output_type(output_type)
            .build()
            .map_err(|e| RenderError::options(e.to_string()))?;

        catch_unwind(AssertUnwindSafe(|| katex::render_with_opts(source, &opts)))
            .map_err(RenderError::from_panic)?
            .map_err(|e| RenderError::backend(e.to_string()))
    }
}
