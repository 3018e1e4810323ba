//! Passthrough backend: leaves typesetting to KaTeX/MathJax in the browser.

use super::{MathOptions, MathRenderer, OutputFormat};
use crate::utils::error::RenderResult;
use crate::utils::escape::escape_html;

/// Emits the escaped TeX source re-delimited with `\(…\)` / `\[…\]`, for
/// a client-side auto-render pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughRenderer;

impl PassthroughRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl MathRenderer for PassthroughRenderer {
    fn render_math(&self, source: &str, options: &MathOptions) -> RenderResult<String> {
        let escaped = escape_html(source);
        let display = if options.display_mode { "block" } else { "inline" };

        Ok(match (options.output_format, options.display_mode) {
            (OutputFormat::Mathml, _) => format!(
                r#"<math display="{}"><semantics><annotation encoding="application/x-tex">{}</annotation></semantics></math>"#,
                display, escaped
            ),
            (OutputFormat::HtmlAndMathml, true) => {
                format!(r#"<div class="math display">\[{}\]</div>"#, escaped)
            }
            (OutputFormat::HtmlAndMathml, false) => {
                format!(r#"<span class="math inline">\({}\)</span>"#, escaped)
            }
        })
    }
}
