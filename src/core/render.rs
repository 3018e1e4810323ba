//! Mixed text/math → markup
//!
//! Text segments are HTML-escaped with newlines turned into line breaks.
//! Math segments go to a [`MathRenderer`]; a segment the backend cannot
//! render shows up as its escaped source in an error span, and the rest of
//! the string still renders. Rendering never fails as a whole.

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::backend::{MathOptions, MathRenderer, OutputFormat, PulldownRenderer};
use crate::core::segment::{split_latex_mixed, Segment, SegmentKind};
use crate::utils::error::{RenderError, RenderFailure, RenderResult};
use crate::utils::escape::escape_html;

// =============================================================================
// Render Options
// =============================================================================

/// Markup flavour for math segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// HTML with embedded MathML
    #[default]
    Html,
    /// MathML only
    Mathml,
}

impl RenderMode {
    pub fn output_format(self) -> OutputFormat {
        match self {
            RenderMode::Html => OutputFormat::HtmlAndMathml,
            RenderMode::Mathml => OutputFormat::Mathml,
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::Html => write!(f, "html"),
            RenderMode::Mathml => write!(f, "mathml"),
        }
    }
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(RenderMode::Html),
            "mathml" => Ok(RenderMode::Mathml),
            other => Err(format!("unknown render mode '{}' (expected html or mathml)", other)),
        }
    }
}

/// Options for rendering mixed text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Markup flavour for math
    /// Default: html
    pub mode: RenderMode,

    /// Markup substituted for every newline in text segments
    /// Default: `<br/>`
    pub line_break: String,

    /// CSS class of the span wrapping math that failed to render
    /// Default: `math-error`
    pub error_class: String,

    /// Ask the backend to report malformed math instead of rendering it
    /// best-effort
    /// Default: false
    pub throw_on_error: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: RenderMode::Html,
            line_break: "<br/>".to_string(),
            error_class: "math-error".to_string(),
            throw_on_error: false,
        }
    }
}

impl RenderOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// HTML with embedded MathML
    pub fn html() -> Self {
        Self::default()
    }

    /// MathML only
    pub fn mathml() -> Self {
        Self {
            mode: RenderMode::Mathml,
            ..Self::default()
        }
    }

    fn math_options(&self, display: bool) -> MathOptions {
        MathOptions {
            display_mode: display,
            throw_on_error: self.throw_on_error,
            output_format: self.mode.output_format(),
        }
    }
}

// =============================================================================
// Renderer
// =============================================================================

/// Rendered markup plus the math segments that fell back to source
#[derive(Debug, Clone)]
pub struct RenderReport {
    pub output: String,
    pub failures: Vec<RenderFailure>,
}

impl RenderReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Get failures as formatted strings
    pub fn format_failures(&self) -> Vec<String> {
        self.failures.iter().map(|f| f.to_string()).collect()
    }
}

/// Renders mixed text/math strings with a fixed backend and options
#[derive(Debug, Clone)]
pub struct MixedRenderer<R = PulldownRenderer> {
    backend: R,
    options: RenderOptions,
}

impl MixedRenderer<PulldownRenderer> {
    pub fn new() -> Self {
        Self::with_options(RenderOptions::default())
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self::with_backend(PulldownRenderer::new(), options)
    }
}

impl Default for MixedRenderer<PulldownRenderer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: MathRenderer> MixedRenderer<R> {
    pub fn with_backend(backend: R, options: RenderOptions) -> Self {
        Self { backend, options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render `text` to markup.
    pub fn render(&self, text: &str) -> String {
        self.render_with_report(text).output
    }

    /// Render `text`, also returning which math segments fell back.
    pub fn render_with_report(&self, text: &str) -> RenderReport {
        let segments = split_latex_mixed(text);
        tracing::debug!(
            segments = segments.len(),
            mode = %self.options.mode,
            "rendering mixed text"
        );

        let mut output = String::with_capacity(text.len() * 2);
        let mut failures = Vec::new();

        for (index, segment) in segments.iter().enumerate() {
            match segment.kind {
                SegmentKind::Text => {
                    output.push_str(&render_text(&segment.content, &self.options.line_break));
                }
                SegmentKind::Math => match self.render_math(segment) {
                    Ok(markup) => output.push_str(&markup),
                    Err(error) => {
                        tracing::warn!(
                            segment = index,
                            source = %segment.content,
                            %error,
                            "math segment fell back to source"
                        );
                        output.push_str(&render_fallback(
                            &segment.content,
                            &error,
                            &self.options.error_class,
                        ));
                        failures.push(RenderFailure {
                            segment: index,
                            source: segment.content.clone(),
                            display: segment.display,
                            error,
                        });
                    }
                },
            }
        }

        RenderReport { output, failures }
    }

    /// Render each text independently.
    pub fn render_many<S: AsRef<str>>(&self, texts: &[S]) -> Vec<String> {
        texts.iter().map(|t| self.render(t.as_ref())).collect()
    }

    fn render_math(&self, segment: &Segment) -> RenderResult<String> {
        let options = self.options.math_options(segment.display);
        let markup = catch_unwind(AssertUnwindSafe(|| {
            self.backend.render_math(&segment.content, &options)
        }))
        .unwrap_or_else(|payload| Err(RenderError::from_panic(payload)))?;
        if markup.trim().is_empty() {
            return Err(RenderError::EmptyOutput);
        }
        Ok(markup)
    }
}

/// Escape a text span and turn its newlines into `line_break`.
pub fn render_text(content: &str, line_break: &str) -> String {
    escape_html(content).replace('\n', line_break)
}

/// Error span showing the escaped math source.
///
/// Only the first line of the error message goes into the `title`.
pub fn render_fallback(source: &str, error: &RenderError, error_class: &str) -> String {
    let message = error.to_string();
    let title = message.lines().next().unwrap_or_default();
    format!(
        r#"<span class="{}" title="{}">{}</span>"#,
        escape_html(error_class),
        escape_html(title),
        escape_html(source)
    )
}

/// Render mixed text with the default backend.
///
/// # Example
///
/// ```
/// use mixtex::{render_mixed, RenderMode};
///
/// let html = render_mixed("a < b and $x$", RenderMode::Mathml);
/// assert!(html.starts_with("a &lt; b and <math"));
/// ```
pub fn render_mixed(text: &str, mode: RenderMode) -> String {
    let options = RenderOptions {
        mode,
        ..RenderOptions::default()
    };
    MixedRenderer::with_options(options).render(text)
}

/// Render mixed text with a caller-provided backend.
pub fn render_mixed_with<R: MathRenderer>(
    text: &str,
    backend: R,
    options: &RenderOptions,
) -> RenderReport {
    MixedRenderer::with_backend(backend, options.clone()).render_with_report(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::PassthroughRenderer;
    use std::cell::RefCell;

    /// Records every call and fails on sources containing `bad`.
    #[derive(Default)]
    struct Recording {
        calls: RefCell<Vec<(String, MathOptions)>>,
    }

    impl MathRenderer for Recording {
        fn render_math(&self, source: &str, options: &MathOptions) -> RenderResult<String> {
            self.calls.borrow_mut().push((source.to_string(), *options));
            if source.contains("bad") {
                Err(RenderError::parse("bad input"))
            } else if source.contains("multi") {
                Err(RenderError::parse("unexpected token\n  at line 2\n  at line 3"))
            } else if source.contains("crash") {
                panic!("backend crashed on {}", source)
            } else if source.contains("blank") {
                Ok("  ".to_string())
            } else {
                Ok(format!("[{}]", source))
            }
        }
    }

    #[test]
    fn test_render_text_escapes_and_breaks() {
        assert_eq!(render_text("a<b\n'c'", "<br/>"), "a&lt;b<br/>&#39;c&#39;");
    }

    #[test]
    fn test_passes_display_flag_and_format() {
        let backend = Recording::default();
        let renderer = MixedRenderer::with_backend(&backend, RenderOptions::mathml());
        let out = renderer.render("$a$ and $$b$$");
        assert_eq!(out, "[a] and [b]");

        let calls = backend.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert!(!calls[0].1.display_mode);
        assert!(calls[1].1.display_mode);
        assert!(calls.iter().all(|(_, o)| o.output_format == OutputFormat::Mathml));
        assert!(calls.iter().all(|(_, o)| !o.throw_on_error));
    }

    #[test]
    fn test_failure_falls_back_and_continues() {
        let backend = Recording::default();
        let report = render_mixed_with("$bad<$ then $ok$", &backend, &RenderOptions::default());
        assert_eq!(
            report.output,
            r#"<span class="math-error" title="Parse error: bad input">bad&lt;</span> then [ok]"#
        );
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].segment, 0);
        assert_eq!(report.failures[0].source, "bad<");
    }

    #[test]
    fn test_blank_output_is_failure() {
        let backend = Recording::default();
        let report = render_mixed_with(r"\[blank\]", &backend, &RenderOptions::default());
        assert!(report.has_failures());
        assert_eq!(report.failures[0].error, RenderError::EmptyOutput);
        assert!(report.failures[0].display);
        assert!(report.output.contains(">blank</span>"));
    }

    #[test]
    fn test_backend_panic_is_contained() {
        let backend = Recording::default();
        let report = render_mixed_with("$crash$ then $ok$", &backend, &RenderOptions::default());
        assert_eq!(
            report.output,
            r#"<span class="math-error" title="Renderer panicked: backend crashed on crash">crash</span> then [ok]"#
        );
        assert_eq!(
            report.failures[0].error,
            RenderError::Panicked {
                message: "backend crashed on crash".to_string()
            }
        );
        assert_eq!(backend.calls.borrow().len(), 2);
    }

    #[test]
    fn test_fallback_title_keeps_first_line() {
        let report = render_mixed_with("$multi$", Recording::default(), &RenderOptions::default());
        assert_eq!(
            report.output,
            r#"<span class="math-error" title="Parse error: unexpected token">multi</span>"#
        );
        // The report keeps the whole message.
        assert!(report.format_failures()[0].contains("at line 3"));
    }

    #[test]
    fn test_custom_line_break_and_error_class() {
        let options = RenderOptions {
            line_break: "<br>".to_string(),
            error_class: "oops".to_string(),
            ..RenderOptions::default()
        };
        let report = render_mixed_with("a\nb $bad$", Recording::default(), &options);
        assert!(report.output.starts_with("a<br>b "));
        assert!(report.output.contains(r#"class="oops""#));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(MixedRenderer::new().render(""), "");
    }

    #[test]
    fn test_render_many() {
        let renderer = MixedRenderer::with_backend(PassthroughRenderer, RenderOptions::html());
        let out = renderer.render_many(&["$x$", "plain"][..]);
        assert_eq!(out, vec![r#"<span class="math inline">\(x\)</span>"#, "plain"]);
    }

    #[test]
    fn test_render_mode_parse_and_display() {
        assert_eq!("HTML".parse::<RenderMode>(), Ok(RenderMode::Html));
        assert_eq!("mathml".parse::<RenderMode>(), Ok(RenderMode::Mathml));
        assert!("svg".parse::<RenderMode>().is_err());
        assert_eq!(RenderMode::Mathml.to_string(), "mathml");
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let opts: RenderOptions = serde_json::from_str(r#"{"mode":"mathml"}"#).unwrap();
        assert_eq!(opts.mode, RenderMode::Mathml);
        assert_eq!(opts.line_break, "<br/>");
        assert_eq!(opts.error_class, "math-error");
    }
}
