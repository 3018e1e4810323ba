//! WASM bindings for mixtex
//!
//! This module provides JavaScript-accessible functions for the question
//! editor: segmentation, rendering and the plain ⇄ LaTeX helpers.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};

/// Render options (exposed to WASM)
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize, Default)]
pub struct WasmRenderOptions {
    /// `"html"` or `"mathml"`
    #[serde(default)]
    pub mode: crate::RenderMode,
    /// Math backend: `"pulldown"` or `"passthrough"`
    #[serde(default)]
    pub backend: crate::BackendKind,
    /// Replacement for newlines in text (default `<br/>`)
    #[serde(default)]
    pub line_break: Option<String>,
    /// CSS class for math that failed to render (default `math-error`)
    #[serde(default)]
    pub error_class: Option<String>,
}

/// Render result with per-segment failures
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct RenderResultJs {
    /// The rendered markup
    pub output: String,
    /// Whether every math segment rendered
    pub success: bool,
    /// Failed math segments
    pub failures: Vec<String>,
}

/// Safely serialize a value to JsValue, returning an error object on failure.
#[cfg(feature = "wasm")]
fn to_js_value<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or_else(|e| {
        let error_obj = RenderResultJs {
            output: String::new(),
            success: false,
            failures: vec![format!("Serialization error: {}", e)],
        };
        serde_wasm_bindgen::to_value(&error_obj).unwrap_or(JsValue::NULL)
    })
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Split mixed text into `{kind, content, display}` segments
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "splitLatexMixed")]
pub fn split_latex_mixed_wasm(input: &str) -> JsValue {
    to_js_value(&crate::split_latex_mixed(input))
}

/// Render mixed text
///
/// # Arguments
/// * `input` - Text with `$…$`, `$$…$$`, `\(…\)` or `\[…\]` math
/// * `mode` - `"html"` or `"mathml"` (anything else means html)
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "renderMixed")]
pub fn render_mixed_wasm(input: &str, mode: &str) -> String {
    crate::render_mixed(input, mode.parse().unwrap_or_default())
}

/// Render mixed text with options, reporting failed math segments
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "renderMixedWithOptions")]
pub fn render_mixed_with_options_wasm(input: &str, options: JsValue) -> JsValue {
    let opts: WasmRenderOptions = serde_wasm_bindgen::from_value(options).unwrap_or_default();

    let defaults = crate::RenderOptions::default();
    let render_opts = crate::RenderOptions {
        mode: opts.mode,
        line_break: opts.line_break.unwrap_or(defaults.line_break),
        error_class: opts.error_class.unwrap_or(defaults.error_class),
        ..crate::RenderOptions::default()
    };

    let report = crate::render_mixed_with(input, opts.backend.build(), &render_opts);
    let result = RenderResultJs {
        success: !report.has_failures(),
        failures: report.format_failures(),
        output: report.output,
    };

    to_js_value(&result)
}

/// Convert informally typed math to LaTeX
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "plainToLatex")]
pub fn plain_to_latex_wasm(input: &str) -> String {
    crate::plain_to_latex(input)
}

/// Convert LaTeX to an editable plain form
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "latexToPlain")]
pub fn latex_to_plain_wasm(input: &str) -> String {
    crate::latex_to_plain(input)
}

/// Check whether the text contains delimited math
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "containsMath")]
pub fn contains_math_wasm(input: &str) -> bool {
    crate::contains_math(input)
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
