//! MathML backend built on `pulldown-latex`.

use std::panic::{catch_unwind, AssertUnwindSafe};

use lazy_static::lazy_static;
use pulldown_latex::config::DisplayMode;
use pulldown_latex::RenderConfig;
use pulldown_latex::{mathml::push_mathml, Parser, Storage};
use regex::Regex;

use super::{MathOptions, MathRenderer, OutputFormat};
use crate::utils::error::{RenderError, RenderResult};
use crate::utils::escape::escape_html;

lazy_static! {
    /// A MathML start, end or empty-element tag with double-quoted attributes.
    static ref MATHML_TAG: Regex = Regex::new(
        r#"^</?(?:math|semantics|annotation|none|m[a-z]+)(?:\s+[a-zA-Z:-]+="[^"<>]*")*\s*/?>"#
    )
    .unwrap();
    static ref ATTRIBUTE_NAME: Regex = Regex::new(r#"([a-zA-Z:-]+)=""#).unwrap();
    static ref ENTITY: Regex = Regex::new(r"^&(?:#[0-9]+|#x[0-9a-fA-F]+|[a-zA-Z][a-zA-Z0-9]*);").unwrap();
}

/// Pure Rust MathML renderer.
///
/// `pulldown-latex` reports malformed input as error events inside its
/// MathML. Those are surfaced as [`RenderError::Parse`] whatever
/// `throw_on_error` says, so the caller can substitute its own fallback.
/// In HTML mode the MathML carries the TeX source as an annotation and is
/// wrapped in a `<span class="math …">`.
///
/// `pulldown-latex` writes operators and `\text{…}` contents verbatim, so
/// the MathML is passed through `sanitize_mathml` before it is returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct PulldownRenderer;

impl PulldownRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl MathRenderer for PulldownRenderer {
    fn render_math(&self, source: &str, options: &MathOptions) -> RenderResult<String> {
        let with_html = options.output_format == OutputFormat::HtmlAndMathml;
        let annotation = escape_html(source);

        let rendered = catch_unwind(AssertUnwindSafe(|| {
            let storage = Storage::new();
            let events: Vec<_> = Parser::new(source, &storage).collect();
            if let Some(Err(e)) = events.iter().find(|event| event.is_err()) {
                return Err(RenderError::parse(e.to_string()));
            }

            let mut config: RenderConfig = Default::default();
            config.display_mode = if options.display_mode {
                DisplayMode::Block
            } else {
                DisplayMode::Inline
            };
            if with_html {
                config.annotation = Some(&*annotation);
            }

            let mut mathml = String::new();
            push_mathml(&mut mathml, events.into_iter(), config)
                .map_err(|e| RenderError::backend(e.to_string()))?;
            Ok(sanitize_mathml(&mathml))
        }))
        .unwrap_or_else(|payload| Err(RenderError::from_panic(payload)))?;

        if !with_html {
            return Ok(rendered);
        }
        let class = if options.display_mode {
            "math math-display"
        } else {
            "math math-inline"
        };
        Ok(format!(r#"<span class="{}">{}</span>"#, class, rendered))
    }
}

/// Keep MathML element tags and escape every other markup character.
///
/// A `<` survives only when it starts a MathML tag whose attributes are all
/// double-quoted and none is an event handler or a link. Stray `<` and `>`
/// become entities, as does any `&` that does not begin an entity.
fn sanitize_mathml(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len() + 16);
    let mut rest = markup;

    while let Some(pos) = rest.find(['<', '>', '&']) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        let keep = match rest.as_bytes()[0] {
            b'<' => MATHML_TAG
                .find(rest)
                .filter(|tag| has_safe_attributes(tag.as_str()))
                .map(|tag| tag.end()),
            b'&' => ENTITY.find(rest).map(|entity| entity.end()),
            _ => None,
        };
        match keep {
            Some(len) => {
                out.push_str(&rest[..len]);
                rest = &rest[len..];
            }
            None => {
                out.push_str(match rest.as_bytes()[0] {
                    b'<' => "&lt;",
                    b'>' => "&gt;",
                    _ => "&amp;",
                });
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn has_safe_attributes(tag: &str) -> bool {
    ATTRIBUTE_NAME.captures_iter(tag).all(|caps| {
        let name = caps[1].to_ascii_lowercase();
        !name.starts_with("on") && !name.ends_with("href") && name != "src"
    })
}
