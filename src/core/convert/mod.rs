//! Plain-text ⇄ LaTeX heuristic converter
//!
//! Lets an author type math informally (`(1/2)`, `sqrt(x)`, `d/dx`, `theta`)
//! and preview it as LaTeX, and turns existing LaTeX back into an editable
//! plain form. Both directions are ordered pipelines of small rewrite rules;
//! later rules see the output of earlier ones. The pair is not inverse:
//! `latex_to_plain` followed by `plain_to_latex` is not the identity in
//! general.

pub mod latex_to_plain;
pub mod plain_to_latex;

pub use latex_to_plain::latex_to_plain;
pub use plain_to_latex::plain_to_latex;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// A named rewrite step in a conversion pipeline
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Run `input` through every rule of `pipeline`, in order.
pub fn run_pipeline(pipeline: &[Rule], input: &str) -> String {
    pipeline
        .iter()
        .fold(input.to_string(), |acc, rule| (rule.apply)(&acc))
}

/// Collapse whitespace runs to a single space and trim the ends.
pub fn collapse_whitespace(input: &str) -> String {
    WHITESPACE_RUN.replace_all(input, " ").trim().to_string()
}
