//! Mixed text/math segmentation
//!
//! Splits a string into alternating literal text and LaTeX math spans.
//! Recognized delimiters, in precedence order at every position:
//! `$$…$$`, `\[…\]`, `\(…\)` and `$…$`.
//!
//! Segmentation is lossless: [`reconstruct`] on the result gives back the
//! input byte for byte.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Any opening delimiter: `$` (covers `$$`), `\[` or `\(`
    static ref OPENER: Regex = Regex::new(r"\$|\\\[|\\\(").unwrap();
}

/// Kind of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Text,
    Math,
}

/// Math delimiter pair, in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Delimiter {
    /// `$$ … $$`
    DoubleDollar,
    /// `\[ … \]`
    Bracket,
    /// `\( … \)`
    Paren,
    /// `$ … $`
    Dollar,
}

impl Delimiter {
    /// All delimiters, in the order they are tried.
    pub const PRECEDENCE: [Delimiter; 4] = [
        Delimiter::DoubleDollar,
        Delimiter::Bracket,
        Delimiter::Paren,
        Delimiter::Dollar,
    ];

    pub fn open(self) -> &'static str {
        match self {
            Delimiter::DoubleDollar => "$$",
            Delimiter::Bracket => "\\[",
            Delimiter::Paren => "\\(",
            Delimiter::Dollar => "$",
        }
    }

    pub fn close(self) -> &'static str {
        match self {
            Delimiter::DoubleDollar => "$$",
            Delimiter::Bracket => "\\]",
            Delimiter::Paren => "\\)",
            Delimiter::Dollar => "$",
        }
    }

    /// Display style (`$$`, `\[`) versus inline style (`$`, `\(`)
    pub fn is_display(self) -> bool {
        matches!(self, Delimiter::DoubleDollar | Delimiter::Bracket)
    }

    /// Byte offset of the closer for an opener at `start`, if any.
    fn find_close(self, input: &str, start: usize) -> Option<usize> {
        let from = start + self.open().len();
        match self {
            // A single `$` closes only when not escaped by a backslash.
            Delimiter::Dollar => {
                let bytes = input.as_bytes();
                (from..bytes.len()).find(|&j| bytes[j] == b'$' && bytes[j - 1] != b'\\')
            }
            _ => input[from..].find(self.close()).map(|pos| from + pos),
        }
    }
}

/// A typed span of a mixed text/math string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    /// Literal text, or the math body without its delimiters
    pub content: String,
    /// Display-style math. Always `false` for text.
    pub display: bool,
    /// Delimiter the math was written with. `None` for text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<Delimiter>,
}

impl Segment {
    pub fn text(content: impl Into<String>) -> Self {
        Segment {
            kind: SegmentKind::Text,
            content: content.into(),
            display: false,
            delimiter: None,
        }
    }

    pub fn math(content: impl Into<String>, delimiter: Delimiter) -> Self {
        Segment {
            kind: SegmentKind::Math,
            content: content.into(),
            display: delimiter.is_display(),
            delimiter: Some(delimiter),
        }
    }

    pub fn is_math(&self) -> bool {
        self.kind == SegmentKind::Math
    }

    /// The segment as it appeared in the source, delimiters included.
    pub fn to_source(&self) -> String {
        match (self.kind, self.delimiter) {
            (SegmentKind::Math, Some(delim)) => {
                format!("{}{}{}", delim.open(), self.content, delim.close())
            }
            (SegmentKind::Math, None) => {
                let delim = if self.display {
                    Delimiter::DoubleDollar
                } else {
                    Delimiter::Dollar
                };
                format!("{}{}{}", delim.open(), self.content, delim.close())
            }
            (SegmentKind::Text, _) => self.content.clone(),
        }
    }
}

/// Split `input` into text and math segments, left to right.
///
/// An opener without a closer anywhere after it is plain text. The first
/// closer found ends a span; nesting is not tracked.
///
/// # Example
///
/// ```
/// use mixtex::{split_latex_mixed, Segment, Delimiter};
///
/// let segments = split_latex_mixed("Value is $x^2$ units");
/// assert_eq!(
///     segments,
///     vec![
///         Segment::text("Value is "),
///         Segment::math("x^2", Delimiter::Dollar),
///         Segment::text(" units"),
///     ]
/// );
/// ```
pub fn split_latex_mixed(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut pending = String::new();
    let mut closers = CloserSearch::default();
    let mut i = 0;

    while i < input.len() {
        if let Some((delim, close)) = closers.match_delimiter(input, i) {
            flush_text(&mut pending, &mut segments);
            let body_start = i + delim.open().len();
            segments.push(Segment::math(&input[body_start..close], delim));
            i = close + delim.close().len();
            continue;
        }

        // Nothing opens here: consume at least the current character, then
        // everything up to the next opener candidate.
        let step = input[i..].chars().next().map_or(1, char::len_utf8);
        let next = OPENER
            .find_at(input, i + step)
            .map_or(input.len(), |m| m.start());
        pending.push_str(&input[i..next]);
        i = next;
    }

    flush_text(&mut pending, &mut segments);
    segments
}

/// Closer lookups for one scan.
///
/// Once a closer search from some offset comes back empty, every search for
/// the same delimiter from a later offset would too. Remembering that offset
/// keeps runs of unterminated openers from rescanning the rest of the input.
struct CloserSearch {
    /// Per delimiter, the smallest offset known to have no closer after it.
    exhausted: [usize; 4],
}

impl Default for CloserSearch {
    fn default() -> Self {
        CloserSearch {
            exhausted: [usize::MAX; 4],
        }
    }
}

impl CloserSearch {
    /// First delimiter (in precedence order) that opens at `i` and has a closer.
    fn match_delimiter(&mut self, input: &str, i: usize) -> Option<(Delimiter, usize)> {
        let rest = &input[i..];
        Delimiter::PRECEDENCE
            .iter()
            .filter(|delim| rest.starts_with(delim.open()))
            .find_map(|&delim| self.find_close(delim, input, i).map(|close| (delim, close)))
    }

    fn find_close(&mut self, delim: Delimiter, input: &str, start: usize) -> Option<usize> {
        let from = start + delim.open().len();
        let exhausted = &mut self.exhausted[delim as usize];
        if from >= *exhausted {
            return None;
        }
        let close = delim.find_close(input, start);
        if close.is_none() {
            *exhausted = from;
        }
        close
    }
}

fn flush_text(pending: &mut String, segments: &mut Vec<Segment>) {
    if !pending.is_empty() {
        segments.push(Segment::text(std::mem::take(pending)));
    }
}

/// Rebuild the source string from its segments.
pub fn reconstruct(segments: &[Segment]) -> String {
    segments.iter().map(Segment::to_source).collect()
}

/// Whether `input` contains at least one delimited math span.
pub fn contains_math(input: &str) -> bool {
    split_latex_mixed(input).iter().any(Segment::is_math)
}
