//! Error handling for math rendering
//!
//! Rendering a mixed string never fails as a whole. These types describe
//! what went wrong for a single math fragment, so callers can report it while
//! the rest of the string still renders.

use std::fmt;

/// Failure reported by a math typesetting backend for one fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The math source could not be parsed
    Parse { message: String },
    /// The backend produced no output
    EmptyOutput,
    /// The backend failed for a reason unrelated to the source
    Backend { message: String },
    /// The backend panicked while rendering
    Panicked { message: String },
    /// The backend rejected the requested options
    Options { message: String },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Parse { message } => write!(f, "Parse error: {}", message),
            RenderError::EmptyOutput => write!(f, "Renderer produced no output"),
            RenderError::Backend { message } => write!(f, "Backend error: {}", message),
            RenderError::Panicked { message } => write!(f, "Renderer panicked: {}", message),
            RenderError::Options { message } => write!(f, "Invalid render options: {}", message),
        }
    }
}

impl std::error::Error for RenderError {}

/// Result type for the math typesetting seam
pub type RenderResult<T> = Result<T, RenderError>;

// Convenience constructors
impl RenderError {
    pub fn parse(message: impl Into<String>) -> Self {
        RenderError::Parse {
            message: message.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        RenderError::Backend {
            message: message.into(),
        }
    }

    pub fn options(message: impl Into<String>) -> Self {
        RenderError::Options {
            message: message.into(),
        }
    }

    /// Build a `Panicked` error from a payload caught by `catch_unwind`.
    pub fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        RenderError::Panicked { message }
    }
}

/// A math segment that fell back to its escaped source (non-fatal)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFailure {
    /// Index of the segment in the segmented input
    pub segment: usize,
    /// Raw math source, without delimiters
    pub source: String,
    /// Whether the segment was display math
    pub display: bool,
    pub error: RenderError,
}

impl fmt::Display for RenderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = if self.display { "display" } else { "inline" };
        write!(
            f,
            "Segment {} ({} math `{}`): {}",
            self.segment, style, self.source, self.error
        )
    }
}
