// Gotgo Template Error Handling
// Malformed-template and I/O failures with miette integration

use crate::lexer::Rule;
use crate::span::Span;
use miette::{Diagnostic, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

/// Every way a single instantiation run can fail
#[derive(Error, Diagnostic, Debug)]
pub enum TemplateError {
    #[error("Malformed template: {message}")]
    #[diagnostic(
        code(gotgo::template::malformed),
        help("A template starts with `package name(type T0, type T1 constraint, ...)`")
    )]
    MalformedTemplate {
        #[source_code]
        src: String,
        #[label("here")]
        span: SourceSpan,
        message: String,
    },

    #[error("I/O failure on {}", path.display())]
    #[diagnostic(code(gotgo::template::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TemplateError {
    /// Create a malformed template error pointing at `span`
    pub fn malformed(src: &str, span: Span, message: impl Into<String>) -> Self {
        TemplateError::MalformedTemplate {
            src: src.to_string(),
            span: span.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error for the given path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TemplateError::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a malformed template error from a tokenizer failure
    pub fn from_pest_error(error: pest::error::Error<Rule>, src: &str) -> Self {
        let span = match error.location {
            pest::error::InputLocation::Pos(pos) => {
                let width = src[pos..].chars().next().map_or(0, char::len_utf8);
                Span::new(pos, pos + width)
            }
            pest::error::InputLocation::Span((start, end)) => Span::new(start, end),
        };

        let (line, col) = match error.line_col {
            pest::error::LineColLocation::Pos(pos) => pos,
            pest::error::LineColLocation::Span(start, _) => start,
        };

        let found = src[span.start..]
            .chars()
            .next()
            .map(|c| format!("{c:?}"))
            .unwrap_or_else(|| "end of input".to_string());

        Self::malformed(
            src,
            span,
            format!("unrecognised input {found} at line {line}, column {col}"),
        )
    }

    /// Whether this is a header or token error rather than an I/O failure
    pub fn is_malformed(&self) -> bool {
        matches!(self, TemplateError::MalformedTemplate { .. })
    }

    /// The human-readable detail of a malformed template error
    pub fn message(&self) -> Option<&str> {
        match self {
            TemplateError::MalformedTemplate { message, .. } => Some(message),
            TemplateError::Io { .. } => None,
        }
    }
}

/// Result type for template operations
pub type TemplateResult<T> = Result<T, TemplateError>;
