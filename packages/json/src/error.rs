//! Error types for the JSON value tree

use crate::lexer::{LexError, TokenSpan};
use crate::value::Kind;
use std::collections::TryReserveError;
use thiserror::Error;

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type for tree construction and printing
pub type JsonResult<T> = Result<T, JsonError>;

/// Parse error with location and context
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Unexpected token at {span:?}: expected {expected}, found {found}")]
    UnexpectedToken {
        span: TokenSpan,
        expected: String,
        found: String,
    },

    #[error("Unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: String },

    #[error("Invalid syntax at {span:?}: {message}")]
    InvalidSyntax { span: TokenSpan, message: String },

    #[error("Lexer error at {span:?}: {message}")]
    LexError { span: TokenSpan, message: String },

    #[error("Nesting deeper than {limit} levels at {span:?}")]
    NestingTooDeep { span: TokenSpan, limit: usize },
}

impl ParseError {
    pub fn unexpected_token(
        span: TokenSpan,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::UnexpectedToken {
            span,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn unexpected_eof(expected: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            expected: expected.into(),
        }
    }

    pub fn invalid_syntax(span: TokenSpan, message: impl Into<String>) -> Self {
        Self::InvalidSyntax {
            span,
            message: message.into(),
        }
    }

    pub fn span(&self) -> Option<TokenSpan> {
        match self {
            ParseError::UnexpectedToken { span, .. } => Some(*span),
            ParseError::UnexpectedEof { .. } => None,
            ParseError::InvalidSyntax { span, .. } => Some(*span),
            ParseError::LexError { span, .. } => Some(*span),
            ParseError::NestingTooDeep { span, .. } => Some(*span),
        }
    }

    /// Short description used as the label of a rendered report.
    pub fn label(&self) -> String {
        match self {
            ParseError::UnexpectedToken { expected, .. } => format!("expected {}", expected),
            ParseError::UnexpectedEof { expected } => format!("expected {}", expected),
            ParseError::InvalidSyntax { message, .. } => message.clone(),
            ParseError::LexError { message, .. } => message.clone(),
            ParseError::NestingTooDeep { limit, .. } => format!("more than {} levels", limit),
        }
    }
}

impl From<LexError> for ParseError {
    fn from(error: LexError) -> Self {
        Self::LexError {
            span: error.span,
            message: error.message,
        }
    }
}

/// The three failure classes a caller can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedInput,
    AllocationFailure,
    InvalidArgument,
}

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Malformed JSON: {0}")]
    Parse(#[from] ParseError),

    #[error("Allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("Invalid argument to {operation}: expected {expected} value, found {found}")]
    InvalidArgument {
        operation: &'static str,
        expected: Kind,
        found: Kind,
    },
}

impl JsonError {
    pub fn invalid_argument(operation: &'static str, expected: Kind, found: Kind) -> Self {
        Self::InvalidArgument {
            operation,
            expected,
            found,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            JsonError::Parse(_) => ErrorKind::MalformedInput,
            JsonError::Allocation(_) => ErrorKind::AllocationFailure,
            JsonError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
        }
    }
}

/// Pretty-print parse errors with source context using ariadne
#[cfg(feature = "pretty-errors")]
pub mod pretty {
    use super::ParseError;
    use crate::lexer::TokenSpan;
    use ariadne::{Color, Label, Report, ReportKind, Source};

    /// Render `error` against `source` as a labelled report.
    pub fn format_error(error: &ParseError, filename: &str, source: &str) -> String {
        let span = error.span().unwrap_or(TokenSpan::new(
            source.len().saturating_sub(1),
            source.len(),
        ));
        // ariadne counts chars, our spans count bytes
        let start = char_offset(source, span.start);
        let end = char_offset(source, span.end).max(start);

        let report = Report::build(ReportKind::Error, filename, start)
            .with_message(error.to_string())
            .with_label(
                Label::new((filename, start..end))
                    .with_color(Color::Red)
                    .with_message(error.label()),
            )
            .finish();

        let mut output = Vec::new();
        if report
            .write((filename, Source::from(source)), &mut output)
            .is_err()
        {
            return error.to_string();
        }

        String::from_utf8(output).unwrap_or_else(|_| error.to_string())
    }

    fn char_offset(source: &str, byte_offset: usize) -> usize {
        source
            .get(..byte_offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or_else(|| source.chars().count())
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        let parse = JsonError::from(ParseError::unexpected_eof("a value"));
        assert_eq!(parse.kind(), ErrorKind::MalformedInput);

        let argument = JsonError::invalid_argument("append", Kind::Array, Kind::Null);
        assert_eq!(argument.kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            argument.to_string(),
            "Invalid argument to append: expected array value, found null"
        );
    }

    #[test]
    fn test_span() {
        let error = ParseError::invalid_syntax(TokenSpan::new(3, 5), "bad escape");
        assert_eq!(error.span(), Some(TokenSpan::new(3, 5)));
        assert_eq!(ParseError::unexpected_eof("']'").span(), None);
    }
}
