//! Parser error types.

use std::fmt;

use crate::lexer::{Span, TokenKind};

/// A parse error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// The location of the error.
    pub span: Span,
    /// Expected tokens (if applicable).
    pub expected: Option<String>,
    /// The actual token found.
    pub found: Option<TokenKind>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            expected: None,
            found: None,
        }
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: TokenKind, span: Span) -> Self {
        let expected: String = expected.into();
        if let TokenKind::Error(message) = &found {
            return Self {
                message: message.clone(),
                span,
                expected: Some(expected),
                found: Some(found),
            };
        }
        let message = if found == TokenKind::Eof {
            format!("unexpected end of input: expected {expected}")
        } else {
            format!("expected {expected}, found {found}")
        };
        Self {
            message,
            span,
            expected: Some(expected),
            found: Some(found),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at position {}..{}",
            self.message, self.span.start, self.span.end
        )
    }
}

impl std::error::Error for ParseError {}
