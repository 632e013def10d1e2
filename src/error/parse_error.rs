use thiserror::Error;

use crate::interpreter::lexer::Token;

/// A syntax error detected while scanning or parsing.
///
/// Syntax errors never abort the parser; they are reported to a
/// [`Diagnostics`] sink and the parser resynchronizes at the next statement
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error on line {line}{location}: {message}")]
pub struct SyntaxError {
    /// The source line where the error occurred.
    pub line:     usize,
    /// Where on the line: `" at 'lexeme'"`, `" at end"`, or empty for lexical
    /// errors.
    pub location: String,
    /// Human readable description.
    pub message:  String,
}

impl SyntaxError {
    /// Creates an error pointing at a specific token.
    ///
    /// ## Example
    /// ```
    /// use tern::{error::SyntaxError, interpreter::lexer::{Token, TokenKind}};
    ///
    /// let token = Token::new(TokenKind::Semicolon, ";", 3);
    /// let error = SyntaxError::at_token(&token, "Expect expression.");
    ///
    /// assert_eq!(error.to_string(), "Error on line 3 at ';': Expect expression.");
    /// ```
    #[must_use]
    pub fn at_token(token: &Token, message: impl Into<String>) -> Self {
        Self { line:     token.line,
               location: format!(" at '{}'", token.lexeme),
               message:  message.into(), }
    }

    /// Creates an error for input that ended too early.
    #[must_use]
    pub fn at_end(line: usize, message: impl Into<String>) -> Self {
        Self { line,
               location: " at end".to_string(),
               message: message.into() }
    }

    /// Creates an error raised by the lexer, which has no token to point at.
    #[must_use]
    pub fn lexical(line: usize, message: impl Into<String>) -> Self {
        Self { line,
               location: String::new(),
               message: message.into() }
    }
}

/// Collects syntax errors reported during lexing and parsing.
///
/// The parser owns all error recovery; it only needs somewhere to put what it
/// found. A run proceeds to evaluation only when the sink stayed empty.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<SyntaxError>,
}

impl Diagnostics {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error.
    pub fn report(&mut self, error: SyntaxError) {
        tracing::debug!(line = error.line, message = %error.message, "syntax error");
        self.errors.push(error);
    }

    /// Returns `true` if any error was reported.
    #[must_use]
    pub const fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The reported errors, in the order they were found.
    #[must_use]
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// Consumes the sink, returning the reported errors.
    #[must_use]
    pub fn into_errors(self) -> Vec<SyntaxError> {
        self.errors
    }
}
