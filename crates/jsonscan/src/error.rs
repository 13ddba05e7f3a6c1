use std::{fmt, io};

use thiserror::Error;

/// A failure while lexing, parsing or scanning JSON text.
///
/// Every error carries the location of the last token the lexer produced and,
/// when one was involved, the literal text of the offending token.
#[derive(Debug)]
pub struct ParserError {
    pub(crate) source: ErrorSource,
    pub(crate) location: String,
    pub(crate) token: Option<String>,
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.source, self.location)?;
        if let Some(token) = &self.token {
            write!(f, " (token: {token})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParserError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl ParserError {
    pub(crate) fn new(source: impl Into<ErrorSource>, location: String) -> Self {
        Self {
            source: source.into(),
            location,
            token: None,
        }
    }

    pub(crate) fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> &ErrorSource {
        &self.source
    }

    /// Human-readable location, e.g. `offset 4 of line 2 in config.json`.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Literal text of the offending token, if the error involved one.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the syntax error, if this is one.
    #[must_use]
    pub fn syntax_error(&self) -> Option<&SyntaxError> {
        match &self.source {
            ErrorSource::Syntax(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ErrorSource {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("scan aborted: {0}")]
    Aborted(String),
    #[error("input of {size} bytes exceeds the limit of {limit} bytes")]
    InputTooLarge { size: u64, limit: u64 },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("empty input")]
    EmptyInput,
    #[error("unexpected token, expecting {expected}")]
    UnexpectedToken { expected: &'static str },
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("unexpected content after the top-level value")]
    TrailingContent,
    #[error("object key is not a string")]
    KeyNotString,
    #[error("nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
    #[error("{0}")]
    InvalidToken(String),
    #[error("top-level value is {0}, not an object")]
    NotAnObject(&'static str),
}

/// Reading a payload from a token kind that does not carry one, or building
/// a payload-carrying kind without one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid token state: {0}")]
pub struct TokenError(pub(crate) String);

/// A strict accessor did not find what it expected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    #[error("missing field {path}")]
    MissingField { path: String },
    #[error("field {path} is {found}, expected {expected}")]
    WrongType {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("{0} is not an integral value")]
    NonIntegral(f64),
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("cannot write non-finite number {0}")]
    NonFiniteNumber(f64),
}

impl From<fmt::Error> for WriteError {
    fn from(_: fmt::Error) -> Self {
        Self::Io(io::Error::other("formatter error"))
    }
}
