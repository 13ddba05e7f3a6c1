//! Lexical tokens produced by the [`Lexer`](crate::Lexer).

use core::fmt;

use num_bigint::BigInt;

use crate::error::TokenError;

/// The kind of a [`Token`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Colon,
    Comma,
    True,
    False,
    Null,
    String,
    Number,
    BigInt,
    Invalid,
}

impl TokenKind {
    /// Returns `true` for kinds that carry no payload.
    #[must_use]
    pub fn is_simple(self) -> bool {
        !matches!(self, Self::String | Self::Number | Self::BigInt | Self::Invalid)
    }
}

/// A single lexical unit of JSON text.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Colon,
    Comma,
    True,
    False,
    Null,
    String(String),
    Number(f64),
    BigInt(BigInt),
    /// Text the lexer could not classify. The consumer decides how to report it.
    Invalid(String),
}

impl Token {
    /// Builds a payload-free token of the given kind.
    ///
    /// # Errors
    ///
    /// Fails for kinds that require a payload (`String`, `Number`, `BigInt`,
    /// `Invalid`); use the matching variant constructor for those.
    pub fn simple(kind: TokenKind) -> Result<Self, TokenError> {
        Ok(match kind {
            TokenKind::OpenBrace => Self::OpenBrace,
            TokenKind::CloseBrace => Self::CloseBrace,
            TokenKind::OpenBracket => Self::OpenBracket,
            TokenKind::CloseBracket => Self::CloseBracket,
            TokenKind::Colon => Self::Colon,
            TokenKind::Comma => Self::Comma,
            TokenKind::True => Self::True,
            TokenKind::False => Self::False,
            TokenKind::Null => Self::Null,
            TokenKind::String | TokenKind::Number | TokenKind::BigInt | TokenKind::Invalid => {
                return Err(TokenError(format!("{kind:?} token requires a payload")));
            }
        })
    }

    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::OpenBrace => TokenKind::OpenBrace,
            Self::CloseBrace => TokenKind::CloseBrace,
            Self::OpenBracket => TokenKind::OpenBracket,
            Self::CloseBracket => TokenKind::CloseBracket,
            Self::Colon => TokenKind::Colon,
            Self::Comma => TokenKind::Comma,
            Self::True => TokenKind::True,
            Self::False => TokenKind::False,
            Self::Null => TokenKind::Null,
            Self::String(_) => TokenKind::String,
            Self::Number(_) => TokenKind::Number,
            Self::BigInt(_) => TokenKind::BigInt,
            Self::Invalid(_) => TokenKind::Invalid,
        }
    }

    /// Returns `true` for tokens that are complete scalar values.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::True | Self::False | Self::Null | Self::String(_) | Self::Number(_) | Self::BigInt(_)
        )
    }

    /// The payload of a `String` token.
    ///
    /// # Errors
    ///
    /// Fails if this is not a `String` token.
    pub fn as_str(&self) -> Result<&str, TokenError> {
        match self {
            Self::String(s) => Ok(s),
            other => Err(other.no_payload("string")),
        }
    }

    /// The payload of a `Number` token.
    ///
    /// # Errors
    ///
    /// Fails if this is not a `Number` token.
    pub fn as_f64(&self) -> Result<f64, TokenError> {
        match self {
            Self::Number(n) => Ok(*n),
            other => Err(other.no_payload("number")),
        }
    }

    /// The payload of a `BigInt` token.
    ///
    /// # Errors
    ///
    /// Fails if this is not a `BigInt` token.
    pub fn as_big_int(&self) -> Result<&BigInt, TokenError> {
        match self {
            Self::BigInt(n) => Ok(n),
            other => Err(other.no_payload("big integer")),
        }
    }

    /// The diagnostic text of an `Invalid` token.
    ///
    /// # Errors
    ///
    /// Fails if this is not an `Invalid` token.
    pub fn invalid_text(&self) -> Result<&str, TokenError> {
        match self {
            Self::Invalid(s) => Ok(s),
            other => Err(other.no_payload("invalid-token text")),
        }
    }

    fn no_payload(&self, wanted: &str) -> TokenError {
        TokenError(format!("{:?} token has no {wanted} payload", self.kind()))
    }
}

/// Renders the token the way it would appear in JSON text, for diagnostics.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenBrace => f.write_str("{"),
            Self::CloseBrace => f.write_str("}"),
            Self::OpenBracket => f.write_str("["),
            Self::CloseBracket => f.write_str("]"),
            Self::Colon => f.write_str(":"),
            Self::Comma => f.write_str(","),
            Self::True => f.write_str("true"),
            Self::False => f.write_str("false"),
            Self::Null => f.write_str("null"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::BigInt(n) => write!(f, "{n}"),
            Self::Invalid(s) => f.write_str(s),
        }
    }
}
