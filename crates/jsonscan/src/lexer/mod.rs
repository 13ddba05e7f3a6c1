//! Tokenizer turning a character source into [`Token`]s.
//!
//! The lexer never fails on malformed text. Anything it cannot classify (a
//! bad escape, an unterminated string, a number `f64` cannot read, an unknown
//! word, a stray character) comes back as [`Token::Invalid`], leaving the
//! parser or scanner to report it with full context. The only hard errors are
//! I/O failures of the underlying reader.
//!
//! # Examples
//!
//! ```rust
//! use jsonscan::{Lexer, Token};
//!
//! let mut lexer = Lexer::from_str(r#"{"a": [true]}"#);
//! assert_eq!(lexer.peek_token().unwrap(), Some(&Token::OpenBrace));
//! assert_eq!(lexer.next_token().unwrap(), Some(Token::OpenBrace));
//! assert_eq!(lexer.next_token().unwrap(), Some(Token::String("a".into())));
//! ```

mod escape;
mod source;

use std::{fs::File, io::Read, path::Path};

use escape::{SurrogatePair, UnicodeEscapeBuffer};
use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive};
use source::{CharReader, ReaderSource, Source};

use crate::{
    error::{ErrorSource, ParserError},
    token::Token,
};

/// A one-token-lookahead JSON tokenizer.
pub struct Lexer<'a> {
    chars: CharReader<'a>,
    name: Option<String>,
    size_hint: Option<u64>,

    line: usize,
    column: usize,
    after_cr: bool,
    token_line: usize,
    token_column: usize,

    peeked: Option<Option<Token>>,
    scratch: String,
}

impl<'a> Lexer<'a> {
    /// Lexes in-memory text. The size estimate is the text's byte length.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &'a str) -> Self {
        Self::new(Source::Text(text.chars()), Some(text.len() as u64))
    }

    /// Lexes bytes pulled from `reader`, decoded as UTF-8.
    ///
    /// The size is unknown unless supplied with [`Lexer::with_size_hint`].
    #[must_use]
    pub fn from_reader(reader: impl Read + 'a) -> Self {
        Self::new(Source::Reader(ReaderSource::new(Box::new(reader))), None)
    }

    /// Opens `path` and lexes its contents. Locations name the file and the
    /// size estimate comes from the file metadata.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened.
    pub fn from_file(path: impl AsRef<Path>) -> std::io::Result<Lexer<'static>> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let size = file.metadata().ok().map(|m| m.len());
        let mut lexer = Lexer::new(Source::Reader(ReaderSource::new(Box::new(file))), size);
        lexer.name = Some(path.display().to_string());
        Ok(lexer)
    }

    fn new(source: Source<'a>, size_hint: Option<u64>) -> Self {
        Self {
            chars: CharReader::new(source),
            name: None,
            size_hint,
            line: 1,
            column: 0,
            after_cr: false,
            token_line: 1,
            token_column: 0,
            peeked: None,
            scratch: String::new(),
        }
    }

    /// Names the source in location strings.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Declares the total input size, for callers that know it up front.
    #[must_use]
    pub fn with_size_hint(mut self, size: u64) -> Self {
        self.size_hint = Some(size);
        self
    }

    /// Stops reading after `max` characters, as if the input ended there.
    ///
    /// Leaves [`estimated_size`](Self::estimated_size) alone: that is a byte
    /// count and a character cap does not bound it.
    #[must_use]
    pub fn with_max_chars(mut self, max: u64) -> Self {
        self.chars.set_max_chars(Some(max));
        self
    }

    /// Best-effort total input size in bytes, or `None` when unknown.
    ///
    /// Available before any token is requested, so callers can refuse
    /// oversized input without reading it.
    #[must_use]
    pub fn estimated_size(&self) -> Option<u64> {
        self.size_hint
    }

    /// Where the most recently lexed token started, e.g.
    /// `offset 7 of line 3 in data.json`.
    #[must_use]
    pub fn last_token_location(&self) -> String {
        match &self.name {
            Some(name) => format!(
                "offset {} of line {} in {name}",
                self.token_column, self.token_line
            ),
            None => format!("offset {} of line {}", self.token_column, self.token_line),
        }
    }

    /// Builds an error located at the last token.
    pub(crate) fn error(&self, source: impl Into<ErrorSource>) -> ParserError {
        ParserError::new(source, self.last_token_location())
    }

    /// Returns the next token without consuming it.
    ///
    /// Repeated calls return the same token until [`Lexer::next_token`]
    /// consumes it.
    ///
    /// # Errors
    ///
    /// Fails only if the underlying reader fails.
    pub fn peek_token(&mut self) -> Result<Option<&Token>, ParserError> {
        if self.peeked.is_none() {
            let token = self.lex()?;
            self.peeked = Some(token);
        }
        Ok(self.peeked.as_ref().and_then(Option::as_ref))
    }

    /// Consumes and returns the next token, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Fails only if the underlying reader fails.
    pub fn next_token(&mut self) -> Result<Option<Token>, ParserError> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.lex(),
        }
    }

    fn io_error(&self, err: std::io::Error) -> ParserError {
        ParserError::new(ErrorSource::Io(err), self.last_token_location())
    }

    fn peek_char(&mut self) -> Result<Option<char>, ParserError> {
        self.chars.peek().map_err(|e| self.io_error(e))
    }

    fn bump(&mut self) -> Result<Option<char>, ParserError> {
        let next = self.chars.bump().map_err(|e| self.io_error(e))?;
        match next {
            Some('\r') => {
                self.line += 1;
                self.column = 0;
                self.after_cr = true;
            }
            Some('\n') => {
                if !self.after_cr {
                    self.line += 1;
                }
                self.column = 0;
                self.after_cr = false;
            }
            Some(_) => {
                self.column += 1;
                self.after_cr = false;
            }
            None => {}
        }
        Ok(next)
    }

    fn lex(&mut self) -> Result<Option<Token>, ParserError> {
        while let Some(c) = self.peek_char()? {
            if !c.is_whitespace() {
                break;
            }
            self.bump()?;
        }

        self.token_line = self.line;
        self.token_column = self.column;

        let Some(c) = self.peek_char()? else {
            return Ok(None);
        };
        let token = match c {
            '{' | '}' | '[' | ']' | ':' | ',' => {
                self.bump()?;
                match c {
                    '{' => Token::OpenBrace,
                    '}' => Token::CloseBrace,
                    '[' => Token::OpenBracket,
                    ']' => Token::CloseBracket,
                    ':' => Token::Colon,
                    _ => Token::Comma,
                }
            }
            '"' => {
                self.bump()?;
                self.lex_string()?
            }
            '-' | '0'..='9' => self.lex_number()?,
            c if c.is_alphabetic() => self.lex_word()?,
            c => {
                self.bump()?;
                Token::Invalid(c.to_string())
            }
        };
        tracing::trace!(?token, line = self.token_line, column = self.token_column, "lexed token");
        Ok(Some(token))
    }

    /// Reads the body of a string; the opening quote is already consumed.
    fn lex_string(&mut self) -> Result<Token, ParserError> {
        let mut out = String::new();
        let mut escape = UnicodeEscapeBuffer::new();
        let mut pair = SurrogatePair::default();

        loop {
            let Some(c) = self.bump()? else {
                return Ok(Token::Invalid("unterminated string".into()));
            };
            if pair.is_pending() && c != '\\' {
                return Ok(Token::Invalid("unpaired high surrogate in string".into()));
            }
            match c {
                '"' => return Ok(Token::String(out)),
                '\\' => {
                    let Some(e) = self.bump()? else {
                        return Ok(Token::Invalid("unterminated string".into()));
                    };
                    if pair.is_pending() && e != 'u' {
                        return Ok(Token::Invalid("unpaired high surrogate in string".into()));
                    }
                    match e {
                        '"' => out.push('"'),
                        '\\' => out.push('\\'),
                        '/' => out.push('/'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        'n' => out.push('\n'),
                        'b' => out.push('\u{08}'),
                        'f' => out.push('\u{0C}'),
                        'u' => {
                            escape.reset();
                            let mut unit = None;
                            while unit.is_none() {
                                let Some(h) = self.bump()? else {
                                    return Ok(Token::Invalid("unterminated string".into()));
                                };
                                match escape.feed(h) {
                                    Ok(u) => unit = u,
                                    Err(msg) => return Ok(Token::Invalid(msg)),
                                }
                            }
                            match unit.map(|u| pair.push(u)) {
                                Some(Ok(Some(ch))) => out.push(ch),
                                Some(Ok(None)) | None => {}
                                Some(Err(msg)) => return Ok(Token::Invalid(msg)),
                            }
                        }
                        other => {
                            return Ok(Token::Invalid(format!(
                                "invalid escape character {other:?} in string"
                            )));
                        }
                    }
                }
                c if c.is_control() => {
                    return Ok(Token::Invalid(format!(
                        "unescaped control character U+{:04X} in string",
                        c as u32
                    )));
                }
                c => out.push(c),
            }
        }
    }

    fn lex_number(&mut self) -> Result<Token, ParserError> {
        self.scratch.clear();
        while let Some(c) = self.peek_char()? {
            if !matches!(c, '0'..='9' | '-' | '+' | '.' | 'e' | 'E') {
                break;
            }
            self.bump()?;
            self.scratch.push(c);
        }
        Ok(classify_number(&self.scratch))
    }

    fn lex_word(&mut self) -> Result<Token, ParserError> {
        self.scratch.clear();
        while let Some(c) = self.peek_char()? {
            if !c.is_alphabetic() {
                break;
            }
            self.bump()?;
            self.scratch.push(c);
        }
        Ok(match self.scratch.as_str() {
            "true" => Token::True,
            "false" => Token::False,
            "null" => Token::Null,
            other => Token::Invalid(other.to_owned()),
        })
    }
}

/// Decides between `Number`, `BigInt` and `Invalid` for numeric text.
///
/// Integer literals stay `Number` when `f64` holds them exactly; otherwise
/// they are kept as `BigInt`. Literals with a fraction or exponent are
/// always `Number` and must be finite.
pub(crate) fn classify_number(text: &str) -> Token {
    if !text.contains(['.', 'e', 'E']) {
        if let Ok(int) = text.parse::<BigInt>() {
            return match int.to_f64() {
                Some(f) if f.is_finite() && BigInt::from_f64(f).as_ref() == Some(&int) => {
                    Token::Number(f)
                }
                _ => Token::BigInt(int),
            };
        }
    }
    match text.parse::<f64>() {
        Ok(f) if f.is_finite() => Token::Number(f),
        _ => Token::Invalid(text.to_owned()),
    }
}
