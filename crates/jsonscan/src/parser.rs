//! Recursive-descent parser building a [`Value`] tree from a [`Lexer`].
//!
//! # Examples
//!
//! ```rust
//! use jsonscan::{Lexer, Parser, ParserOptions, Value};
//!
//! let mut lexer = Lexer::from_str(r#"{"key": [null, true, 3.5]}"#);
//! let value = Parser::new(ParserOptions::default()).parse(&mut lexer).unwrap();
//! assert_eq!(value.as_object().unwrap().get_array("key").unwrap().len(), 3);
//! ```

use std::io::Read;

use crate::{
    error::{ErrorSource, ParserError, SyntaxError},
    lexer::Lexer,
    options::ParserOptions,
    token::Token,
    value::{Array, Object, Value},
};

/// Refuses input whose estimated size exceeds the configured limit.
pub(crate) fn check_input_size(options: &ParserOptions, lexer: &Lexer<'_>) -> Result<(), ParserError> {
    if let (Some(limit), Some(size)) = (options.max_input_size, lexer.estimated_size()) {
        if size > limit {
            tracing::warn!(size, limit, "refusing oversized JSON input");
            return Err(lexer.error(ErrorSource::InputTooLarge { size, limit }));
        }
    }
    Ok(())
}

/// Builds the error for a token that is not allowed where it appeared.
pub(crate) fn reject(lexer: &Lexer<'_>, token: Token, expected: &'static str) -> ParserError {
    match token {
        Token::Invalid(text) => lexer
            .error(SyntaxError::InvalidToken(text.clone()))
            .with_token(text),
        other => lexer
            .error(SyntaxError::UnexpectedToken { expected })
            .with_token(other.to_string()),
    }
}

pub(crate) fn too_deep(lexer: &Lexer<'_>, limit: usize) -> ParserError {
    tracing::warn!(limit, location = %lexer.last_token_location(), "JSON nesting too deep");
    lexer.error(SyntaxError::NestingTooDeep { limit })
}

/// Converts a scalar token into its value.
pub(crate) fn scalar_value(token: Token) -> Result<Value, Token> {
    match token {
        Token::True => Ok(Value::Boolean(true)),
        Token::False => Ok(Value::Boolean(false)),
        Token::Null => Ok(Value::Null),
        Token::String(s) => Ok(Value::String(s)),
        Token::Number(n) => Ok(Value::Number(n)),
        Token::BigInt(n) => Ok(Value::BigInt(n)),
        other => Err(other),
    }
}

/// A reusable, configured JSON parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    options: ParserOptions,
}

impl Parser {
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    /// Parses exactly one value; anything after it is an error.
    ///
    /// # Errors
    ///
    /// Fails on empty input, grammar violations, invalid tokens, trailing
    /// content, nesting beyond the configured depth, oversized input and I/O
    /// errors. Every error carries the lexer location.
    pub fn parse(&self, lexer: &mut Lexer<'_>) -> Result<Value, ParserError> {
        check_input_size(&self.options, lexer)?;
        tracing::debug!(
            estimated_size = ?lexer.estimated_size(),
            use_path_names = self.options.use_path_names,
            "parsing JSON"
        );

        let Some(token) = lexer.next_token()? else {
            return Err(lexer.error(SyntaxError::EmptyInput));
        };
        let root_path = self.options.use_path_names.then(String::new);
        let value = self.read_value(lexer, token, 0, root_path)?;

        if let Some(extra) = lexer.next_token()? {
            return Err(lexer
                .error(SyntaxError::TrailingContent)
                .with_token(extra.to_string()));
        }
        Ok(value)
    }

    /// Parses a document whose top-level value must be an object.
    ///
    /// # Errors
    ///
    /// As [`Parser::parse`], plus [`SyntaxError::NotAnObject`] for any other
    /// top-level value.
    pub fn parse_object(&self, lexer: &mut Lexer<'_>) -> Result<Object, ParserError> {
        match self.parse(lexer)? {
            Value::Object(object) => Ok(object),
            other => Err(lexer.error(SyntaxError::NotAnObject(other.type_tag()))),
        }
    }

    fn next(&self, lexer: &mut Lexer<'_>) -> Result<Token, ParserError> {
        lexer
            .next_token()?
            .ok_or_else(|| lexer.error(SyntaxError::UnexpectedEndOfInput))
    }

    fn read_value(
        &self,
        lexer: &mut Lexer<'_>,
        token: Token,
        depth: usize,
        path: Option<String>,
    ) -> Result<Value, ParserError> {
        match token {
            Token::OpenBrace => self.read_object(lexer, depth + 1, path).map(Value::Object),
            Token::OpenBracket => self.read_array(lexer, depth + 1, path).map(Value::Array),
            other => scalar_value(other).map_err(|t| reject(lexer, t, "value")),
        }
    }

    fn read_object(
        &self,
        lexer: &mut Lexer<'_>,
        depth: usize,
        path: Option<String>,
    ) -> Result<Object, ParserError> {
        if depth > self.options.max_depth {
            return Err(too_deep(lexer, self.options.max_depth));
        }
        let mut object = Object::with_path_name(path);

        let mut token = match self.next(lexer)? {
            Token::CloseBrace => return Ok(object),
            token => token,
        };
        loop {
            let key = match token {
                Token::String(key) => key,
                t if t.is_scalar() => {
                    return Err(lexer.error(SyntaxError::KeyNotString).with_token(t.to_string()));
                }
                t => return Err(reject(lexer, t, "key")),
            };
            match self.next(lexer)? {
                Token::Colon => {}
                t => return Err(reject(lexer, t, "':'")),
            }
            let value_token = self.next(lexer)?;
            let child_path = object.path_name().map(|_| object.field_path(&key));
            let value = self.read_value(lexer, value_token, depth, child_path)?;
            object.insert_parsed(key, value);

            match self.next(lexer)? {
                Token::Comma => token = self.next(lexer)?,
                Token::CloseBrace => return Ok(object),
                t => return Err(reject(lexer, t, "',' or '}'")),
            }
        }
    }

    fn read_array(
        &self,
        lexer: &mut Lexer<'_>,
        depth: usize,
        path: Option<String>,
    ) -> Result<Array, ParserError> {
        if depth > self.options.max_depth {
            return Err(too_deep(lexer, self.options.max_depth));
        }
        let mut array = Array::new();

        let mut token = match self.next(lexer)? {
            Token::CloseBracket => return Ok(array),
            token => token,
        };
        loop {
            let child_path = path.as_ref().map(|p| format!("{p}/{}", array.len()));
            array.push(self.read_value(lexer, token, depth, child_path)?);

            match self.next(lexer)? {
                Token::Comma => token = self.next(lexer)?,
                Token::CloseBracket => return Ok(array),
                t => return Err(reject(lexer, t, "',' or ']'")),
            }
        }
    }
}

/// Parses JSON text with default options.
///
/// # Errors
///
/// See [`Parser::parse`].
pub fn from_str(text: &str) -> Result<Value, ParserError> {
    Parser::default().parse(&mut Lexer::from_str(text))
}

/// Parses JSON read from `reader` with default options.
///
/// # Errors
///
/// See [`Parser::parse`].
pub fn from_reader(reader: impl Read) -> Result<Value, ParserError> {
    Parser::default().parse(&mut Lexer::from_reader(reader))
}

/// Parses JSON text that must hold a top-level object.
///
/// # Errors
///
/// See [`Parser::parse_object`].
pub fn object_from_str(text: &str) -> Result<Object, ParserError> {
    Parser::default().parse_object(&mut Lexer::from_str(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_containers() {
        assert_eq!(from_str("{}").unwrap(), Value::Object(Object::new()));
        assert_eq!(from_str("[]").unwrap(), Value::Array(vec![]));
        assert_eq!(from_str(" [ ] ").unwrap(), Value::Array(vec![]));
    }

    #[test]
    fn empty_input() {
        let err = from_str("  ").unwrap_err();
        assert_eq!(err.syntax_error(), Some(&SyntaxError::EmptyInput));
    }

    #[test]
    fn trailing_tokens_rejected() {
        let err = from_str("{} []").unwrap_err();
        assert_eq!(err.syntax_error(), Some(&SyntaxError::TrailingContent));
        assert_eq!(err.token(), Some("["));
        assert_eq!(err.location(), "offset 3 of line 1");
    }

    #[test]
    fn non_string_key() {
        let err = from_str("{1: 2}").unwrap_err();
        assert_eq!(err.syntax_error(), Some(&SyntaxError::KeyNotString));
    }

    #[test]
    fn parse_object_requires_object() {
        let err = object_from_str("[1]").unwrap_err();
        assert_eq!(err.syntax_error(), Some(&SyntaxError::NotAnObject("array")));
        assert!(object_from_str(r#"{"a": 1}"#).is_ok());
    }

    #[test]
    fn depth_cap() {
        let options = ParserOptions {
            max_depth: 3,
            ..Default::default()
        };
        let parser = Parser::new(options);
        assert!(parser.parse(&mut Lexer::from_str("[[[1]]]")).is_ok());
        let err = parser.parse(&mut Lexer::from_str("[[[[1]]]]")).unwrap_err();
        assert_eq!(
            err.syntax_error(),
            Some(&SyntaxError::NestingTooDeep { limit: 3 })
        );
    }

    #[test]
    fn default_depth_cap_stops_runaway_nesting() {
        let text = "[".repeat(100_000);
        let err = from_str(&text).unwrap_err();
        assert!(matches!(
            err.syntax_error(),
            Some(SyntaxError::NestingTooDeep { .. })
        ));
    }

    #[test]
    fn size_gate_runs_before_lexing() {
        let options = ParserOptions {
            max_input_size: Some(4),
            ..Default::default()
        };
        let mut lexer = Lexer::from_str("[1, 2, 3]");
        let err = Parser::new(options).parse(&mut lexer).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorSource::InputTooLarge { size: 9, limit: 4 }
        ));
        // Nothing was consumed.
        assert_eq!(lexer.next_token().unwrap(), Some(Token::OpenBracket));
    }

    #[test]
    fn path_names_follow_structure() {
        let options = ParserOptions {
            use_path_names: true,
            ..Default::default()
        };
        let root = Parser::new(options)
            .parse_object(&mut Lexer::from_str(
                r#"{"meta": {"vtag": {"tag": "x"}}, "list": [{"k": 1}]}"#,
            ))
            .unwrap();
        assert_eq!(root.path_name(), Some(""));
        let vtag = root.get_object("meta").unwrap().get_object("vtag").unwrap();
        assert_eq!(vtag.path_name(), Some("/meta/vtag"));
        let item = root.get_array("list").unwrap()[0].as_object().unwrap();
        assert_eq!(item.path_name(), Some("/list/0"));
        assert_eq!(
            vtag.get_f64("tag").unwrap_err().to_string(),
            "field /meta/vtag/tag is string, expected number"
        );
    }

    #[test]
    fn without_path_names_objects_are_untracked() {
        let root = object_from_str(r#"{"meta": {}}"#).unwrap();
        assert_eq!(root.get_object("meta").unwrap().path_name(), None);
    }
}
