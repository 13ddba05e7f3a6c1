//! Event-driven JSON scanning without building a tree.
//!
//! The [`Scanner`] walks the token stream of a [`Lexer`] and reports
//! structure to a [`ScanHandler`]: entering and leaving objects ("dictionaries")
//! and arrays, object keys, and scalar values. Containers are never passed to
//! the handler as values; they show up as enter/leave pairs instead.
//!
//! Every callback receives a [`ScanContext`] describing where the scan
//! currently is, so a handler can route values by key path without keeping
//! its own bookkeeping.
//!
//! ```rust
//! use jsonscan::{Lexer, ParserError, ScanContext, ScanHandler, Scanner, Value};
//!
//! #[derive(Default)]
//! struct Sum(f64);
//!
//! impl ScanHandler for Sum {
//!     fn got_array_value(&mut self, ctx: &ScanContext, value: Value) -> Result<(), ParserError> {
//!         if ctx.current_key() == Some("costs") {
//!             self.0 += value.as_f64().unwrap_or(0.0);
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut sum = Sum::default();
//! Scanner::default()
//!     .scan(&mut Lexer::from_str(r#"{"costs": [1, 2.5, 3]}"#), &mut sum)
//!     .unwrap();
//! assert_eq!(sum.0, 6.5);
//! ```

mod builder;

pub use builder::ValueBuilder;

use crate::{
    error::{ErrorSource, ParserError, SyntaxError},
    lexer::Lexer,
    options::ParserOptions,
    parser::{check_input_size, reject, scalar_value, too_deep},
    token::Token,
    value::Value,
};

/// Callbacks invoked by the [`Scanner`].
///
/// Every method defaults to doing nothing. Returning an error stops the scan
/// and the error is returned from [`Scanner::scan`]; use
/// [`ScanContext::abort`] to build one.
#[allow(unused_variables)]
pub trait ScanHandler {
    /// An object was opened. The context already counts it.
    fn enter_dictionary(&mut self, ctx: &ScanContext) -> Result<(), ParserError> {
        Ok(())
    }

    /// An object was closed. The context no longer counts it, but
    /// [`ScanContext::current_key`] is still the key it was stored under.
    fn leave_dictionary(&mut self, ctx: &ScanContext) -> Result<(), ParserError> {
        Ok(())
    }

    /// A key was read. It is already the innermost key of the context.
    fn got_dictionary_key(&mut self, ctx: &ScanContext, key: &str) -> Result<(), ParserError> {
        Ok(())
    }

    /// A scalar value for the innermost key.
    fn got_dictionary_value(&mut self, ctx: &ScanContext, value: Value) -> Result<(), ParserError> {
        Ok(())
    }

    fn enter_array(&mut self, ctx: &ScanContext) -> Result<(), ParserError> {
        Ok(())
    }

    fn leave_array(&mut self, ctx: &ScanContext) -> Result<(), ParserError> {
        Ok(())
    }

    /// A scalar element of the innermost array.
    fn got_array_value(&mut self, ctx: &ScanContext, value: Value) -> Result<(), ParserError> {
        Ok(())
    }

    /// A scalar document, such as `42` or `"text"`.
    fn got_top_level_value(&mut self, ctx: &ScanContext, value: Value) -> Result<(), ParserError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    dictionary: bool,
    has_elements: bool,
}

/// Position of the scan inside the document.
#[derive(Debug, Default)]
pub struct ScanContext {
    frames: Vec<Frame>,
    keys: Vec<String>,
    dictionaries: usize,
}

impl ScanContext {
    /// Open containers, objects and arrays alike.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Open objects only.
    #[must_use]
    pub fn dictionary_depth(&self) -> usize {
        self.dictionaries
    }

    /// The pending key at `level`, counted from the outermost object.
    #[must_use]
    pub fn key_at(&self, level: usize) -> Option<&str> {
        self.keys.get(level).map(String::as_str)
    }

    /// All pending keys joined with `.`, e.g. `meta.vtag.tag`.
    #[must_use]
    pub fn key_path(&self) -> String {
        self.keys.join(".")
    }

    /// [`ScanContext::key_path`] without the innermost key.
    #[must_use]
    pub fn parent_key_path(&self) -> String {
        match self.keys.split_last() {
            Some((_, parents)) => parents.join("."),
            None => String::new(),
        }
    }

    #[must_use]
    pub fn current_key(&self) -> Option<&str> {
        self.keys.last().map(String::as_str)
    }

    /// Builds an error that stops the scan. The scanner attaches the location
    /// of the current token when the error is returned from a callback.
    #[must_use]
    pub fn abort(&self, message: impl Into<String>) -> ParserError {
        ParserError::new(ErrorSource::Aborted(message.into()), String::new())
    }

    fn in_dictionary(&self) -> bool {
        self.frames.last().is_some_and(|f| f.dictionary)
    }

    fn has_elements(&self) -> bool {
        self.frames.last().is_some_and(|f| f.has_elements)
    }

    fn mark_element(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            frame.has_elements = true;
        }
    }

    fn push(&mut self, dictionary: bool) {
        self.frames.push(Frame {
            dictionary,
            has_elements: false,
        });
        if dictionary {
            self.dictionaries += 1;
        }
    }

    fn pop(&mut self) {
        if let Some(frame) = self.frames.pop() {
            if frame.dictionary {
                self.dictionaries -= 1;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Key,
    Colon,
    Value,
    Comma,
    /// The top-level value is complete.
    Done,
}

/// Drives a [`ScanHandler`] over a token stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scanner {
    options: ParserOptions,
}

impl Scanner {
    /// Only `max_depth` and `max_input_size` apply to scanning.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    /// Scans one JSON document, calling `handler` for each structural event.
    ///
    /// Input that ends with no container open finishes normally, including
    /// input with no tokens at all.
    ///
    /// # Errors
    ///
    /// Grammar violations, invalid tokens, tokens after the top-level value,
    /// input ending inside a container, nesting beyond the configured depth,
    /// oversized input, I/O failures, and any error returned by `handler`.
    pub fn scan<H: ScanHandler + ?Sized>(
        &self,
        lexer: &mut Lexer<'_>,
        handler: &mut H,
    ) -> Result<(), ParserError> {
        check_input_size(&self.options, lexer)?;
        tracing::debug!(
            estimated_size = ?lexer.estimated_size(),
            max_depth = self.options.max_depth,
            "scanning JSON"
        );

        let mut ctx = ScanContext::default();
        let mut state = Expect::Value;
        while let Some(token) = lexer.next_token()? {
            state = self
                .step(lexer, &mut ctx, state, token, handler)
                .map_err(|err| locate(err, lexer))?;
        }
        if ctx.depth() > 0 {
            return Err(lexer.error(SyntaxError::UnexpectedEndOfInput));
        }
        tracing::debug!(location = %lexer.last_token_location(), "scan complete");
        Ok(())
    }

    fn step<H: ScanHandler + ?Sized>(
        &self,
        lexer: &Lexer<'_>,
        ctx: &mut ScanContext,
        state: Expect,
        token: Token,
        handler: &mut H,
    ) -> Result<Expect, ParserError> {
        if state == Expect::Done {
            return Err(lexer
                .error(SyntaxError::TrailingContent)
                .with_token(token.to_string()));
        }

        match token {
            Token::OpenBrace if state == Expect::Value => {
                self.open(lexer, ctx, true)?;
                handler.enter_dictionary(ctx)?;
                Ok(Expect::Key)
            }
            Token::CloseBrace
                if ctx.in_dictionary()
                    && (state == Expect::Comma || (state == Expect::Key && !ctx.has_elements())) =>
            {
                ctx.pop();
                handler.leave_dictionary(ctx)?;
                Ok(close(ctx))
            }
            Token::OpenBracket if state == Expect::Value => {
                self.open(lexer, ctx, false)?;
                handler.enter_array(ctx)?;
                Ok(Expect::Value)
            }
            Token::CloseBracket
                if ctx.depth() > 0
                    && !ctx.in_dictionary()
                    && (state == Expect::Comma || (state == Expect::Value && !ctx.has_elements())) =>
            {
                ctx.pop();
                handler.leave_array(ctx)?;
                Ok(close(ctx))
            }
            Token::Colon if state == Expect::Colon => Ok(Expect::Value),
            Token::Comma if state == Expect::Comma => {
                ctx.mark_element();
                Ok(if ctx.in_dictionary() {
                    Expect::Key
                } else {
                    Expect::Value
                })
            }
            Token::String(key) if state == Expect::Key => {
                ctx.keys.push(key);
                let key = ctx.keys.last().map_or("", String::as_str);
                handler.got_dictionary_key(ctx, key)?;
                Ok(Expect::Colon)
            }
            t if t.is_scalar() && state == Expect::Key => {
                Err(lexer.error(SyntaxError::KeyNotString).with_token(t.to_string()))
            }
            t if t.is_scalar() && state == Expect::Value => {
                let value = scalar_value(t).map_err(|t| reject(lexer, t, "value"))?;
                if ctx.depth() == 0 {
                    handler.got_top_level_value(ctx, value)?;
                    return Ok(Expect::Done);
                }
                if ctx.in_dictionary() {
                    handler.got_dictionary_value(ctx, value)?;
                    ctx.keys.pop();
                } else {
                    handler.got_array_value(ctx, value)?;
                }
                ctx.mark_element();
                Ok(Expect::Comma)
            }
            t => Err(reject(lexer, t, expecting(state, ctx))),
        }
    }

    fn open(&self, lexer: &Lexer<'_>, ctx: &mut ScanContext, dictionary: bool) -> Result<(), ParserError> {
        if ctx.depth() >= self.options.max_depth {
            return Err(too_deep(lexer, self.options.max_depth));
        }
        ctx.push(dictionary);
        Ok(())
    }
}

/// State after a container was popped from `ctx`.
fn close(ctx: &mut ScanContext) -> Expect {
    if ctx.depth() == 0 {
        return Expect::Done;
    }
    if ctx.in_dictionary() {
        ctx.keys.pop();
    }
    ctx.mark_element();
    Expect::Comma
}

fn expecting(state: Expect, ctx: &ScanContext) -> &'static str {
    match state {
        Expect::Key => "key",
        Expect::Colon => "':'",
        Expect::Value => "value",
        Expect::Comma if ctx.in_dictionary() => "',' or '}'",
        Expect::Comma => "',' or ']'",
        Expect::Done => "end of input",
    }
}

fn locate(mut err: ParserError, lexer: &Lexer<'_>) -> ParserError {
    if err.location.is_empty() {
        err.location = lexer.last_token_location();
    }
    err
}
