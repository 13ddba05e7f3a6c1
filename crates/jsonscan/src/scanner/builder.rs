use super::{ScanContext, ScanHandler};
use crate::{
    error::ParserError,
    value::{Array, Object, Value},
};

#[derive(Debug)]
enum Partial {
    Object { object: Object, key: Option<String> },
    Array(Array),
}

/// A [`ScanHandler`] that rebuilds the scanned document as a [`Value`].
///
/// The builder keeps its own stack and ignores the context's key path, so it
/// can also be fed a slice of another scan's events (for example, only the
/// events below one key) to materialize just that subtree.
///
/// ```rust
/// use jsonscan::{Lexer, Scanner, ValueBuilder};
///
/// let mut builder = ValueBuilder::new();
/// Scanner::default()
///     .scan(&mut Lexer::from_str(r#"{"a": [1, {"b": null}]}"#), &mut builder)
///     .unwrap();
/// let value = builder.finish().unwrap();
/// assert_eq!(value, jsonscan::from_str(r#"{"a": [1, {"b": null}]}"#).unwrap());
/// ```
#[derive(Debug, Default)]
pub struct ValueBuilder {
    stack: Vec<Partial>,
    root: Option<Value>,
}

impl ValueBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a container is still open.
    #[must_use]
    pub fn is_building(&self) -> bool {
        !self.stack.is_empty()
    }

    /// The completed value, or `None` if nothing finished yet.
    #[must_use]
    pub fn finish(self) -> Option<Value> {
        if self.stack.is_empty() { self.root } else { None }
    }

    /// Takes the completed value and resets the builder for reuse.
    pub fn take(&mut self) -> Option<Value> {
        if self.stack.is_empty() {
            self.root.take()
        } else {
            None
        }
    }

    fn attach(&mut self, ctx: &ScanContext, value: Value) -> Result<(), ParserError> {
        match self.stack.last_mut() {
            None => {
                self.root = Some(value);
                Ok(())
            }
            Some(Partial::Array(items)) => {
                items.push(value);
                Ok(())
            }
            Some(Partial::Object { object, key }) => match key.take() {
                Some(key) => {
                    object.insert_parsed(key, value);
                    Ok(())
                }
                None => Err(ctx.abort("object value without a key")),
            },
        }
    }

    fn close(&mut self, ctx: &ScanContext, dictionary: bool) -> Result<(), ParserError> {
        let value = match self.stack.pop() {
            Some(Partial::Object { object, .. }) if dictionary => Value::Object(object),
            Some(Partial::Array(items)) if !dictionary => Value::Array(items),
            _ => return Err(ctx.abort("unbalanced container events")),
        };
        self.attach(ctx, value)
    }
}

impl ScanHandler for ValueBuilder {
    fn enter_dictionary(&mut self, _ctx: &ScanContext) -> Result<(), ParserError> {
        self.stack.push(Partial::Object {
            object: Object::new(),
            key: None,
        });
        Ok(())
    }

    fn leave_dictionary(&mut self, ctx: &ScanContext) -> Result<(), ParserError> {
        self.close(ctx, true)
    }

    fn got_dictionary_key(&mut self, ctx: &ScanContext, name: &str) -> Result<(), ParserError> {
        match self.stack.last_mut() {
            Some(Partial::Object { key, .. }) => {
                *key = Some(name.to_owned());
                Ok(())
            }
            _ => Err(ctx.abort("key outside of an object")),
        }
    }

    fn got_dictionary_value(&mut self, ctx: &ScanContext, value: Value) -> Result<(), ParserError> {
        self.attach(ctx, value)
    }

    fn enter_array(&mut self, _ctx: &ScanContext) -> Result<(), ParserError> {
        self.stack.push(Partial::Array(Array::new()));
        Ok(())
    }

    fn leave_array(&mut self, ctx: &ScanContext) -> Result<(), ParserError> {
        self.close(ctx, false)
    }

    fn got_array_value(&mut self, ctx: &ScanContext, value: Value) -> Result<(), ParserError> {
        self.attach(ctx, value)
    }

    fn got_top_level_value(&mut self, ctx: &ScanContext, value: Value) -> Result<(), ParserError> {
        self.attach(ctx, value)
    }
}
