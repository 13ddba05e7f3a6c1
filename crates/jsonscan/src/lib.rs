//! JSON lexing, parsing, event scanning and writing.
//!
//! - [`Lexer`] turns text from a string, reader or file into [`Token`]s with
//!   one token of lookahead and line/offset tracking.
//! - [`Parser`] builds a [`Value`] tree; integers too large for `f64` are
//!   kept exactly as [`Value::BigInt`].
//! - [`Scanner`] walks the same tokens without building a tree and reports
//!   structure to a [`ScanHandler`].
//! - [`Writer`] prints values compactly or in a sorted, indented "neat"
//!   layout.
//!
//! ```rust
//! let value = jsonscan::from_str(r#"{"id": 12345678901234567890123, "ok": true}"#).unwrap();
//! assert!(value.as_object().unwrap().get("id").unwrap().as_big_int().is_some());
//! assert_eq!(
//!     jsonscan::to_string(&value).unwrap(),
//!     r#"{"id":12345678901234567890123,"ok":true}"#
//! );
//! ```

#![allow(missing_docs)]

mod error;
mod lexer;
mod options;
mod parser;
mod scanner;
mod token;
mod value;
mod writer;

#[cfg(test)]
mod tests;

pub use error::{ErrorSource, ParserError, SyntaxError, TokenError, ValueError, WriteError};
pub use lexer::Lexer;
pub use options::{DEFAULT_MAX_DEPTH, ParserOptions, WriterOptions};
pub use parser::{Parser, from_reader, from_str, object_from_str};
pub use scanner::{ScanContext, ScanHandler, Scanner, ValueBuilder};
pub use token::{Token, TokenKind};
pub use value::{Array, Object, Value};
pub use writer::{Writer, to_string, to_string_with, to_writer};

pub use num_bigint::BigInt;

/// Builds an [`Object`] from `key => value` pairs, converting each value with
/// [`Value::from`].
///
/// ```rust
/// # use jsonscan::{object, Value};
/// let o = object! { "name" => "cost", "rows" => 3, "nested" => object! {} };
/// assert_eq!(o.get_str("name").unwrap(), "cost");
/// assert_eq!(o.get("rows").unwrap(), &Value::Number(3.0));
/// ```
#[macro_export]
macro_rules! object {
    ( $( $key:expr => $value:expr ),* $(,)? ) => {{
        #[allow(unused_mut)]
        let mut object = $crate::Object::new();
        $( object.insert($key, $crate::Value::from($value)); )*
        object
    }};
}
