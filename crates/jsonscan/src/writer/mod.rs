//! Serialization of [`Value`] trees back to JSON text.
//!
//! The [`Writer`] can render a whole tree with [`Writer::write_value`], or be
//! driven token by token (punctuation, strings, numbers, explicit newlines and
//! indent levels) when values are produced incrementally.
//!
//! # Examples
//!
//! ```rust
//! use jsonscan::{Value, WriterOptions, object};
//!
//! let value = Value::Object(object! { "b" => 1.0, "a" => vec![Value::Null] });
//! let text = jsonscan::to_string_with(&value, WriterOptions::neat()).unwrap();
//! assert_eq!(text, "{\n  \"a\": [null],\n  \"b\": 1\n}");
//! ```

mod escape;

use std::io::{self, Write};

use num_bigint::BigInt;

use crate::{
    error::WriteError,
    options::WriterOptions,
    value::{Object, Value},
};

/// Objects with more entries than this are broken one entry per line when
/// indenting.
const OBJECT_INLINE_LIMIT: usize = 3;
/// Scalar array elements packed onto one line when indenting.
const ARRAY_BATCH: usize = 10;
/// Integral numbers below this magnitude are written without a fraction or
/// exponent.
const PLAIN_INTEGER_LIMIT: f64 = 1e15;

/// Writes JSON text to an [`io::Write`] sink.
pub struct Writer<W: Write> {
    out: W,
    options: WriterOptions,
    level: usize,
    at_line_start: bool,
    pending_space: bool,
}

impl<W: Write> Writer<W> {
    pub fn new(out: W, options: WriterOptions) -> Self {
        Self {
            out,
            options,
            level: 0,
            at_line_start: true,
            pending_space: false,
        }
    }

    #[must_use]
    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// Flushes and returns the sink.
    ///
    /// # Errors
    ///
    /// Fails if flushing fails.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }

    /// Emits leading indentation or a pending separator space before a token.
    fn begin_token(&mut self) -> io::Result<()> {
        if !self.options.indented {
            return Ok(());
        }
        if self.at_line_start {
            self.out.write_all(self.options.leading_indent.as_bytes())?;
            for _ in 0..self.level {
                self.out.write_all(self.options.indent.as_bytes())?;
            }
            self.at_line_start = false;
        } else if self.pending_space {
            self.out.write_all(b" ")?;
        }
        self.pending_space = false;
        Ok(())
    }

    /// Writes one of `{ } [ ] , :`.
    ///
    /// When indenting, a space follows `,` and `:` and precedes an opening
    /// bracket that does not start a line.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors.
    pub fn write_punct(&mut self, c: char) -> Result<(), WriteError> {
        if matches!(c, '{' | '[') && !self.at_line_start {
            self.pending_space = true;
        }
        if matches!(c, '}' | ']') {
            self.pending_space = false;
        }
        self.begin_token()?;
        let mut buf = [0u8; 4];
        self.out.write_all(c.encode_utf8(&mut buf).as_bytes())?;
        if matches!(c, ',' | ':') {
            self.pending_space = true;
        }
        Ok(())
    }

    /// Writes `s` as a quoted, escaped string literal.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors.
    pub fn write_string(&mut self, s: &str) -> Result<(), WriteError> {
        self.begin_token()?;
        escape::write_quoted(&mut self.out, s)?;
        Ok(())
    }

    /// Writes a number. Integral values print without a fraction.
    ///
    /// # Errors
    ///
    /// [`WriteError::NonFiniteNumber`] for NaN and infinities, which JSON
    /// cannot express.
    pub fn write_number(&mut self, n: f64) -> Result<(), WriteError> {
        if !n.is_finite() {
            return Err(WriteError::NonFiniteNumber(n));
        }
        self.begin_token()?;
        if n.fract() == 0.0 && n.abs() < PLAIN_INTEGER_LIMIT {
            #[expect(clippy::cast_possible_truncation)]
            let int = n as i64;
            self.out.write_all(itoa::Buffer::new().format(int).as_bytes())?;
        } else {
            self.out.write_all(ryu::Buffer::new().format_finite(n).as_bytes())?;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Fails on I/O errors.
    pub fn write_big_int(&mut self, n: &BigInt) -> Result<(), WriteError> {
        self.begin_token()?;
        write!(self.out, "{n}")?;
        Ok(())
    }

    /// # Errors
    ///
    /// Fails on I/O errors.
    pub fn write_bool(&mut self, b: bool) -> Result<(), WriteError> {
        self.begin_token()?;
        self.out.write_all(if b { b"true" } else { b"false" })?;
        Ok(())
    }

    /// # Errors
    ///
    /// Fails on I/O errors.
    pub fn write_null(&mut self) -> Result<(), WriteError> {
        self.begin_token()?;
        self.out.write_all(b"null")?;
        Ok(())
    }

    /// Ends the current line. Ignored in compact mode.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors.
    pub fn newline(&mut self) -> Result<(), WriteError> {
        if self.options.indented {
            self.out.write_all(b"\n")?;
            self.at_line_start = true;
            self.pending_space = false;
        }
        Ok(())
    }

    /// Increases the indent level for following lines.
    pub fn indent_in(&mut self) {
        self.level += 1;
    }

    /// Decreases the indent level for following lines.
    pub fn indent_out(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// Writes a whole value tree.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors and non-finite numbers.
    pub fn write_value(&mut self, value: &Value) -> Result<(), WriteError> {
        match value {
            Value::Null => self.write_null(),
            Value::Boolean(b) => self.write_bool(*b),
            Value::Number(n) => self.write_number(*n),
            Value::BigInt(n) => self.write_big_int(n),
            Value::String(s) => self.write_string(s),
            Value::Array(a) => self.write_array(a),
            Value::Object(o) => self.write_object(o),
        }
    }

    fn write_object(&mut self, object: &Object) -> Result<(), WriteError> {
        let mut entries: Vec<_> = object.iter().collect();
        if self.options.sorted {
            entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        }
        let multiline = self.options.indented
            && (entries.len() > OBJECT_INLINE_LIMIT || entries.iter().any(|(_, v)| !v.is_simple()));

        self.write_punct('{')?;
        if multiline {
            self.indent_in();
            self.newline()?;
        }
        for (i, (key, value)) in entries.into_iter().enumerate() {
            if i > 0 {
                self.write_punct(',')?;
                if multiline {
                    self.newline()?;
                }
            }
            self.write_string(key)?;
            self.write_punct(':')?;
            self.write_value(value)?;
        }
        if multiline {
            self.indent_out();
            self.newline()?;
        }
        self.write_punct('}')
    }

    fn write_array(&mut self, array: &[Value]) -> Result<(), WriteError> {
        let inline = !self.options.indented
            || (array.len() <= ARRAY_BATCH && array.iter().all(Value::is_simple));

        self.write_punct('[')?;
        if inline {
            for (i, value) in array.iter().enumerate() {
                if i > 0 {
                    self.write_punct(',')?;
                }
                self.write_value(value)?;
            }
            return self.write_punct(']');
        }

        self.indent_in();
        self.newline()?;
        let mut on_line = 0;
        let mut one_per_line = false;
        for (i, value) in array.iter().enumerate() {
            if i > 0 {
                self.write_punct(',')?;
                if one_per_line || !value.is_simple() || on_line >= ARRAY_BATCH {
                    self.newline()?;
                    on_line = 0;
                }
            }
            if !value.is_simple() {
                one_per_line = true;
            }
            self.write_value(value)?;
            on_line += 1;
        }
        self.indent_out();
        self.newline()?;
        self.write_punct(']')
    }
}

/// Renders `value` with the given layout.
///
/// # Errors
///
/// Fails on non-finite numbers.
pub fn to_string_with(value: &Value, options: WriterOptions) -> Result<String, WriteError> {
    let mut writer = Writer::new(Vec::new(), options);
    writer.write_value(value)?;
    let bytes = writer.into_inner()?;
    String::from_utf8(bytes).map_err(|e| WriteError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Renders `value` compactly.
///
/// # Errors
///
/// Fails on non-finite numbers.
pub fn to_string(value: &Value) -> Result<String, WriteError> {
    to_string_with(value, WriterOptions::compact())
}

/// Writes `value` to `out` with the given layout.
///
/// # Errors
///
/// Fails on I/O errors and non-finite numbers.
pub fn to_writer<W: Write>(out: W, value: &Value, options: WriterOptions) -> Result<W, WriteError> {
    let mut writer = Writer::new(out, options);
    writer.write_value(value)?;
    Ok(writer.into_inner()?)
}

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;

    use super::*;
    use crate::object;

    fn pretty(value: &Value) -> String {
        to_string_with(value, WriterOptions::neat()).unwrap()
    }

    #[test]
    fn compact_has_no_whitespace() {
        let v = Value::Object(object! {
            "z" => vec![Value::from(1.0), Value::from(2.5)],
            "a" => object! { "k" => "v" },
        });
        assert_eq!(to_string(&v).unwrap(), r#"{"z":[1,2.5],"a":{"k":"v"}}"#);
    }

    #[test]
    fn sorted_compact() {
        let v = Value::Object(object! { "b" => 1.0, "a" => 2.0 });
        let options = WriterOptions {
            sorted: true,
            ..WriterOptions::compact()
        };
        assert_eq!(to_string_with(&v, options).unwrap(), r#"{"a":2,"b":1}"#);
    }

    #[test]
    fn small_scalar_object_stays_inline() {
        let v = Value::Object(object! { "b" => true, "a" => Value::Null });
        assert_eq!(pretty(&v), r#"{"a": null, "b": true}"#);
    }

    #[test]
    fn large_object_breaks_lines() {
        let v = Value::Object(object! { "a" => 1.0, "b" => 2.0, "c" => 3.0, "d" => 4.0 });
        assert_eq!(pretty(&v), "{\n  \"a\": 1,\n  \"b\": 2,\n  \"c\": 3,\n  \"d\": 4\n}");
    }

    #[test]
    fn nested_object_breaks_lines() {
        let v = Value::Object(object! { "meta" => object! { "vtag" => "x" } });
        assert_eq!(pretty(&v), "{\n  \"meta\": {\"vtag\": \"x\"}\n}");
    }

    #[test]
    fn scalar_arrays_batch() {
        let v: Value = (0..12).map(|i| Value::from(f64::from(i))).collect();
        assert_eq!(
            pretty(&v),
            "[\n  0, 1, 2, 3, 4, 5, 6, 7, 8, 9,\n  10, 11\n]"
        );
        let short: Value = (0..3).map(|i| Value::from(f64::from(i))).collect();
        assert_eq!(pretty(&short), "[0, 1, 2]");
    }

    #[test]
    fn non_scalar_array_elements_go_one_per_line() {
        let v = Value::Array(vec![
            Value::from(1.0),
            Value::Array(vec![]),
            Value::from(2.0),
        ]);
        assert_eq!(pretty(&v), "[\n  1,\n  [],\n  2\n]");
    }

    #[test]
    fn leading_indent_prefixes_every_line() {
        let v = Value::Object(object! { "a" => vec![Value::Null], "b" => 1.0 });
        let options = WriterOptions {
            leading_indent: "> ".into(),
            indent: "\t".into(),
            ..WriterOptions::neat()
        };
        assert_eq!(
            to_string_with(&v, options).unwrap(),
            "> {\n> \t\"a\": [null],\n> \t\"b\": 1\n> }"
        );
    }

    #[test]
    fn numbers() {
        let cases = [
            (Value::Number(0.0), "0"),
            (Value::Number(-0.0), "0"),
            (Value::Number(-12.0), "-12"),
            (Value::Number(0.1), "0.1"),
            (Value::Number(1e21), "1e21"),
            (
                Value::BigInt("9223372036854775807999".parse::<BigInt>().unwrap()),
                "9223372036854775807999",
            ),
        ];
        for (value, text) in cases {
            assert_eq!(to_string(&value).unwrap(), text);
        }
    }

    #[test]
    fn non_finite_numbers_fail() {
        assert!(matches!(
            to_string(&Value::Number(f64::NAN)),
            Err(WriteError::NonFiniteNumber(_))
        ));
    }

    #[test]
    fn manual_streaming_writes() {
        let mut w = Writer::new(Vec::new(), WriterOptions::neat());
        w.write_punct('[').unwrap();
        w.indent_in();
        w.newline().unwrap();
        w.write_string("a").unwrap();
        w.write_punct(',').unwrap();
        w.write_number(2.0).unwrap();
        w.indent_out();
        w.newline().unwrap();
        w.write_punct(']').unwrap();
        let out = String::from_utf8(w.into_inner().unwrap()).unwrap();
        assert_eq!(out, "[\n  \"a\", 2\n]");
    }
}
