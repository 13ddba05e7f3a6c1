//! JSON string literal escaping.
//!
//! `"` `\` tab, CR, LF, backspace and form feed use their short escapes. Any
//! other character at or below U+001F, or at or above U+007F, is written as
//! `\uXXXX` with lowercase hex; characters beyond the BMP become an escaped
//! surrogate pair. Everything else passes through, and strings needing no
//! escapes are copied in one write.

use std::io::{self, Write};

#[inline]
fn needs_escape(b: u8) -> bool {
    b < 0x20 || b >= 0x7F || b == b'"' || b == b'\\'
}

pub(crate) fn write_quoted<W: Write>(out: &mut W, s: &str) -> io::Result<()> {
    out.write_all(b"\"")?;
    if !s.bytes().any(needs_escape) {
        out.write_all(s.as_bytes())?;
        return out.write_all(b"\"");
    }

    let mut run_start = 0;
    for (i, c) in s.char_indices() {
        let short: &[u8] = match c {
            '"' => b"\\\"",
            '\\' => b"\\\\",
            '\t' => b"\\t",
            '\r' => b"\\r",
            '\n' => b"\\n",
            '\u{08}' => b"\\b",
            '\u{0C}' => b"\\f",
            c if (c as u32) < 0x20 || (c as u32) >= 0x7F => b"",
            _ => continue,
        };
        out.write_all(&s.as_bytes()[run_start..i])?;
        run_start = i + c.len_utf8();
        if short.is_empty() {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(out, "\\u{unit:04x}")?;
            }
        } else {
            out.write_all(short)?;
        }
    }
    out.write_all(&s.as_bytes()[run_start..])?;
    out.write_all(b"\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quoted(s: &str) -> String {
        let mut out = Vec::new();
        write_quoted(&mut out, s).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn plain_strings_pass_through() {
        assert_eq!(quoted("hello / world"), r#""hello / world""#);
        assert_eq!(quoted(""), r#""""#);
    }

    #[test]
    fn short_escapes() {
        assert_eq!(
            quoted("\"\\\t\r\n\u{8}\u{c}"),
            r#""\"\\\t\r\n\b\f""#
        );
    }

    #[test]
    fn unicode_escapes_are_lowercase() {
        assert_eq!(quoted("\u{1}"), r#""\u0001""#);
        assert_eq!(quoted("\u{7f}"), r#""\u007f""#);
        assert_eq!(quoted("é"), r#""\u00e9""#);
        assert_eq!(quoted("a😀b"), r#""a\ud83d\ude00b""#);
    }
}
