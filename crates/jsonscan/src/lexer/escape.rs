//! Decoding of four-digit `\uXXXX` escape sequences.
//!
//! [`UnicodeEscapeBuffer`] accumulates exactly four ASCII hexadecimal digits
//! and yields the UTF-16 code unit they spell. [`SurrogatePair`] joins a high
//! and a low surrogate unit into one `char`.

/// Buffer for four hexadecimal digits (`0-9`, `A-F`, `a-f`).
#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    value: u16,
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reset(&mut self) {
        self.value = 0;
        self.len = 0;
    }

    /// Feeds one digit.
    ///
    /// - `Ok(None)` while fewer than four digits have been seen.
    /// - `Ok(Some(unit))` on the fourth digit; the buffer resets itself.
    /// - `Err` if `c` is not a hex digit.
    pub(crate) fn feed(&mut self, c: char) -> Result<Option<u16>, String> {
        let Some(digit) = c.to_digit(16) else {
            return Err(format!("invalid unicode escape character {c:?}"));
        };
        #[expect(clippy::cast_possible_truncation)]
        let digit = digit as u16;
        self.value = (self.value << 4) | digit;
        self.len += 1;
        if self.len == 4 {
            let unit = self.value;
            self.reset();
            Ok(Some(unit))
        } else {
            Ok(None)
        }
    }
}

/// Pairing state for UTF-16 surrogates spread over two escapes.
#[derive(Debug, Default)]
pub(crate) struct SurrogatePair {
    high: Option<u16>,
}

impl SurrogatePair {
    pub(crate) fn is_pending(&self) -> bool {
        self.high.is_some()
    }

    /// Accepts one decoded code unit.
    ///
    /// Returns `Ok(None)` after a high surrogate (a low one must follow) and
    /// `Ok(Some(ch))` once a full scalar value is known.
    pub(crate) fn push(&mut self, unit: u16) -> Result<Option<char>, String> {
        match (self.high.take(), unit) {
            (None, 0xD800..=0xDBFF) => {
                self.high = Some(unit);
                Ok(None)
            }
            (None, 0xDC00..=0xDFFF) => Err(format!("unpaired low surrogate \\u{unit:04x}")),
            (None, _) => Ok(char::from_u32(u32::from(unit))),
            (Some(high), 0xDC00..=0xDFFF) => {
                let code = 0x1_0000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(unit) - 0xDC00);
                Ok(char::from_u32(code))
            }
            (Some(high), _) => Err(format!("unpaired high surrogate \\u{high:04x}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(hex: &str) -> Result<Option<u16>, String> {
        let mut buf = UnicodeEscapeBuffer::new();
        let mut out = None;
        for ch in hex.chars() {
            out = buf.feed(ch)?;
        }
        Ok(out)
    }

    #[test]
    fn basic_decoding() {
        assert_eq!(decode("0041").unwrap(), Some(0x41));
    }

    #[test]
    fn mixed_case_hex() {
        assert_eq!(decode("AbCd").unwrap(), Some(0xABCD));
    }

    #[test]
    fn partial_input_yields_nothing() {
        assert_eq!(decode("00").unwrap(), None);
    }

    #[test]
    fn invalid_hex_error() {
        let err = decode("00G1").unwrap_err();
        assert!(err.contains("invalid unicode escape character"));
    }

    #[test]
    fn surrogates_combine() {
        let mut pair = SurrogatePair::default();
        assert_eq!(pair.push(0xD83D).unwrap(), None);
        assert!(pair.is_pending());
        assert_eq!(pair.push(0xDE00).unwrap(), Some('😀'));
        assert!(!pair.is_pending());
    }

    #[test]
    fn lone_surrogates_rejected() {
        let mut pair = SurrogatePair::default();
        assert!(pair.push(0xDE00).is_err());
        pair.push(0xD83D).unwrap();
        assert!(pair.push(0x0041).is_err());
    }
}
