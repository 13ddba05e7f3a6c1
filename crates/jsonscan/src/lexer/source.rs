//! Character sources backing the lexer.
//!
//! A source yields `char`s one at a time with a single character of
//! lookahead. In-memory text is walked directly; readers are pulled through a
//! fixed byte window and decoded with `bstr`, so multi-byte sequences that
//! straddle a read boundary decode correctly. Invalid UTF-8 decodes as
//! U+FFFD.

use std::io::{self, Read};

const WINDOW: usize = 8 * 1024;

pub(crate) enum Source<'a> {
    Text(core::str::Chars<'a>),
    Reader(ReaderSource<'a>),
}

pub(crate) struct ReaderSource<'a> {
    reader: Box<dyn Read + 'a>,
    buf: Box<[u8]>,
    start: usize,
    end: usize,
    eof: bool,
}

impl<'a> ReaderSource<'a> {
    pub(crate) fn new(reader: Box<dyn Read + 'a>) -> Self {
        Self {
            reader,
            buf: vec![0; WINDOW].into_boxed_slice(),
            start: 0,
            end: 0,
            eof: false,
        }
    }

    /// Makes sure at least one complete UTF-8 sequence is buffered, unless
    /// the reader is exhausted.
    fn fill(&mut self) -> io::Result<()> {
        while !self.eof && self.end - self.start < 4 {
            if self.start > 0 {
                self.buf.copy_within(self.start..self.end, 0);
                self.end -= self.start;
                self.start = 0;
            }
            match self.reader.read(&mut self.buf[self.end..]) {
                Ok(0) => self.eof = true,
                Ok(n) => self.end += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    fn next_char(&mut self) -> io::Result<Option<char>> {
        self.fill()?;
        if self.start == self.end {
            return Ok(None);
        }
        let (ch, len) = bstr::decode_utf8(&self.buf[self.start..self.end]);
        self.start += len.max(1);
        Ok(Some(ch.unwrap_or(char::REPLACEMENT_CHARACTER)))
    }
}

/// A source plus one character of lookahead and an optional read bound.
pub(crate) struct CharReader<'a> {
    source: Source<'a>,
    peeked: Option<char>,
    chars_read: u64,
    max_chars: Option<u64>,
}

impl<'a> CharReader<'a> {
    pub(crate) fn new(source: Source<'a>) -> Self {
        Self {
            source,
            peeked: None,
            chars_read: 0,
            max_chars: None,
        }
    }

    pub(crate) fn set_max_chars(&mut self, max: Option<u64>) {
        self.max_chars = max;
    }

    /// Returns the next character without consuming it.
    pub(crate) fn peek(&mut self) -> io::Result<Option<char>> {
        if self.peeked.is_none() {
            self.peeked = self.pull()?;
        }
        Ok(self.peeked)
    }

    /// Consumes and returns the next character.
    pub(crate) fn bump(&mut self) -> io::Result<Option<char>> {
        match self.peeked.take() {
            Some(c) => Ok(Some(c)),
            None => self.pull(),
        }
    }

    fn pull(&mut self) -> io::Result<Option<char>> {
        if self.max_chars.is_some_and(|max| self.chars_read >= max) {
            return Ok(None);
        }
        let next = match &mut self.source {
            Source::Text(chars) => chars.next(),
            Source::Reader(reader) => reader.next_char()?,
        };
        if next.is_some() {
            self.chars_read += 1;
        }
        Ok(next)
    }
}
