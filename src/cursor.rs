//! Chained parsing over a buffer holding many numbers.

use crate::{parse_float, parse_integer, parse_unsigned, Parsed};

/// Walks a byte buffer, parsing one number at a time and advancing by the
/// length each parse reports as consumed.
///
/// Numbers may be separated by ASCII whitespace, `,` or `;`. A parse that
/// converts nothing leaves the cursor where it was; [`Cursor::skip_token`]
/// moves past the offending bytes.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

fn is_separator(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b',' || b == b';'
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Unread part of the buffer.
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    pub fn skip_separators(&mut self) {
        while self.buf.get(self.pos).is_some_and(|&b| is_separator(b)) {
            self.pos += 1;
        }
    }

    /// Skip up to the next separator and return the skipped bytes.
    pub fn skip_token(&mut self) -> &'a [u8] {
        let start = self.pos;
        while self.buf.get(self.pos).is_some_and(|&b| !is_separator(b)) {
            self.pos += 1;
        }
        &self.buf[start..self.pos]
    }

    fn advance<T>(&mut self, parse: impl FnOnce(&'a [u8]) -> Parsed<T>) -> Option<Parsed<T>> {
        self.skip_separators();
        if self.is_empty() {
            return None;
        }
        let parsed = parse(self.rest());
        self.pos += parsed.consumed;
        Some(parsed)
    }

    /// Parse the next signed integer. `None` once only separators remain.
    pub fn next_i64(&mut self, base: u32) -> Option<Parsed<i64>> {
        self.advance(|rest| parse_integer(rest, base))
    }

    /// Parse the next unsigned integer. `None` once only separators remain.
    pub fn next_u64(&mut self, base: u32) -> Option<Parsed<u64>> {
        self.advance(|rest| parse_unsigned(rest, base))
    }

    /// Parse the next float. `None` once only separators remain.
    pub fn next_f64(&mut self) -> Option<Parsed<f64>> {
        self.advance(parse_float)
    }
}
