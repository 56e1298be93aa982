//! Lexical forms of the attribute datatypes.
//!
//! Every payload type implements [`FromStr`](std::str::FromStr) with [`ParseError`] and
//! [`Display`](std::fmt::Display) producing a form that parses back to an equal value.
mod binary;
mod duration;
mod iso8601;
mod names;
mod network;
mod primitive;
mod uri;
mod xpath_value;

pub use binary::{Base64Binary, HexBinary};
pub use duration::{DayTimeDuration, YearMonthDuration};
pub use iso8601::{Date, DateTime, Time};
pub use names::{Rfc822Name, X500Name};
pub use network::{DnsName, IpAddress, Ipv6Mask, PortRange};
pub use primitive::{format_double, parse_boolean, parse_double, parse_integer};
pub use uri::AnyUri;
pub use xpath_value::XPathValue;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {kind} string \"{input}\" at position {position}: {reason}")]
pub struct ParseError {
    pub kind: &'static str,
    pub input: String,
    pub position: usize,
    pub reason: String,
}

impl ParseError {
    pub fn new(kind: &'static str, input: &str, position: usize, reason: impl Into<String>) -> Self {
        Self { kind, input: input.to_string(), position, reason: reason.into() }
    }
}

/// Byte cursor over an ASCII-structured lexical form. Positions in errors are byte offsets.
pub(crate) struct Scanner<'a> {
    kind: &'static str,
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(kind: &'static str, input: &'a str) -> Self {
        Self { kind, input, bytes: input.as_bytes(), pos: 0 }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    pub(crate) fn bump(&mut self) {
        self.pos += 1;
    }

    pub(crate) fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn error_at(&self, position: usize, reason: impl Into<String>) -> ParseError {
        ParseError::new(self.kind, self.input, position, reason)
    }

    pub(crate) fn error(&self, reason: impl Into<String>) -> ParseError {
        self.error_at(self.pos, reason)
    }

    pub(crate) fn expect(&mut self, b: u8) -> Result<(), ParseError> {
        if self.eat(b) { Ok(()) } else { Err(self.error(format!("expected '{}'", b as char))) }
    }

    /// A run of ASCII digits (at least one), returned as text.
    pub(crate) fn digits(&mut self) -> Result<&'a str, ParseError> {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.error("expected digit"));
        }
        Ok(&self.input[start..self.pos])
    }

    /// Exactly `n` digits, as a number.
    pub(crate) fn fixed_digits(&mut self, n: usize) -> Result<u32, ParseError> {
        let start = self.pos;
        let mut v = 0u32;
        for _ in 0..n {
            match self.peek() {
                Some(b) if b.is_ascii_digit() => {
                    v = v * 10 + u32::from(b - b'0');
                    self.pos += 1;
                }
                _ => return Err(self.error("expected digit")),
            }
        }
        if self.peek().is_some_and(|b| b.is_ascii_digit()) {
            return Err(self.error_at(start, format!("expected exactly {n} digits")));
        }
        Ok(v)
    }

    pub(crate) fn finish(&self) -> Result<(), ParseError> {
        if self.at_end() { Ok(()) } else { Err(self.error("unexpected trailing characters")) }
    }
}
