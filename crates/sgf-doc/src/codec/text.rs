//! Character-level reading and writing of SGF text.
//!
//! [`Reader`] walks a string while tracking the 1-based line and column of
//! the next character; every [`DecodeError`] it produces carries that
//! position. [`Writer`] accumulates encoded output and owns the escaping
//! rules.

use std::str::Chars;

use crate::error::DecodeError;

// =============================================================================
// DECODING
// =============================================================================

/// Reader for decoding SGF text.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    chars: std::iter::Peekable<Chars<'a>>,
    line: u32,
    column: u32,
}

impl<'a> Reader<'a> {
    /// Creates a new reader positioned at line 1, column 1.
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Returns the (line, column) of the next character.
    pub fn position(&self) -> (u32, u32) {
        (self.line, self.column)
    }

    pub fn is_empty(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    pub fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// Consumes one character.
    pub fn next_char(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consumes one character, failing at end of input.
    pub fn read_char(&mut self, context: &'static str) -> Result<char, DecodeError> {
        let (line, column) = self.position();
        self.next_char()
            .ok_or(DecodeError::UnexpectedEof { line, column, context })
    }

    /// Consumes `expected` or fails.
    pub fn expect(&mut self, expected: char, context: &'static str) -> Result<(), DecodeError> {
        let (line, column) = self.position();
        let found = self.read_char(context)?;
        if found == expected {
            Ok(())
        } else {
            Err(self.unexpected_at(line, column, context, found))
        }
    }

    /// Builds an "unexpected character" error at the given position.
    pub fn unexpected_at(
        &self,
        line: u32,
        column: u32,
        expected: &'static str,
        found: char,
    ) -> DecodeError {
        DecodeError::Unexpected { line, column, expected, found }
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.next_char();
        }
    }

    /// Reads the escaped content of a value up to (and consuming) the
    /// closing `]`. The opening `[` must already be consumed. Escapes are
    /// kept so composed values can still be split on an unescaped `:`.
    pub fn read_escaped_value(&mut self) -> Result<String, DecodeError> {
        let mut out = String::new();
        loop {
            match self.read_char("property value")? {
                ']' => return Ok(out),
                '\\' => {
                    out.push('\\');
                    out.push(self.read_char("property value")?);
                }
                c => out.push(c),
            }
        }
    }
}

/// Removes escapes and soft line breaks from escaped value text.
pub fn unescape(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            // Soft line break: "\" followed by any of \n, \r, \r\n, \n\r.
            Some(first @ ('\n' | '\r')) => {
                let pair = if first == '\n' { '\r' } else { '\n' };
                if chars.peek() == Some(&pair) {
                    chars.next();
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

/// Splits escaped value text at the first unescaped `:`.
pub fn split_composed(escaped: &str) -> Option<(&str, &str)> {
    let mut escaped_next = false;
    for (i, c) in escaped.char_indices() {
        match c {
            _ if escaped_next => escaped_next = false,
            '\\' => escaped_next = true,
            ':' => return Some((&escaped[..i], &escaped[i + 1..])),
            _ => {}
        }
    }
    None
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for encoding SGF text.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: String,
}

impl Writer {
    pub fn new() -> Self {
        Self { buf: String::new() }
    }

    pub fn into_string(self) -> String {
        self.buf
    }

    #[inline]
    pub fn write_char(&mut self, c: char) {
        self.buf.push(c);
    }

    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    /// Writes raw value text, escaping `\` and `]` always and `:` when
    /// `escape_colon` is set.
    pub fn write_escaped(&mut self, raw: &str, escape_colon: bool) {
        for c in raw.chars() {
            if c == '\\' || c == ']' || (escape_colon && c == ':') {
                self.buf.push('\\');
            }
            self.buf.push(c);
        }
    }
}
