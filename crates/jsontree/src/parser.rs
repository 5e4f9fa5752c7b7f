//! JSON text to [`Value`] parser.
//!
//! A strict recursive-descent parser over a complete in-memory buffer
//! (RFC 8259 grammar). Numbers without fraction or exponent that fit in
//! `i64` become [`Value::Int`]; every other number becomes [`Value::Float`].
//! Repeated member names collapse into one member: the first position is
//! kept and the last value wins.
//!
//! # Example
//! ```
//! use jsontree::Value;
//!
//! let v: Value = r#"{"port": 1703, "ratio": 0.5, "tags": ["a"]}"#.parse()?;
//! assert!(v["port"].is_int());
//! assert!(v["ratio"].is_float());
//! assert_eq!(v["tags"].size(), 1);
//! # Ok::<(), jsontree::JsonError>(())
//! ```

use crate::error::{JsonError, Result};
use crate::value::{insert_member, Member, Value};
use std::str::FromStr;

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting of arrays and objects. Deeper input is rejected
    /// instead of exhausting the stack.
    pub max_depth: usize,
}

impl ParseOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 512;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parse a complete JSON document with default options.
pub fn parse(text: &str) -> Result<Value> {
    parse_with(text, &ParseOptions::default())
}

pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Value> {
    Parser::new(text, options).parse_document()
}

/// Parse UTF-8 encoded bytes. Invalid UTF-8 is reported as a parse error at
/// the first offending byte.
pub fn from_slice(bytes: &[u8]) -> Result<Value> {
    match std::str::from_utf8(bytes) {
        Ok(text) => parse(text),
        Err(err) => {
            let (line, column) = line_column(bytes, err.valid_up_to());
            Err(JsonError::Parse {
                line,
                column,
                message: "invalid UTF-8 in input".to_string(),
            })
        }
    }
}

impl Value {
    /// Shorthand for [`parse`].
    pub fn parse(text: &str) -> Result<Value> {
        parse(text)
    }

    pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Value> {
        parse_with(text, options)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Value> {
        from_slice(bytes)
    }
}

impl FromStr for Value {
    type Err = JsonError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

/// 1-based line and character column of byte offset `pos`.
fn line_column(bytes: &[u8], pos: usize) -> (usize, usize) {
    let before = &bytes[..pos.min(bytes.len())];
    let line_start = before
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    // Count characters, not bytes: skip UTF-8 continuation bytes.
    let column = before[line_start..]
        .iter()
        .filter(|&&b| b & 0xC0 != 0x80)
        .count()
        + 1;
    (line, column)
}

struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str, options: &ParseOptions) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            depth: 0,
            max_depth: options.max_depth,
        }
    }

    fn parse_document(&mut self) -> Result<Value> {
        self.skip_whitespace();
        if self.peek().is_none() {
            return Err(self.error("empty input, expected a JSON value"));
        }
        let value = self.parse_value()?;
        self.skip_whitespace();
        if self.pos < self.bytes.len() {
            return Err(self.error("trailing characters after JSON value"));
        }
        Ok(value)
    }

    fn error(&self, message: impl Into<String>) -> JsonError {
        self.error_at(self.pos, message)
    }

    fn error_at(&self, pos: usize, message: impl Into<String>) -> JsonError {
        let (line, column) = line_column(self.bytes, pos);
        JsonError::Parse {
            line,
            column,
            message: message.into(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.pos += 1;
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.peek() {
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b'"') => self.parse_string().map(Value::String),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(b't') => self.parse_literal("true", Value::Bool(true)),
            Some(b'f') => self.parse_literal("false", Value::Bool(false)),
            Some(b'n') => self.parse_literal("null", Value::Null),
            Some(_) => {
                let found = self.src[self.pos..].chars().next().unwrap_or('?');
                Err(self.error(format!("unexpected character {found:?}, expected a JSON value")))
            }
            None => Err(self.error("unexpected end of input, expected a JSON value")),
        }
    }

    fn parse_literal(&mut self, word: &str, value: Value) -> Result<Value> {
        if self.bytes[self.pos..].starts_with(word.as_bytes()) {
            self.pos += word.len();
            Ok(value)
        } else {
            Err(self.error(format!("invalid literal, expected `{word}`")))
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(self.error(format!(
                "nesting deeper than {} levels",
                self.max_depth
            )));
        }
        Ok(())
    }

    fn parse_array(&mut self) -> Result<Value> {
        let open = self.pos;
        self.enter()?;
        self.pos += 1;

        let mut items = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Value::Array(items));
        }

        loop {
            self.skip_whitespace();
            if self.peek().is_none() {
                return Err(self.error_at(open, "unterminated array"));
            }
            items.push(self.parse_value()?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => return Err(self.error("expected ',' or ']' in array")),
                None => return Err(self.error_at(open, "unterminated array")),
            }
        }

        self.depth -= 1;
        Ok(Value::Array(items))
    }

    fn parse_object(&mut self) -> Result<Value> {
        let open = self.pos;
        self.enter()?;
        self.pos += 1;

        let mut members: Vec<Member> = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Value::Object(members));
        }

        loop {
            self.skip_whitespace();
            let name = match self.peek() {
                Some(b'"') => self.parse_string()?,
                Some(_) => return Err(self.error("expected string key in object")),
                None => return Err(self.error_at(open, "unterminated object")),
            };

            self.skip_whitespace();
            match self.peek() {
                Some(b':') => self.pos += 1,
                Some(_) => return Err(self.error("expected ':' after object key")),
                None => return Err(self.error_at(open, "unterminated object")),
            }

            self.skip_whitespace();
            if self.peek().is_none() {
                return Err(self.error_at(open, "unterminated object"));
            }
            let value = self.parse_value()?;
            insert_member(&mut members, name, value);

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => return Err(self.error("expected ',' or '}' in object")),
                None => return Err(self.error_at(open, "unterminated object")),
            }
        }

        self.depth -= 1;
        Ok(Value::Object(members))
    }

    /// Parse a quoted string starting at the opening quote.
    fn parse_string(&mut self) -> Result<String> {
        let open = self.pos;
        self.pos += 1;
        let mut out = String::new();

        loop {
            // Copy the run of plain characters in one go. The run stops at an
            // ASCII byte, so both ends are char boundaries.
            let start = self.pos;
            while let Some(b) = self.peek() {
                if b == b'"' || b == b'\\' || b < 0x20 {
                    break;
                }
                self.pos += 1;
            }
            out.push_str(&self.src[start..self.pos]);

            match self.peek() {
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(out);
                }
                Some(b'\\') => {
                    self.pos += 1;
                    let ch = self.parse_escape(open)?;
                    out.push(ch);
                }
                Some(_) => return Err(self.error("unescaped control character in string")),
                None => return Err(self.error_at(open, "unterminated string")),
            }
        }
    }

    /// Decode the escape following a backslash.
    fn parse_escape(&mut self, open: usize) -> Result<char> {
        let escape_start = self.pos - 1;
        let ch = match self.peek() {
            Some(b'"') => '"',
            Some(b'\\') => '\\',
            Some(b'/') => '/',
            Some(b'b') => '\u{0008}',
            Some(b'f') => '\u{000C}',
            Some(b'n') => '\n',
            Some(b'r') => '\r',
            Some(b't') => '\t',
            Some(b'u') => {
                self.pos += 1;
                return self.parse_unicode_escape(escape_start);
            }
            Some(_) => {
                let found = self.src[self.pos..].chars().next().unwrap_or('?');
                return Err(self.error_at(
                    escape_start,
                    format!("invalid escape sequence '\\{found}'"),
                ));
            }
            None => return Err(self.error_at(open, "unterminated string")),
        };
        self.pos += 1;
        Ok(ch)
    }

    /// `\uXXXX`, combining a UTF-16 surrogate pair when one follows.
    fn parse_unicode_escape(&mut self, escape_start: usize) -> Result<char> {
        let first = self.parse_hex4(escape_start)?;
        let code = match first {
            0xD800..=0xDBFF => {
                if !self.bytes[self.pos..].starts_with(b"\\u") {
                    return Err(self.error_at(escape_start, "unpaired surrogate in \\u escape"));
                }
                self.pos += 2;
                let second = self.parse_hex4(escape_start)?;
                if !(0xDC00..=0xDFFF).contains(&second) {
                    return Err(self.error_at(escape_start, "unpaired surrogate in \\u escape"));
                }
                0x10000 + ((u32::from(first) - 0xD800) << 10) + (u32::from(second) - 0xDC00)
            }
            0xDC00..=0xDFFF => {
                return Err(self.error_at(escape_start, "unpaired surrogate in \\u escape"));
            }
            _ => u32::from(first),
        };
        char::from_u32(code)
            .ok_or_else(|| self.error_at(escape_start, "invalid \\u escape"))
    }

    fn parse_hex4(&mut self, escape_start: usize) -> Result<u16> {
        let digits = self
            .bytes
            .get(self.pos..self.pos + 4)
            .filter(|d| d.iter().all(u8::is_ascii_hexdigit))
            .ok_or_else(|| {
                self.error_at(escape_start, "invalid \\u escape, expected four hex digits")
            })?;
        let code = digits.iter().fold(0u16, |acc, &d| {
            // Digits were validated above.
            let nibble = (d as char).to_digit(16).unwrap_or(0) as u16;
            (acc << 4) | nibble
        });
        self.pos += 4;
        Ok(code)
    }

    fn parse_number(&mut self) -> Result<Value> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }

        match self.peek() {
            Some(b'0') => self.pos += 1,
            Some(b'1'..=b'9') => self.skip_digits(),
            _ => return Err(self.error_at(start, "invalid number, expected digit")),
        }

        let mut integral = true;
        if self.peek() == Some(b'.') {
            integral = false;
            self.pos += 1;
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(self.error("invalid number, expected digit after decimal point"));
            }
            self.skip_digits();
        }

        if let Some(b'e' | b'E') = self.peek() {
            integral = false;
            self.pos += 1;
            if let Some(b'+' | b'-') = self.peek() {
                self.pos += 1;
            }
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(self.error("invalid number, expected digit in exponent"));
            }
            self.skip_digits();
        }

        let text = &self.src[start..self.pos];
        if integral {
            if let Ok(n) = text.parse::<i64>() {
                return Ok(Value::Int(n));
            }
        }
        match text.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Value::Float(f)),
            _ => Err(self.error_at(start, format!("number {text} is out of range"))),
        }
    }

    fn skip_digits(&mut self) {
        while let Some(b'0'..=b'9') = self.peek() {
            self.pos += 1;
        }
    }
}
