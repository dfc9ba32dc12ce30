//! Position-tracked character scanner shared by both dialect readers
//!
//! Delimiter search uses memchr (SIMD when available):
//! - `memchr` for single-byte delimiters
//! - `memmem` for multi-byte terminators such as `-->`
//!
//! Positions are byte offsets into the source and always sit on a char
//! boundary. Line/column are only computed when an error is raised.

use memchr::{memchr, memchr_iter, memmem};

use super::escape::decode_escapes;
use crate::error::{ErrorKind, ParseError};

/// Scanner over a borrowed source buffer
pub struct Scanner<'a> {
    filename: &'a str,
    input: &'a str,
    pos: usize,
    /// Treat `#` up to end of line as whitespace
    hash_comments: bool,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given source
    #[inline]
    pub fn new(filename: &'a str, input: &'a str) -> Self {
        Scanner {
            filename,
            input,
            pos: 0,
            hash_comments: false,
        }
    }

    /// Enable or disable `#` line comments in [`skip_whitespace`](Self::skip_whitespace)
    #[inline]
    pub fn with_hash_comments(mut self, enabled: bool) -> Self {
        self.hash_comments = enabled;
        self
    }

    #[inline]
    pub fn filename(&self) -> &'a str {
        self.filename
    }

    #[inline]
    pub fn source(&self) -> &'a str {
        self.input
    }

    /// Get the current position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Set the current position (must be a char boundary)
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(self.input.is_char_boundary(pos));
        self.pos = pos;
    }

    #[inline]
    pub fn has_next(&self) -> bool {
        self.pos < self.input.len()
    }

    /// Get remaining input
    #[inline]
    pub fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Get a slice from start to end positions
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.input[start..end]
    }

    /// Peek at the current char without advancing
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Consume and return the current char
    #[inline]
    pub fn next_char(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Advance by n chars (stops at end of input)
    pub fn skip(&mut self, n: usize) {
        for _ in 0..n {
            if self.next_char().is_none() {
                break;
            }
        }
    }

    /// Un-consume the previous char
    pub fn go_back(&mut self) {
        if let Some(c) = self.input[..self.pos].chars().next_back() {
            self.pos -= c.len_utf8();
        }
    }

    /// Skip whitespace (space, tab, newline, carriage return), plus `#` line
    /// comments when enabled
    pub fn skip_whitespace(&mut self) {
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b' ' | b'\t' | b'\n' | b'\r' => self.pos += 1,
                b'#' if self.hash_comments => {
                    self.pos = match memchr(b'\n', &bytes[self.pos..]) {
                        Some(i) => self.pos + i + 1,
                        None => bytes.len(),
                    };
                }
                _ => break,
            }
        }
    }

    /// Move to the next occurrence of `needle`. Returns false (position
    /// unchanged) if it does not occur.
    pub fn skip_to(&mut self, needle: &str) -> bool {
        match memmem::find(self.remaining().as_bytes(), needle.as_bytes()) {
            Some(i) => {
                self.pos += i;
                true
            }
            None => false,
        }
    }

    /// Non-consuming lookahead
    #[inline]
    pub fn is_next(&self, s: &str) -> bool {
        self.remaining().starts_with(s)
    }

    /// Consume `c` or fail with a syntax error
    pub fn expect(&mut self, c: char) -> Result<(), ParseError> {
        match self.peek() {
            Some(found) if found == c => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(found) => Err(self.syntax_error(format!("'{}' expected, found '{}'", c, found))),
            None => Err(self.syntax_error(format!("unexpected end of input, '{}' expected", c))),
        }
    }

    /// Consume `s` or fail with a syntax error
    pub fn expect_str(&mut self, s: &str) -> Result<(), ParseError> {
        if self.is_next(s) {
            self.pos += s.len();
            Ok(())
        } else if !self.has_next() {
            Err(self.syntax_error(format!("unexpected end of input, '{}' expected", s)))
        } else {
            Err(self.syntax_error(format!("'{}' expected", s)))
        }
    }

    /// Read up to (not including) `delimiter`, or to the end of input
    pub fn read_until(&mut self, delimiter: u8) -> &'a str {
        let start = self.pos;
        let end = match memchr(delimiter, &self.input.as_bytes()[start..]) {
            Some(i) => start + i,
            None => self.input.len(),
        };
        self.pos = end;
        &self.input[start..end]
    }

    /// Read up to the next whitespace char, or to the end of input
    pub fn read_until_whitespace(&mut self) -> &'a str {
        let start = self.pos;
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() && !matches!(bytes[self.pos], b' ' | b'\t' | b'\n' | b'\r') {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    /// Read a name made of one `is_start` char followed by `is_part` chars
    pub fn read_name_with(
        &mut self,
        is_start: fn(char) -> bool,
        is_part: fn(char) -> bool,
    ) -> Option<&'a str> {
        let start = self.pos;
        let mut chars = self.remaining().char_indices();
        match chars.next() {
            Some((_, c)) if is_start(c) => {}
            _ => return None,
        }
        let mut end = self.input.len();
        for (i, c) in chars {
            if !is_part(c) {
                end = start + i;
                break;
            }
        }
        self.pos = end;
        Some(&self.input[start..end])
    }

    /// Read an XML name (starts with letter/underscore/colon, continues with
    /// letters/digits/hyphens/underscores/periods/colons)
    #[inline]
    pub fn read_name(&mut self) -> Option<&'a str> {
        self.read_name_with(is_name_start_char, is_name_char)
    }

    /// Read a string body; the opening quote must already be consumed.
    ///
    /// With `quote == None` the string runs to the end of input. Backslash
    /// escapes skip the following char when searching for the closing quote
    /// and are decoded when `process_escapes` is set.
    pub fn parse_string(
        &mut self,
        quote: Option<char>,
        process_escapes: bool,
    ) -> Result<String, ParseError> {
        let start = self.pos;
        let bytes = self.input.as_bytes();
        let mut end = None;
        let mut i = start;
        while i < bytes.len() {
            let b = bytes[i];
            if b == b'\\' && process_escapes {
                i += 2;
                continue;
            }
            if let Some(q) = quote {
                // quotes are always ASCII
                if b as u32 == q as u32 {
                    end = Some(i);
                    break;
                }
            }
            i += 1;
        }

        let end = match (quote, end) {
            (Some(_), Some(end)) => end,
            (Some(q), None) => {
                self.pos = self.input.len();
                return Err(self.syntax_error(format!("unclosed string literal, missing {}", q)));
            }
            (None, _) => self.input.len(),
        };
        // a trailing lone backslash can push `i` past the end
        let end = end.min(self.input.len());

        let raw = &self.input[start..end];
        let text = if process_escapes {
            match decode_escapes(raw) {
                Ok(text) => text.into_owned(),
                Err(e) => {
                    self.pos = start + e.offset;
                    return Err(self.syntax_error(e.message));
                }
            }
        } else {
            raw.to_string()
        };

        self.pos = end;
        if quote.is_some() {
            self.pos += 1;
        }
        Ok(text)
    }

    /// 1-based line and column of the current position
    pub fn line_column(&self) -> (usize, usize) {
        let before = &self.input.as_bytes()[..self.pos];
        let line = memchr_iter(b'\n', before).count() + 1;
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        let column = self.input[line_start..self.pos].chars().count() + 1;
        (line, column)
    }

    /// Build an error at the current position
    pub fn error(&self, kind: ErrorKind, message: impl Into<String>) -> ParseError {
        let (line, column) = self.line_column();
        ParseError::new(kind, self.filename, line, column, message)
    }

    #[inline]
    pub fn syntax_error(&self, message: impl Into<String>) -> ParseError {
        self.error(ErrorKind::Syntax, message)
    }
}

/// Check if char is a valid XML name start character
/// Allows letters (including non-ASCII), underscore and colon
#[inline]
pub fn is_name_start_char(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == ':'
}

/// Check if char is a valid XML name character
#[inline]
pub fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_name() {
        let mut scanner = Scanner::new("t", "element-name>");
        assert_eq!(scanner.read_name(), Some("element-name"));
        assert_eq!(scanner.position(), 12);
        assert_eq!(scanner.peek(), Some('>'));
    }

    #[test]
    fn test_read_name_rejects_digit_start() {
        let mut scanner = Scanner::new("t", "1abc");
        assert_eq!(scanner.read_name(), None);
        assert_eq!(scanner.position(), 0);
    }

    #[test]
    fn test_read_name_unicode() {
        let mut scanner = Scanner::new("t", "über:ns.x/>");
        assert_eq!(scanner.read_name(), Some("über:ns.x"));
        assert_eq!(scanner.peek(), Some('/'));
    }

    #[test]
    fn test_skip_whitespace() {
        let mut scanner = Scanner::new("t", "  \t\n hello");
        scanner.skip_whitespace();
        assert_eq!(scanner.position(), 5);
    }

    #[test]
    fn test_hash_comments() {
        let mut scanner = Scanner::new("t", "  # note\n  # more\n@a").with_hash_comments(true);
        scanner.skip_whitespace();
        assert_eq!(scanner.peek(), Some('@'));

        let mut plain = Scanner::new("t", "  # note");
        plain.skip_whitespace();
        assert_eq!(plain.peek(), Some('#'));
    }

    #[test]
    fn test_go_back_multibyte() {
        let mut scanner = Scanner::new("t", "é<");
        assert_eq!(scanner.next_char(), Some('é'));
        scanner.go_back();
        assert_eq!(scanner.position(), 0);
        scanner.go_back();
        assert_eq!(scanner.position(), 0);
    }

    #[test]
    fn test_skip_to() {
        let mut scanner = Scanner::new("t", "<!-- a - b -->rest");
        assert!(scanner.skip_to("-->"));
        assert_eq!(scanner.position(), 11);
        assert!(!scanner.skip_to("nope"));
        assert_eq!(scanner.position(), 11);
    }

    #[test]
    fn test_read_until() {
        let mut scanner = Scanner::new("t", "1, 2)tail");
        assert_eq!(scanner.read_until(b')'), "1, 2");
        assert_eq!(scanner.peek(), Some(')'));
        assert_eq!(scanner.read_until(b'!'), ")tail");
        assert!(!scanner.has_next());
    }

    #[test]
    fn test_parse_string_with_escapes() {
        let mut scanner = Scanner::new("t", r#"a \"b\" c" tail"#);
        let s = scanner.parse_string(Some('"'), true).unwrap();
        assert_eq!(s, "a \"b\" c");
        assert_eq!(scanner.remaining(), " tail");
    }

    #[test]
    fn test_parse_string_unclosed() {
        let mut scanner = Scanner::new("t", "abc");
        let err = scanner.parse_string(Some('\''), true).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
    }

    #[test]
    fn test_parse_string_to_end() {
        let mut scanner = Scanner::new("t", r"tab\there");
        let s = scanner.parse_string(None, true).unwrap();
        assert_eq!(s, "tab\there");
    }

    #[test]
    fn test_expect() {
        let mut scanner = Scanner::new("t", "ab");
        assert!(scanner.expect('a').is_ok());
        let err = scanner.expect('x').unwrap_err();
        assert_eq!((err.line, err.column), (1, 2));
        assert!(scanner.expect_str("b").is_ok());
        assert!(scanner.expect('>').is_err());
    }

    #[test]
    fn test_line_column() {
        let mut scanner = Scanner::new("f.xml", "<a>\n  <b>\n  x");
        scanner.set_position(12);
        assert_eq!(scanner.line_column(), (3, 3));
        let err = scanner.syntax_error("boom");
        assert_eq!(err.to_string(), "f.xml:3:3: boom");
    }
}
