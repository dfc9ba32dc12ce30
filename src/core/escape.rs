//! Backslash escape decoding and encoding
//!
//! Decoding supports:
//! - `\n \r \t \b \f \v \0 \\ \' \"`
//! - `\xHH` (code point up to 0xFF)
//! - `\uHHHH`
//! - backslash + newline as line continuation
//!
//! Uses Cow for zero-copy when no backslash is present.

use memchr::memchr;
use std::borrow::Cow;
use std::fmt::Write;

/// Failed escape sequence; `offset` is the byte offset of the backslash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapeError {
    pub offset: usize,
    pub message: String,
}

/// Decode backslash escapes in `input`
///
/// Returns Borrowed if no backslash is present.
pub fn decode_escapes(input: &str) -> Result<Cow<'_, str>, EscapeError> {
    // Fast path
    if memchr(b'\\', input.as_bytes()).is_none() {
        return Ok(Cow::Borrowed(input));
    }

    let mut result = String::with_capacity(input.len());
    let mut chars = input.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        let escaped = match chars.next() {
            Some((_, e)) => e,
            None => {
                return Err(EscapeError {
                    offset,
                    message: "unterminated escape sequence".to_string(),
                })
            }
        };
        match escaped {
            'n' => result.push('\n'),
            'r' => result.push('\r'),
            't' => result.push('\t'),
            'b' => result.push('\u{08}'),
            'f' => result.push('\u{0C}'),
            'v' => result.push('\u{0B}'),
            '0' => result.push('\0'),
            '\\' => result.push('\\'),
            '\'' => result.push('\''),
            '"' => result.push('"'),
            '\n' => {}
            '\r' => {
                if let Some(&(_, '\n')) = chars.peek() {
                    chars.next();
                }
            }
            'x' | 'u' => {
                let digits = if escaped == 'x' { 2 } else { 4 };
                let mut code = 0u32;
                for _ in 0..digits {
                    let digit = chars.next().and_then(|(_, d)| d.to_digit(16));
                    match digit {
                        Some(d) => code = code * 16 + d,
                        None => {
                            return Err(EscapeError {
                                offset,
                                message: format!(
                                    "invalid \\{} escape: {} hex digits required",
                                    escaped, digits
                                ),
                            })
                        }
                    }
                }
                match char::from_u32(code) {
                    Some(ch) => result.push(ch),
                    None => {
                        return Err(EscapeError {
                            offset,
                            message: format!("invalid code point U+{:04X}", code),
                        })
                    }
                }
            }
            other => {
                return Err(EscapeError {
                    offset,
                    message: format!("unknown escape sequence '\\{}'", other),
                })
            }
        }
    }

    Ok(Cow::Owned(result))
}

/// Escape only backslashes (`\` -> `\\`)
pub fn escape_backslashes(input: &str) -> Cow<'_, str> {
    if memchr(b'\\', input.as_bytes()).is_none() {
        return Cow::Borrowed(input);
    }
    Cow::Owned(input.replace('\\', "\\\\"))
}

/// Write `input` as a double-quoted string literal that
/// [`decode_escapes`] turns back into `input`
pub fn write_quoted(input: &str, buf: &mut String) {
    buf.push('"');
    for c in input.chars() {
        match c {
            '\\' => buf.push_str("\\\\"),
            '"' => buf.push_str("\\\""),
            '\n' => buf.push_str("\\n"),
            '\r' => buf.push_str("\\r"),
            '\t' => buf.push_str("\\t"),
            '\u{08}' => buf.push_str("\\b"),
            '\u{0C}' => buf.push_str("\\f"),
            '\u{0B}' => buf.push_str("\\v"),
            '\0' => buf.push_str("\\0"),
            c if c.is_ascii_control() => {
                let _ = write!(buf, "\\x{:02x}", c as u32);
            }
            c => buf.push(c),
        }
    }
    buf.push('"');
}
