//! XML Entity Decoding
//!
//! Only the five built-in entities are recognized:
//! `&quot; &apos; &lt; &gt; &amp;`. Anything else that looks like an
//! entity reference (including numeric references) is kept literally.
//!
//! Uses Cow for zero-copy when no entities are present.

use memchr::memchr;
use std::borrow::Cow;

/// Decode the built-in entities in text content
///
/// Returns Borrowed if no `&` is present (zero-copy).
#[inline]
pub fn decode_text(input: &str) -> Cow<'_, str> {
    // Fast path: check if there are any entities using SIMD
    if memchr(b'&', input.as_bytes()).is_none() {
        return Cow::Borrowed(input);
    }
    Cow::Owned(decode_entities(input))
}

/// Decode all built-in entity references in the input
///
/// A single left-to-right pass, so `&amp;lt;` decodes to `&lt;` and is not
/// decoded again.
pub fn decode_entities(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut result = String::with_capacity(input.len());
    let mut pos = 0;

    while pos < bytes.len() {
        if let Some(amp_pos) = memchr(b'&', &bytes[pos..]) {
            // Copy everything before the entity
            result.push_str(&input[pos..pos + amp_pos]);
            pos += amp_pos;

            let decoded = memchr(b';', &bytes[pos..])
                .and_then(|semi| decode_entity(&input[pos + 1..pos + semi]).map(|c| (c, semi)));

            match decoded {
                Some((c, semi)) => {
                    result.push(c);
                    pos += semi + 1;
                }
                None => {
                    // Unknown entity or no semicolon, keep the ampersand
                    result.push('&');
                    pos += 1;
                }
            }
        } else {
            // No more entities, copy the rest
            result.push_str(&input[pos..]);
            break;
        }
    }

    result
}

/// Decode a single entity name (without & and ;)
#[inline]
fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "quot" => Some('"'),
        "apos" => Some('\''),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        _ => None,
    }
}

/// Encode text for XML output (escape special characters)
pub fn encode_text(input: &str) -> Cow<'_, str> {
    // Fast path: check if any escaping needed
    if !input.bytes().any(|b| matches!(b, b'<' | b'>' | b'&' | b'"' | b'\'')) {
        return Cow::Borrowed(input);
    }

    let mut result = String::with_capacity(input.len() + 16);
    for c in input.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&apos;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}
