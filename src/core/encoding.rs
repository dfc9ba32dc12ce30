//! Input encoding checks
//!
//! Only UTF-8 is accepted. UTF-16 input is detected from its BOM or byte
//! pattern and rejected instead of being transcoded.

/// Encoding detected from byte order mark or initial bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
}

impl XmlEncoding {
    /// Detect encoding from byte order mark or initial bytes
    pub fn detect(input: &[u8]) -> Self {
        if input.len() < 2 {
            return XmlEncoding::Utf8;
        }

        match (input[0], input[1]) {
            // UTF-16 LE BOM: 0xFF 0xFE
            (0xFF, 0xFE) => XmlEncoding::Utf16Le,
            // UTF-16 BE BOM: 0xFE 0xFF
            (0xFE, 0xFF) => XmlEncoding::Utf16Be,
            // No BOM - check for UTF-16 pattern (< followed by null or null followed by <)
            (0x00, b'<') => XmlEncoding::Utf16Be,
            (b'<', 0x00) => XmlEncoding::Utf16Le,
            _ => XmlEncoding::Utf8,
        }
    }
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Strip a UTF-8 BOM from text input
#[inline]
pub fn strip_bom(input: &str) -> &str {
    input.strip_prefix('\u{FEFF}').unwrap_or(input)
}

/// View raw bytes as UTF-8 text, skipping a UTF-8 BOM
pub fn as_utf8(input: &[u8]) -> Result<&str, String> {
    match XmlEncoding::detect(input) {
        XmlEncoding::Utf8 => {}
        other => return Err(format!("UTF-8 encoding is only supported, found {:?}", other)),
    }
    let bytes = input.strip_prefix(UTF8_BOM).unwrap_or(input);
    std::str::from_utf8(bytes).map_err(|e| format!("invalid UTF-8: {}", e))
}

/// Check a declared encoding name (case-insensitive `UTF-8`)
#[inline]
pub fn is_supported_label(label: &str) -> bool {
    label.eq_ignore_ascii_case("UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_utf8() {
        assert_eq!(XmlEncoding::detect(b"<root/>"), XmlEncoding::Utf8);
        assert_eq!(XmlEncoding::detect(&[0xEF, 0xBB, 0xBF, b'<']), XmlEncoding::Utf8);
    }

    #[test]
    fn test_detect_utf16() {
        assert_eq!(XmlEncoding::detect(&[0xFF, 0xFE, b'<', 0x00]), XmlEncoding::Utf16Le);
        assert_eq!(XmlEncoding::detect(&[0xFE, 0xFF, 0x00, b'<']), XmlEncoding::Utf16Be);
        assert_eq!(XmlEncoding::detect(&[b'<', 0x00, b'a', 0x00]), XmlEncoding::Utf16Le);
    }

    #[test]
    fn test_as_utf8() {
        assert_eq!(as_utf8(b"\xEF\xBB\xBF<a/>").unwrap(), "<a/>");
        assert_eq!(as_utf8(b"<a/>").unwrap(), "<a/>");
        assert!(as_utf8(&[0xFF, 0xFE, b'<', 0x00]).is_err());
        assert!(as_utf8(&[b'<', 0xC3, 0x28]).is_err());
    }

    #[test]
    fn test_labels() {
        assert!(is_supported_label("UTF-8"));
        assert!(is_supported_label("utf-8"));
        assert!(is_supported_label("Utf-8"));
        assert!(!is_supported_label("UTF8"));
        assert!(!is_supported_label("ISO-8859-1"));
    }
}
