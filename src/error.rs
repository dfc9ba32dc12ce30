//! Error types
//!
//! Parse failures carry the source file name and the 1-based line/column of
//! the scanner when the error was raised. Attribute conversions fail lazily,
//! at access time, with an [`AttributeError`].

use std::fmt;

/// Category of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unexpected character, missing quote, tag mismatch, malformed attribute
    Syntax,
    /// DOCTYPE/DTD encountered
    UnsupportedFeature,
    /// Declared or detected encoding is not UTF-8
    Encoding,
    /// Missing required attribute or malformed typed value
    Attribute,
}

impl ErrorKind {
    /// Short snake_case name (used for NIF atoms and logs)
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Syntax => "syntax",
            ErrorKind::UnsupportedFeature => "unsupported_feature",
            ErrorKind::Encoding => "encoding",
            ErrorKind::Attribute => "attribute",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed parse. No partial tree is ever returned alongside it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{filename}:{line}:{column}: {message}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub filename: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(
        kind: ErrorKind,
        filename: impl Into<String>,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        ParseError {
            kind,
            filename: filename.into(),
            line,
            column,
            message: message.into(),
        }
    }
}

/// Attribute lookup or conversion failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AttributeError {
    pub message: String,
}

impl AttributeError {
    pub fn new(message: impl Into<String>) -> Self {
        AttributeError {
            message: message.into(),
        }
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Attribute
    }
}

/// Umbrella error so callers can `?` across parsing and attribute access
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Attribute(#[from] AttributeError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Parse(e) => e.kind,
            Error::Attribute(e) => e.kind(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
