//! VCM reader
//!
//! Compact notation for the same tree model:
//!
//! ```text
//! @panel size "400,300" color "#202020" {
//!     @label id title (1, 2)   # comment
//!     @button onclick 'menu.open()'
//! }
//! ```
//!
//! `@name` opens an element, `name value` pairs set attributes, `{ ... }`
//! holds children. The outer element is supplied by the caller. Values are
//! quoted strings, `( ... )` raw runs (kept as opaque text) or bare tokens.

use tracing::debug;

use crate::core::scanner::Scanner;
use crate::dom::{Document, Element};
use crate::error::ParseError;

/// Reader for the VCM dialect
pub struct VcmReader<'a> {
    scanner: Scanner<'a>,
}

impl<'a> VcmReader<'a> {
    pub fn new(filename: &'a str, source: &'a str) -> Self {
        VcmReader {
            scanner: Scanner::new(filename, source).with_hash_comments(true),
        }
    }

    /// Parse all top-level entries into a root element tagged `root_tag`
    pub fn parse(mut self, root_tag: &str) -> Result<Document, ParseError> {
        debug!(
            filename = self.scanner.filename(),
            bytes = self.scanner.source().len(),
            root_tag,
            "parsing vcm"
        );
        let Some(root) = Element::try_new(root_tag) else {
            return Err(self
                .scanner
                .syntax_error(format!("invalid root tag {:?}", root_tag)));
        };

        match self.parse_scopes(root) {
            Ok(root) => {
                debug!(
                    filename = self.scanner.filename(),
                    entries = root.size(),
                    "parsed vcm"
                );
                Ok(Document::with_root(root))
            }
            Err(e) => {
                debug!(error = %e, "vcm parse failed");
                Err(e)
            }
        }
    }

    /// `('@' name attrpair* ('{' ... '}')?)*`, nested scopes kept on a stack
    fn parse_scopes(&mut self, mut root: Element) -> Result<Element, ParseError> {
        let mut open: Vec<Element> = Vec::new();

        loop {
            self.scanner.skip_whitespace();
            match self.scanner.peek() {
                None => break,
                Some('@') => {
                    self.scanner.next_char();
                }
                Some('}') => {
                    let Some(finished) = open.pop() else {
                        return Err(self.scanner.syntax_error("unmatched '}'"));
                    };
                    self.scanner.next_char();
                    open.last_mut().unwrap_or(&mut root).add(finished);
                    continue;
                }
                Some(_) => {
                    return Err(self.scanner.syntax_error("unexpected character in element"))
                }
            }

            let mut element = Element::new(self.parse_name()?);
            loop {
                self.scanner.skip_whitespace();
                match self.scanner.peek() {
                    None | Some('@' | '{' | '}') => break,
                    Some(_) => {}
                }
                let name = self.parse_name()?;
                self.scanner.skip_whitespace();
                let value = self.parse_value()?;
                element.set(name, value);
            }

            if self.scanner.peek() == Some('{') {
                self.scanner.next_char();
                open.push(element);
            } else {
                open.last_mut().unwrap_or(&mut root).add(element);
            }
        }

        if let Some(unclosed) = open.last() {
            return Err(self.scanner.syntax_error(format!(
                "unexpected end of input, '}}' expected to close @{}",
                unclosed.tag()
            )));
        }
        Ok(root)
    }

    fn parse_value(&mut self) -> Result<String, ParseError> {
        match self.scanner.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.scanner.next_char();
                self.scanner.parse_string(Some(quote), true)
            }
            Some('(') => {
                self.scanner.next_char();
                // opaque until array values get a real schema
                let value = self.scanner.read_until(b')').to_string();
                self.scanner.expect(')')?;
                Ok(value)
            }
            _ => Ok(self.scanner.read_until_whitespace().to_string()),
        }
    }

    fn parse_name(&mut self) -> Result<String, ParseError> {
        match self.scanner.read_name_with(is_name_start, is_name_part) {
            Some(name) => Ok(name.to_string()),
            None => Err(self.scanner.syntax_error("identifier expected")),
        }
    }
}

#[inline]
fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

#[inline]
fn is_name_part(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.')
}
