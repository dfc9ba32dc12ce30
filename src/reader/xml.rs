//! XML subset reader
//!
//! Recursive-descent over the shared [`Scanner`], with nesting kept on an
//! explicit element stack so deep documents do not grow the call stack.
//!
//! Supported: optional `<?xml ...?>` declaration, elements, attributes,
//! comments, text with backslash escapes and the five built-in entities.
//! `<!DOCTYPE` is rejected.

use tracing::{debug, trace};

use crate::core::encoding::{is_supported_label, strip_bom};
use crate::core::entities::decode_text;
use crate::core::escape::decode_escapes;
use crate::core::scanner::Scanner;
use crate::dom::{Document, Element, Node, DEFAULT_ENCODING, DEFAULT_VERSION};
use crate::error::{ErrorKind, ParseError};

/// Result of reading one `<...>` construct
enum Markup {
    /// `<!-- ... -->`, produces no node
    Comment,
    /// `<tag ...>`, children follow
    Open(Element),
    /// `<tag .../>`
    Closed(Element),
}

/// Reader for the XML dialect
pub struct XmlReader<'a> {
    scanner: Scanner<'a>,
}

impl<'a> XmlReader<'a> {
    pub fn new(filename: &'a str, source: &'a str) -> Self {
        XmlReader {
            scanner: Scanner::new(filename, strip_bom(source)),
        }
    }

    /// Parse the whole document
    pub fn parse(mut self) -> Result<Document, ParseError> {
        debug!(
            filename = self.scanner.filename(),
            bytes = self.scanner.source().len(),
            "parsing xml"
        );
        let result = self.parse_document();
        match &result {
            Ok(doc) => debug!(
                filename = self.scanner.filename(),
                root = doc.root().tag(),
                "parsed xml"
            ),
            Err(e) => debug!(error = %e, "xml parse failed"),
        }
        result
    }

    fn parse_document(&mut self) -> Result<Document, ParseError> {
        let (version, encoding) = self.parse_declaration()?;
        let root = self.parse_root()?;
        Ok(Document::new(version, encoding, root))
    }

    /// `<?xml version="..." encoding="..."?>`, optional
    fn parse_declaration(&mut self) -> Result<(String, String), ParseError> {
        self.scanner.skip_whitespace();
        self.scanner.expect('<')?;
        if self.scanner.peek() != Some('?') {
            self.scanner.go_back();
            return Ok((DEFAULT_VERSION.to_string(), DEFAULT_ENCODING.to_string()));
        }
        self.scanner.next_char();

        let start = self.scanner.position();
        let node = self.parse_open_tag()?;
        self.scanner.expect_str("?>")?;
        if node.tag() != "xml" {
            self.scanner.set_position(start);
            return Err(self.scanner.syntax_error("invalid declaration"));
        }

        let version = node.attr_or("version", DEFAULT_VERSION);
        let encoding = node.attr_or("encoding", DEFAULT_ENCODING);
        trace!(version = version.text(), encoding = encoding.text(), "xml declaration");
        if !is_supported_label(encoding.text()) {
            self.scanner.set_position(start);
            return Err(self.scanner.error(
                ErrorKind::Encoding,
                format!("UTF-8 encoding is only supported, found {:?}", encoding.text()),
            ));
        }
        Ok((version.text().to_string(), encoding.text().to_string()))
    }

    /// Skip top-level comments until the root element
    fn parse_root(&mut self) -> Result<Element, ParseError> {
        loop {
            self.scanner.skip_whitespace();
            match self.scanner.peek() {
                Some('<') => {}
                Some(_) => return Err(self.scanner.syntax_error("root element expected")),
                None => {
                    return Err(self
                        .scanner
                        .syntax_error("unexpected end of input, root element expected"))
                }
            }
            if let Some(root) = self.parse_element()? {
                return Ok(root);
            }
        }
    }

    /// Parse one construct starting at `<`: a whole element subtree, or a
    /// comment (`None`)
    fn parse_element(&mut self) -> Result<Option<Element>, ParseError> {
        let mut stack: Vec<Element> = Vec::new();

        loop {
            match self.parse_markup()? {
                Markup::Comment => {}
                Markup::Open(element) => stack.push(element),
                Markup::Closed(element) => match stack.last_mut() {
                    Some(parent) => parent.add(element),
                    None => return Ok(Some(element)),
                },
            }

            // Content of the innermost open element, up to its next child tag
            loop {
                let Some(current) = stack.last_mut() else {
                    return Ok(None);
                };
                self.scanner.skip_whitespace();

                if self.scanner.is_next("</") {
                    self.parse_close_tag(current.tag())?;
                    if let Some(element) = stack.pop() {
                        match stack.last_mut() {
                            Some(parent) => parent.add(element),
                            None => return Ok(Some(element)),
                        }
                    }
                    continue;
                }

                match self.scanner.peek() {
                    Some('<') => break,
                    Some(_) => {
                        let text = self.parse_text()?;
                        current.add(Node::Text(text));
                    }
                    None => {
                        return Err(self.scanner.syntax_error(format!(
                            "unexpected end of input, </{}> expected",
                            current.tag()
                        )))
                    }
                }
            }
        }
    }

    fn parse_markup(&mut self) -> Result<Markup, ParseError> {
        self.scanner.expect('<')?;

        if self.scanner.peek() == Some('!') {
            if self.scanner.is_next("!DOCTYPE ") {
                return Err(self
                    .scanner
                    .error(ErrorKind::UnsupportedFeature, "XML DTD is not supported"));
            }
            self.parse_comment()?;
            return Ok(Markup::Comment);
        }

        let element = self.parse_open_tag()?;
        match self.scanner.next_char() {
            // <element/>
            Some('/') => {
                self.scanner.expect('>')?;
                Ok(Markup::Closed(element))
            }
            // <element>...</element>
            Some('>') => Ok(Markup::Open(element)),
            // <element?>
            Some(_) => {
                self.scanner.go_back();
                Err(self.scanner.syntax_error("invalid syntax"))
            }
            None => Err(self.scanner.syntax_error(format!(
                "unexpected end of input in <{}>",
                element.tag()
            ))),
        }
    }

    /// Tag name and attributes; stops before `/`, `>` or `?`
    fn parse_open_tag(&mut self) -> Result<Element, ParseError> {
        let tag = self.parse_name()?;
        let mut element = Element::new(tag);

        loop {
            self.scanner.skip_whitespace();
            match self.scanner.peek() {
                Some('/' | '>' | '?') => break,
                Some(_) => {}
                None => {
                    return Err(self.scanner.syntax_error(format!(
                        "unexpected end of input in <{}>",
                        element.tag()
                    )))
                }
            }

            let name = self.parse_name()?;
            let mut text = String::new();
            self.scanner.skip_whitespace();
            if self.scanner.peek() == Some('=') {
                self.scanner.next_char();
                self.scanner.skip_whitespace();
                let quote = match self.scanner.peek() {
                    Some(q @ ('"' | '\'')) => q,
                    _ => return Err(self.scanner.syntax_error("string literal expected")),
                };
                self.scanner.skip(1);
                text = self.scanner.parse_string(Some(quote), true)?;
            }
            element.set(name, text);
        }
        Ok(element)
    }

    /// `</name>`; `name` must match the open tag
    fn parse_close_tag(&mut self, open: &str) -> Result<(), ParseError> {
        self.scanner.skip(2);
        let start = self.scanner.position();
        let name = self.parse_name()?;
        if name != open {
            self.scanner.set_position(start);
            return Err(self.scanner.syntax_error(format!(
                "tag mismatch: <{}> closed with </{}>",
                open, name
            )));
        }
        self.scanner.skip_whitespace();
        self.scanner.expect('>')
    }

    fn parse_comment(&mut self) -> Result<(), ParseError> {
        self.scanner.expect_str("!--")?;
        if self.scanner.skip_to("-->") {
            self.scanner.skip(3);
            Ok(())
        } else {
            Err(self.scanner.syntax_error("comment close missing"))
        }
    }

    /// Text run up to the next `<`, escapes then entities decoded
    fn parse_text(&mut self) -> Result<String, ParseError> {
        let start = self.scanner.position();
        let raw = self.scanner.read_until(b'<');
        let unescaped = match decode_escapes(raw) {
            Ok(text) => text,
            Err(e) => {
                self.scanner.set_position(start + e.offset);
                return Err(self.scanner.syntax_error(e.message));
            }
        };
        Ok(decode_text(&unescaped).into_owned())
    }

    fn parse_name(&mut self) -> Result<String, ParseError> {
        match self.scanner.read_name() {
            Some(name) => Ok(name.to_string()),
            None => Err(self.scanner.syntax_error("identifier expected")),
        }
    }
}
