//! XML serialization of the document tree
//!
//! Uses an explicit stack instead of recursion so deep trees serialize
//! without growing the call stack. Output is deterministic: attributes are
//! written in insertion order.

use std::borrow::Cow;

use crate::core::entities::encode_text;
use crate::core::escape::{escape_backslashes, write_quoted};
use crate::dom::{Document, Element, Node};

/// Serializer settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Put every child on its own indented line
    pub pretty: bool,
    /// Indent unit repeated once per nesting level
    pub indent: String,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            pretty: true,
            indent: "    ".to_string(),
        }
    }
}

impl WriteOptions {
    /// No newlines or indentation at all
    pub fn compact() -> Self {
        WriteOptions {
            pretty: false,
            indent: String::new(),
        }
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// Serialize a document, declaration first
pub fn write_document(document: &Document, options: &WriteOptions) -> String {
    let mut buf = String::with_capacity(1024);
    buf.push_str("<?xml version=\"");
    buf.push_str(document.version());
    buf.push_str("\" encoding=\"UTF-8\" ?>");
    newline(&mut buf, options, 0);
    write_tree(document.root(), options, &mut buf);
    buf
}

/// Serialize a single element subtree, without declaration
pub fn write_element(element: &Element, options: &WriteOptions) -> String {
    let mut buf = String::with_capacity(256);
    write_tree(element, options, &mut buf);
    buf
}

/// Empty comment written between adjacent text siblings so they read back
/// as separate nodes
const TEXT_SEPARATOR: &str = "<!---->";

enum StackEntry<'a> {
    Enter(&'a Node, usize),
    Newline(usize),
    Separator,
    Close(&'a Element),
}

fn write_tree(root: &Element, options: &WriteOptions, buf: &mut String) {
    let mut stack: Vec<StackEntry<'_>> = Vec::with_capacity(64);
    open_element(root, 0, buf, &mut stack);

    while let Some(entry) = stack.pop() {
        match entry {
            StackEntry::Enter(Node::Text(text), _) => escape_text_to_buf(text, buf),
            StackEntry::Enter(Node::Element(element), depth) => {
                open_element(element, depth, buf, &mut stack)
            }
            StackEntry::Newline(depth) => newline(buf, options, depth),
            StackEntry::Separator => buf.push_str(TEXT_SEPARATOR),
            StackEntry::Close(element) => {
                buf.push_str("</");
                buf.push_str(element.tag());
                buf.push('>');
            }
        }
    }
}

/// Write the start of `element`; children and the closing tag are pushed
/// onto `stack` unless the element can be finished inline
fn open_element<'a>(
    element: &'a Element,
    depth: usize,
    buf: &mut String,
    stack: &mut Vec<StackEntry<'a>>,
) {
    buf.push('<');
    buf.push_str(element.tag());
    for attribute in element.attributes() {
        buf.push(' ');
        buf.push_str(attribute.name());
        if !attribute.text().is_empty() {
            buf.push('=');
            write_quoted(attribute.text(), buf);
        }
    }

    match element.children() {
        [] => buf.push_str("/>"),
        [Node::Text(text)] => {
            buf.push('>');
            escape_text_to_buf(text, buf);
            buf.push_str("</");
            buf.push_str(element.tag());
            buf.push('>');
        }
        children => {
            buf.push('>');
            // Closing tag first (processed after children)
            stack.push(StackEntry::Close(element));
            stack.push(StackEntry::Newline(depth));
            for (i, child) in children.iter().enumerate().rev() {
                let next_is_text = children.get(i + 1).is_some_and(Node::is_text);
                if child.is_text() && next_is_text {
                    stack.push(StackEntry::Separator);
                }
                stack.push(StackEntry::Enter(child, depth + 1));
                stack.push(StackEntry::Newline(depth + 1));
            }
        }
    }
}

#[inline]
fn newline(buf: &mut String, options: &WriteOptions, depth: usize) {
    if !options.pretty {
        return;
    }
    buf.push('\n');
    for _ in 0..depth {
        buf.push_str(&options.indent);
    }
}

/// Text content: backslashes doubled, then the five entities
#[inline]
fn escape_text_to_buf(text: &str, buf: &mut String) {
    let unescaped: Cow<'_, str> = escape_backslashes(text);
    buf.push_str(&encode_text(&unescaped));
}
