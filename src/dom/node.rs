//! Owned document tree nodes
//!
//! A node is either an element or a run of text. Elements own their
//! children in document order; there are no parent links.

use super::attribute::Attribute;
use crate::core::scanner::{is_name_char, is_name_start_char};
use crate::error::AttributeError;

/// Tag reported by text nodes
pub const TEXT_TAG: &str = "#";

/// A node in the document tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Element node
    Element(Element),
    /// Text content (entities and escapes already decoded)
    Text(String),
}

impl Node {
    #[inline]
    pub fn element(tag: impl Into<String>) -> Self {
        Node::Element(Element::new(tag))
    }

    #[inline]
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }

    /// Element tag, or [`TEXT_TAG`] for text nodes
    pub fn tag(&self) -> &str {
        match self {
            Node::Element(e) => e.tag(),
            Node::Text(_) => TEXT_TAG,
        }
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(t) => Some(t),
            Node::Element(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// An element: tag, attributes in insertion order, owned children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    ///
    /// The tag must be a valid XML name (see [`Element::is_valid_tag`]).
    /// This is only checked in debug builds; use [`Element::try_new`] for
    /// tags that come from outside the parsers.
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        debug_assert!(Self::is_valid_tag(&tag), "invalid element tag {:?}", tag);
        Element {
            tag,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an empty element, or `None` if `tag` is not a valid XML name
    pub fn try_new(tag: impl Into<String>) -> Option<Self> {
        let tag = tag.into();
        Self::is_valid_tag(&tag).then(|| Element::new(tag))
    }

    /// Non-empty XML name; this also rules out the text tag `"#"`
    pub fn is_valid_tag(tag: &str) -> bool {
        let mut chars = tag.chars();
        chars.next().is_some_and(is_name_start_char) && chars.all(is_name_char)
    }

    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Append a child
    pub fn add(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    /// Insert or replace an attribute. A replaced attribute keeps its position.
    pub fn set(&mut self, name: impl Into<String>, text: impl Into<String>) {
        let attribute = Attribute::new(name, text);
        match self.attributes.iter_mut().find(|a| a.name() == attribute.name()) {
            Some(existing) => *existing = attribute,
            None => self.attributes.push(attribute),
        }
    }

    /// Attribute by name, if present
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name() == name)
    }

    /// Required attribute
    pub fn attr(&self, name: &str) -> Result<&Attribute, AttributeError> {
        self.get(name).ok_or_else(|| {
            AttributeError::new(format!(
                "element <{} ...> missing attribute {}",
                self.tag, name
            ))
        })
    }

    /// Attribute or a stand-in holding `default`
    pub fn attr_or(&self, name: &str, default: &str) -> Attribute {
        self.get(name)
            .cloned()
            .unwrap_or_else(|| Attribute::new(name, default))
    }

    #[inline]
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Child at `index`
    #[inline]
    pub fn sub(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    #[inline]
    pub fn sub_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.children.get_mut(index)
    }

    /// Number of children
    #[inline]
    pub fn size(&self) -> usize {
        self.children.len()
    }

    #[inline]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    #[inline]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Child elements, skipping text
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Concatenated text of all descendant text nodes, in document order
    pub fn text_content(&self) -> String {
        let mut result = String::new();
        let mut stack: Vec<&Node> = self.children.iter().rev().collect();
        while let Some(node) = stack.pop() {
            match node {
                Node::Text(t) => result.push_str(t),
                Node::Element(e) => stack.extend(e.children.iter().rev()),
            }
        }
        result
    }
}

// Iterative teardown so very deep trees do not overflow the stack
impl Drop for Element {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let Node::Element(mut element) = node {
                pending.append(&mut element.children);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_creation() {
        let elem = Element::new("panel");
        assert_eq!(elem.tag(), "panel");
        assert_eq!(elem.size(), 0);
        assert!(elem.attributes().is_empty());
    }

    #[test]
    fn test_checked_tag() {
        assert!(Element::try_new("panel").is_some());
        assert!(Element::try_new("ns:item-2").is_some());
        assert!(Element::try_new("").is_none());
        assert!(Element::try_new(TEXT_TAG).is_none());
        assert!(Element::try_new("my root").is_none());
        assert!(Element::try_new("1st").is_none());
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut elem = Element::new("a");
        elem.set("x", "1");
        elem.set("y", "2");
        elem.set("x", "3");
        let names: Vec<_> = elem.attributes().iter().map(|a| (a.name(), a.text())).collect();
        assert_eq!(names, vec![("x", "3"), ("y", "2")]);
    }

    #[test]
    fn test_attr_missing() {
        let elem = Element::new("button");
        let err = elem.attr("onclick").unwrap_err();
        assert_eq!(err.message, "element <button ...> missing attribute onclick");
        assert!(!elem.has("onclick"));
        let fallback = elem.attr_or("onclick", "fallback");
        assert_eq!(fallback.name(), "onclick");
        assert_eq!(fallback.text(), "fallback");
    }

    #[test]
    fn test_children_and_text_tag() {
        let mut elem = Element::new("label");
        elem.add(Node::text("hello "));
        let mut b = Element::new("b");
        b.add(Node::text("world"));
        elem.add(b);

        assert_eq!(elem.size(), 2);
        assert_eq!(elem.sub(0).map(Node::tag), Some(TEXT_TAG));
        assert_eq!(elem.sub(1).map(Node::tag), Some("b"));
        assert!(elem.sub(2).is_none());
        assert_eq!(elem.elements().count(), 1);
        assert_eq!(elem.text_content(), "hello world");
    }

    #[test]
    fn test_sub_mut() {
        let mut elem = Element::new("root");
        elem.add(Element::new("child"));
        if let Some(child) = elem.sub_mut(0).and_then(Node::as_element_mut) {
            child.set("id", "c1");
        }
        let child = elem.sub(0).and_then(Node::as_element).unwrap();
        assert_eq!(child.attr("id").unwrap().text(), "c1");
    }
}
