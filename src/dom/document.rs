//! Document: declaration metadata plus the owned root element

use super::node::Element;

pub const DEFAULT_VERSION: &str = "1.0";
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// A parsed document. Sole owner of the whole tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    version: String,
    encoding: String,
    root: Element,
}

impl Document {
    pub fn new(version: impl Into<String>, encoding: impl Into<String>, root: Element) -> Self {
        Document {
            version: version.into(),
            encoding: encoding.into(),
            root,
        }
    }

    /// Document with default version/encoding
    pub fn with_root(root: Element) -> Self {
        Document::new(DEFAULT_VERSION, DEFAULT_ENCODING, root)
    }

    #[inline]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[inline]
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    #[inline]
    pub fn root(&self) -> &Element {
        &self.root
    }

    #[inline]
    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Take the root, releasing the declaration metadata
    pub fn into_root(self) -> Element {
        self.root
    }

    /// Total number of nodes (elements and text) in the tree
    pub fn node_count(&self) -> usize {
        let mut count = 1;
        let mut stack = vec![&self.root];
        while let Some(element) = stack.pop() {
            count += element.size();
            stack.extend(element.elements());
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Node;

    #[test]
    fn test_defaults() {
        let doc = Document::with_root(Element::new("root"));
        assert_eq!(doc.version(), "1.0");
        assert_eq!(doc.encoding(), "UTF-8");
        assert_eq!(doc.root().tag(), "root");
    }

    #[test]
    fn test_node_count() {
        let mut root = Element::new("root");
        let mut a = Element::new("a");
        a.add(Node::text("x"));
        root.add(a);
        root.add(Element::new("b"));
        let doc = Document::with_root(root);
        assert_eq!(doc.node_count(), 4);
    }

    #[test]
    fn test_into_root() {
        let mut doc = Document::new("1.1", "utf-8", Element::new("root"));
        doc.root_mut().set("id", "r");
        let root = doc.into_root();
        assert_eq!(root.attr("id").unwrap().text(), "r");
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Document>();
        assert_send_sync::<Node>();
    }
}
