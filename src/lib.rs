//! vcmxml - XML-subset and VCM document parsing
//!
//! Two dialects, one owned tree:
//! - XML subset: declaration, elements, attributes, comments, text
//!   (entities and backslash escapes decoded)
//! - VCM: `@tag name value { ... }` notation under a caller-supplied root
//!
//! Documents serialize back to XML with [`stringify`]. Attribute values are
//! kept as raw text and converted on access (int, float, bool, vec2/3/4,
//! color).
//!
//! ```
//! let doc = vcmxml::parse("ui.xml", r#"<panel size="400,300"><label/></panel>"#)?;
//! let size = doc.root().attr("size")?.as_vec2()?;
//! assert_eq!((size.x, size.y), (400.0, 300.0));
//! # Ok::<(), vcmxml::Error>(())
//! ```

pub mod core;
pub mod dom;
pub mod error;
pub mod reader;
pub mod strategy;
pub mod writer;

#[cfg(feature = "nif")]
mod nif;
#[cfg(feature = "nif")]
mod resource;
#[cfg(feature = "nif")]
mod term;

pub use dom::{Attribute, Document, Element, Node, Vec2, Vec3, Vec4, TEXT_TAG};
pub use error::{AttributeError, Error, ErrorKind, ParseError, Result};
pub use reader::{VcmReader, XmlReader};
pub use strategy::{parse_batch, parse_vcm_batch};
pub use writer::WriteOptions;

// ============================================================================
// Allocator Configuration
// ============================================================================

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

// ============================================================================
// Parsing
// ============================================================================

/// Parse an XML document. `filename` only labels error positions.
pub fn parse(filename: &str, source: &str) -> Result<Document, ParseError> {
    XmlReader::new(filename, source).parse()
}

/// Parse an XML document from raw bytes. Only UTF-8 is accepted.
pub fn parse_bytes(filename: &str, source: &[u8]) -> Result<Document, ParseError> {
    let text = crate::core::encoding::as_utf8(source)
        .map_err(|message| ParseError::new(ErrorKind::Encoding, filename, 1, 1, message))?;
    parse(filename, text)
}

/// Parse a VCM document; top-level entries become children of `root_tag`
pub fn parse_vcm(filename: &str, source: &str, root_tag: &str) -> Result<Document, ParseError> {
    VcmReader::new(filename, source).parse(root_tag)
}

// ============================================================================
// Serialization
// ============================================================================

/// Serialize to XML text. With `pretty`, children go on their own lines
/// indented by `indent` per level.
pub fn stringify(document: &Document, pretty: bool, indent: &str) -> String {
    let options = WriteOptions::default()
        .with_pretty(pretty)
        .with_indent(indent);
    writer::write_document(document, &options)
}

pub fn stringify_with(document: &Document, options: &WriteOptions) -> String {
    writer::write_document(document, options)
}

/// Serialize one element subtree, without the declaration
pub fn stringify_element(element: &Element, options: &WriteOptions) -> String {
    writer::write_element(element, options)
}
