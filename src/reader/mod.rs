//! Readers
//!
//! Both dialects build the same [`Document`](crate::dom::Document) tree:
//! - `XmlReader`: XML subset with backslash escapes in text and values
//! - `VcmReader`: compact `@tag name value { ... }` notation

pub mod vcm;
pub mod xml;

pub use vcm::VcmReader;
pub use xml::XmlReader;
