//! DOM Module - owned document tree
//!
//! - `Document` owns exactly one root `Element`
//! - `Element` owns its children (`Node`) in document order
//! - `Attribute` keeps raw text and converts on demand

pub mod attribute;
pub mod document;
pub mod node;
pub mod value;

pub use attribute::Attribute;
pub use document::{Document, DEFAULT_ENCODING, DEFAULT_VERSION};
pub use node::{Element, Node, TEXT_TAG};
pub use value::{Vec2, Vec3, Vec4};
