//! Core parsing primitives
//!
//! Building blocks shared by the XML and VCM readers and the writer:
//! - Scanner: position-tracked char access with memchr delimiter search
//! - Escape: backslash escape decoding/encoding
//! - Entities: the five built-in XML entities
//! - Encoding: UTF-8 only input checks

pub mod encoding;
pub mod entities;
pub mod escape;
pub mod scanner;
