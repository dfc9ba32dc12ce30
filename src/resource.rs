//! ResourceArc wrapper
//!
//! Holds a parsed document on the BEAM side between NIF calls.

use rustler::ResourceArc;
use std::sync::Mutex;

use crate::dom::Document;

/// Parsed document stored behind a ResourceArc
pub struct DocumentResource {
    pub doc: Mutex<Document>,
}

impl DocumentResource {
    pub fn new(doc: Document) -> Self {
        DocumentResource {
            doc: Mutex::new(doc),
        }
    }

    /// Run `f` against the document.
    ///
    /// # Errors
    ///
    /// Returns `"mutex_poisoned"` if the document mutex is poisoned.
    pub fn with_document<F, R>(&self, f: F) -> Result<R, &'static str>
    where
        F: FnOnce(&Document) -> R,
    {
        let guard = self.doc.lock().map_err(|_| "mutex_poisoned")?;
        Ok(f(&guard))
    }
}

#[rustler::resource_impl]
impl rustler::Resource for DocumentResource {}

/// Type alias for document ResourceArc
pub type DocumentRef = ResourceArc<DocumentResource>;
