//! Parallel batch parsing
//!
//! Uses Rayon to parse independent sources across threads. Results come
//! back in input order, one per source; a failure in one source does not
//! affect the others.

use rayon::prelude::*;
use tracing::debug;

use crate::dom::Document;
use crate::error::ParseError;
use crate::reader::{VcmReader, XmlReader};

/// Parse many `(filename, source)` XML inputs in parallel
pub fn parse_batch(sources: &[(&str, &str)]) -> Vec<Result<Document, ParseError>> {
    debug!(count = sources.len(), "parsing xml batch");
    sources
        .par_iter()
        .map(|(filename, source)| XmlReader::new(filename, source).parse())
        .collect()
}

/// Parse many `(filename, source)` VCM inputs in parallel, each under `root_tag`
pub fn parse_vcm_batch(
    sources: &[(&str, &str)],
    root_tag: &str,
) -> Vec<Result<Document, ParseError>> {
    debug!(count = sources.len(), root_tag, "parsing vcm batch");
    sources
        .par_iter()
        .map(|(filename, source)| VcmReader::new(filename, source).parse(root_tag))
        .collect()
}
