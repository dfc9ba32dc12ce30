//! Parsing strategies
//!
//! - Single document: [`crate::parse`] / [`crate::parse_vcm`]
//! - Batch: many independent sources parsed in parallel with rayon

pub mod parallel;

pub use parallel::{parse_batch, parse_vcm_batch};
