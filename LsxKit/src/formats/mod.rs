//! File format handlers for Larian Studios formats
//!
//! Only the XML dialect (LSX) is handled here; localization documents are XML
//! too and go through the same codec.

pub mod lsx;

// Re-export main document types
pub use lsx::{Element, ParseLimits, WriteOptions, parse_lsx, serialize_lsx};
