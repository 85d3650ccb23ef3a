//! LSX (XML) format module
//!
//! Bidirectional conversion between LSX bytes and the canonical [`Element`] tree.

mod document;
mod nodes;
mod query;
mod reader;
mod writer;

pub use document::{AttrMap, Element, collapse_whitespace};
pub use nodes::{ATTRIBUTE_TAG, CHILDREN_TAG, NODE_TAG, format_lsx_bool, parse_lsx_bool};
pub use query::{Descendants, Matches};
pub use reader::{ParseLimits, parse_lsx, read_lsx};
pub use writer::{LineEnding, WriteOptions, minify_empty_tags, serialize_lsx, write_lsx};
