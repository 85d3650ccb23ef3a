//! Localization handle resolution
//!
//! Dialog text lines reference localized strings by handle. A [`HandleMap`]
//! is built from one or more localization documents:
//!
//! ```xml
//! <contentList>
//!     <content contentuid="h0a1b2c3d..." version="1">Hello there.</content>
//! </contentList>
//! ```
//!
//! Documents that are not well-formed are scanned with a bounded pattern
//! instead, so one broken file only costs the entries it mangles.

mod discovery;
mod fallback;
mod handle_map;

pub use discovery::{DirectorySource, LocalizationSource, load_handle_map};
pub use fallback::scan_entries;
pub use handle_map::{HandleMap, LocalizedEntry, MergePolicy};

use crate::error::Error;
use crate::formats::lsx::{Element, ParseLimits, parse_lsx};

const CONTENT_TAG: &str = "content";
const TEXT_TAG: &str = "text";

/// Build a handle map from raw localization documents, merged in order.
///
/// Each document is parsed under `limits`. A document over a ceiling is skipped.
pub fn build_handle_map<D: AsRef<[u8]>>(
    documents: &[D],
    policy: MergePolicy,
    limits: &ParseLimits,
) -> HandleMap {
    let mut map = HandleMap::new();
    for (index, document) in documents.iter().enumerate() {
        let added = add_document(&mut map, document.as_ref(), policy, limits);
        tracing::debug!("Localization document {} contributed {} entries", index, added);
    }
    map
}

/// Extract entries from one document into `map`. Returns the number of entries read.
fn add_document(map: &mut HandleMap, data: &[u8], policy: MergePolicy, limits: &ParseLimits) -> usize {
    let entries = match parse_lsx(data, limits) {
        Ok(tree) => content_entries(&tree),
        Err(e @ Error::DocumentTooLarge { .. }) => {
            tracing::warn!("Skipping localization document: {}", e);
            return 0;
        }
        Err(e) => {
            tracing::warn!("Localization document did not parse ({}), scanning for entries", e);
            scan_entries(&String::from_utf8_lossy(data))
        }
    };

    let count = entries.len();
    for (handle, entry) in entries {
        map.insert(handle, entry, policy);
    }
    count
}

/// `(handle, entry)` pairs of every `content` element in a parsed document.
fn content_entries(tree: &Element) -> Vec<(String, LocalizedEntry)> {
    tree.find_all_tagged(CONTENT_TAG)
        .filter_map(|content| {
            let handle = content
                .attr("contentuid")
                .or_else(|| content.attr("handle"))
                .map(str::trim)
                .filter(|h| !h.is_empty())?;
            let text = content
                .children()
                .iter()
                .find(|c| c.is_tag(TEXT_TAG))
                .and_then(Element::text)
                .or_else(|| content.text())
                .unwrap_or_default();
            let version = content.attr("version").and_then(|v| v.trim().parse().ok());

            Some((
                handle.to_string(),
                LocalizedEntry {
                    text: text.to_string(),
                    version,
                },
            ))
        })
        .collect()
}
