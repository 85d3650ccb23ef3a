//! Pattern scan for localization documents that are not well-formed XML
//!
//! Only `<content ...>text</content>` pairs whose text holds no markup are
//! recovered. Each match is bounded by the next `<`, so a broken document
//! cannot make one entry swallow the rest of the file.

use regex::Regex;
use std::sync::OnceLock;

use super::handle_map::LocalizedEntry;
use crate::formats::lsx::collapse_whitespace;

/// Longest text kept for a single recovered entry, in bytes.
const MAX_RECOVERED_TEXT: usize = 16 * 1024;

fn content_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?is)<content\b([^<>]*)>([^<]*)</content\s*>").expect("content pattern is valid")
    })
}

fn handle_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)\b(?:contentuid|handle)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
            .expect("handle pattern is valid")
    })
}

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)\bversion\s*=\s*(?:"(\d+)"|'(\d+)')"#).expect("version pattern is valid")
    })
}

/// Recover `(handle, entry)` pairs from a document that failed to parse.
pub fn scan_entries(content: &str) -> Vec<(String, LocalizedEntry)> {
    content_pattern()
        .captures_iter(content)
        .filter_map(|caps| {
            let attrs = caps.get(1)?.as_str();
            let handle_caps = handle_pattern().captures(attrs)?;
            let handle = handle_caps.get(1).or_else(|| handle_caps.get(2))?.as_str().trim();
            if handle.is_empty() {
                return None;
            }
            let version = version_pattern()
                .captures(attrs)
                .and_then(|v| v.get(1).or_else(|| v.get(2)))
                .and_then(|v| v.as_str().parse().ok());

            let raw = truncate(caps.get(2)?.as_str(), MAX_RECOVERED_TEXT);
            let text = quick_xml::escape::unescape(raw)
                .map(|t| collapse_whitespace(&t))
                .unwrap_or_else(|_| collapse_whitespace(raw));

            Some((handle.to_string(), LocalizedEntry { text, version }))
        })
        .collect()
}

fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
