//! Bounded region detection without a full parse

use regex::Regex;
use std::sync::OnceLock;

/// Default number of leading bytes inspected by [`peek_region`].
pub const DEFAULT_PEEK_BYTES: usize = 16 * 1024;

fn region_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)<region\b[^>]*?\b(?:id|name)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
            .expect("region pattern is valid")
    })
}

/// Find the first `<region id=".."` (or `name`) within the first `max_bytes` bytes.
///
/// Any attribute order and either quote style are accepted. A region tag cut
/// off by the window is not reported.
#[must_use]
pub fn peek_region(data: &[u8], max_bytes: usize) -> Option<String> {
    let window = &data[..data.len().min(max_bytes)];
    let text = String::from_utf8_lossy(window);
    let caps = region_pattern().captures(&text)?;
    let value = caps.get(1).or_else(|| caps.get(2))?.as_str().trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
