//! Template extraction from preview source text.
//!
//! Finds the first `template: "<...>"` field in an opaque source blob.
//! The key may be bare or quoted; the value may use `"`, `'` or `` ` ``.
//! The body ends at the first repeat of its delimiter, escaped delimiters
//! inside the body are not recognized.

use memchr::{memchr, memmem};

const TEMPLATE_KEY: &[u8] = b"template";

/// Extract the unquoted body of the first `template` field.
///
/// Returns `None` when the source has no such field.
///
/// # Example
///
/// ```
/// use vize_replica::extract_template;
///
/// let source = r#"{ template: "<div></div>", data() {} }"#;
/// assert_eq!(extract_template(source), Some("<div></div>"));
/// ```
pub fn extract_template(source: &str) -> Option<&str> {
    let bytes = source.as_bytes();
    let finder = memmem::Finder::new(TEMPLATE_KEY);

    let mut search_from = 0;
    while let Some(offset) = finder.find(&bytes[search_from..]) {
        let key_start = search_from + offset;
        if let Some(body) = match_field(source, key_start) {
            return Some(body);
        }
        search_from = key_start + TEMPLATE_KEY.len();
    }

    None
}

/// Try to match `<q?>template<q?>:\s*<q>body<q>` with the key at `key_start`.
#[inline]
fn match_field(source: &str, key_start: usize) -> Option<&str> {
    let bytes = source.as_bytes();
    let len = bytes.len();

    let before = key_start.checked_sub(1).map(|i| bytes[i]);
    let mut pos = key_start + TEMPLATE_KEY.len();

    // A quoted key closes with the same quote
    if let Some(quote) = before.filter(|&b| is_quote(b)) {
        if bytes.get(pos) == Some(&quote) {
            pos += 1;
        }
    }

    if bytes.get(pos) != Some(&b':') {
        return None;
    }
    pos += 1;

    while pos < len && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }

    let delimiter = *bytes.get(pos).filter(|&&b| is_quote(b))?;
    let body_start = pos + 1;
    let body_len = memchr(delimiter, &bytes[body_start..])?;

    Some(&source[body_start..body_start + body_len])
}

#[inline(always)]
fn is_quote(b: u8) -> bool {
    matches!(b, b'"' | b'\'' | b'`')
}
