//! General string helpers mirroring `@vue/shared`.

use compact_str::CompactString;

/// Convert a camelCase identifier to its hyphenated (kebab-case) form.
///
/// An uppercase ASCII letter gets a `-` prefix unless it starts the string
/// or directly follows a non-word character, then everything is lowercased.
///
/// ```
/// use vize_carton::hyphenate;
///
/// assert_eq!(hyphenate("isActive"), "is-active");
/// assert_eq!(hyphenate("label"), "label");
/// ```
pub fn hyphenate(s: &str) -> CompactString {
    let mut out = CompactString::with_capacity(s.len() + 4);
    let mut prev: Option<char> = None;

    for c in s.chars() {
        if c.is_ascii_uppercase() && prev.is_some_and(is_word_char) {
            out.push('-');
        }
        out.push(c.to_ascii_lowercase());
        prev = Some(c);
    }

    out
}

/// Convert a hyphenated identifier to camelCase.
///
/// ```
/// use vize_carton::camelize;
///
/// assert_eq!(camelize("is-active"), "isActive");
/// ```
pub fn camelize(s: &str) -> CompactString {
    let mut out = CompactString::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '-' {
            if let Some(next) = chars.next_if(|n| is_word_char(*n)) {
                out.push(next.to_ascii_uppercase());
                continue;
            }
        }
        out.push(c);
    }

    out
}

#[inline(always)]
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
