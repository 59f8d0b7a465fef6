//! # vize_glyph
//!
//! Glyph - The beautiful letterforms for Vize.
//! High-performance formatter for Vue template markup.
//!
//! ## Name Origin
//!
//! **Glyph** (/ɡlɪf/) refers to the visual representation of a character -
//! the elegant form that gives meaning to written symbols. In typography and
//! calligraphy, glyphs are carefully crafted to be both beautiful and legible.
//! `vize_glyph` shapes Vue markup into its most readable and consistent form.
//!
//! ## Performance
//!
//! This crate is designed for maximum performance:
//! - Zero-copy parsing, tags and attributes are borrowed from the source
//! - SIMD-accelerated string operations via `memchr`
//! - Efficient buffer management with pre-allocated capacity
//!
//! ## Example
//!
//! ```
//! use vize_glyph::{format_template, FormatOptions};
//!
//! let source = r#"<template><button   disabled>Save</button></template>"#;
//!
//! let result = format_template(source, &FormatOptions::snippet()).unwrap();
//! assert_eq!(result, "<template>\n  <button disabled>Save</button>\n</template>");
//! ```

mod error;
mod options;
mod template;

pub use error::*;
pub use options::*;

/// Format template markup
///
/// Malformed markup (unbalanced or unterminated tags) is reported as a
/// [`FormatError`] instead of being printed half-formatted.
#[inline]
pub fn format_template(source: &str, options: &FormatOptions) -> Result<String, FormatError> {
    template::format_template_content(source, options)
}
