//! Snippet formatting.

use vize_glyph::{format_template, FormatError, FormatOptions};

/// Pretty-printer applied to wrapped snippets.
pub trait SnippetFormatter: Send + Sync {
    /// Format markup, failing on input the printer cannot handle.
    fn format(&self, code: &str) -> Result<String, FormatError>;
}

impl<F> SnippetFormatter for F
where
    F: Fn(&str) -> Result<String, FormatError> + Send + Sync,
{
    #[inline]
    fn format(&self, code: &str) -> Result<String, FormatError> {
        self(code)
    }
}

/// Formatter backed by the glyph template printer.
#[derive(Debug, Clone)]
pub struct GlyphSnippetFormatter {
    options: FormatOptions,
}

impl GlyphSnippetFormatter {
    #[inline]
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    #[inline]
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }
}

impl Default for GlyphSnippetFormatter {
    fn default() -> Self {
        Self::new(FormatOptions::snippet())
    }
}

impl SnippetFormatter for GlyphSnippetFormatter {
    #[inline]
    fn format(&self, code: &str) -> Result<String, FormatError> {
        format_template(code, &self.options)
    }
}
