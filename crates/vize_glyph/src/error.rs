//! Error types for vize_glyph formatter.

use thiserror::Error;

/// Errors that can occur during formatting
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Error parsing template markup
    #[error("Failed to parse template: {0}")]
    TemplateParseError(String),

    /// Markup that parses but cannot be laid out (unbalanced elements)
    #[error("Failed to format template: {0}")]
    TemplateFormatError(String),
}
