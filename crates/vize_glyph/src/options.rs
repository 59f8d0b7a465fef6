//! Format options for vize_glyph.
//!
//! These options are designed to be compatible with Prettier's HTML/Vue printer.

use serde::{Deserialize, Serialize};

/// Formatting options for Vue template markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatOptions {
    /// Maximum line width (default: 100)
    #[serde(default = "default_print_width")]
    pub print_width: u32,

    /// Number of spaces per indentation level (default: 2)
    #[serde(default = "default_tab_width")]
    pub tab_width: u8,

    /// Use tabs instead of spaces (default: false)
    #[serde(default)]
    pub use_tabs: bool,

    /// Put the > of a multi-line HTML element at the end of the last line (default: false)
    #[serde(default)]
    pub bracket_same_line: bool,

    /// End of line style (default: Lf)
    #[serde(default)]
    pub end_of_line: EndOfLine,

    /// Put each HTML attribute on its own line (default: false)
    #[serde(default)]
    pub single_attribute_per_line: bool,

    /// How whitespace in text content is treated (default: Css)
    #[serde(default)]
    pub html_whitespace_sensitivity: WhitespaceSensitivity,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            print_width: default_print_width(),
            tab_width: default_tab_width(),
            use_tabs: false,
            bracket_same_line: false,
            end_of_line: EndOfLine::default(),
            single_attribute_per_line: false,
            html_whitespace_sensitivity: WhitespaceSensitivity::default(),
        }
    }
}

fn default_print_width() -> u32 {
    100
}

fn default_tab_width() -> u8 {
    2
}

/// End of line options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndOfLine {
    /// Line Feed only (\n)
    #[default]
    Lf,
    /// Carriage Return + Line Feed (\r\n)
    Crlf,
    /// Carriage Return only (\r)
    Cr,
    /// Maintain existing line endings
    Auto,
}

/// Whitespace sensitivity of text content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhitespaceSensitivity {
    /// Respect the default CSS `display` property
    #[default]
    Css,
    /// Whitespace is significant everywhere
    Strict,
    /// Whitespace is insignificant, text may be reflowed freely
    Ignore,
}

impl FormatOptions {
    /// Create options with Prettier defaults
    #[inline]
    pub fn prettier_compat() -> Self {
        Self {
            print_width: 80,
            ..Default::default()
        }
    }

    /// Options used for documentation snippets: whitespace-insensitive layout.
    #[inline]
    pub fn snippet() -> Self {
        Self {
            print_width: 80,
            html_whitespace_sensitivity: WhitespaceSensitivity::Ignore,
            ..Default::default()
        }
    }

    /// Get the indent as bytes (more efficient for byte operations)
    #[inline]
    pub fn indent_bytes(&self) -> &'static [u8] {
        if self.use_tabs {
            b"\t"
        } else {
            match self.tab_width {
                1 => b" ",
                2 => b"  ",
                4 => b"    ",
                8 => b"        ",
                _ => b"  ", // Default to 2 spaces
            }
        }
    }

    /// Get the newline as bytes (more efficient for byte operations)
    #[inline]
    pub fn newline_bytes(&self) -> &'static [u8] {
        match self.end_of_line {
            EndOfLine::Lf | EndOfLine::Auto => b"\n",
            EndOfLine::Crlf => b"\r\n",
            EndOfLine::Cr => b"\r",
        }
    }

    /// Whether text content may be collapsed and reflowed
    #[inline]
    pub fn reflows_text(&self) -> bool {
        self.html_whitespace_sensitivity == WhitespaceSensitivity::Ignore
    }
}
