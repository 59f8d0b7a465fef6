//! Decorator options.

use crate::channel::SNIPPET_RENDERED;
use crate::rewrite::DEFAULT_PLACEHOLDER;
use serde::{Deserialize, Serialize};
use vize_glyph::FormatOptions;

/// Options for [`SourceDecorator`](crate::SourceDecorator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicaOptions {
    /// Token replaced by the computed attributes (default: `v-bind="args"`)
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Element wrapping the snippet before formatting (default: `template`).
    /// Empty disables wrapping.
    #[serde(default = "default_wrapper_tag")]
    pub wrapper_tag: String,

    /// Channel event name (default: `storybook/docs/snippet-rendered`)
    #[serde(default = "default_event")]
    pub event: String,

    /// Formatter options (default: whitespace-insensitive snippet layout)
    #[serde(default = "FormatOptions::snippet")]
    pub format: FormatOptions,
}

impl Default for ReplicaOptions {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            wrapper_tag: default_wrapper_tag(),
            event: default_event(),
            format: FormatOptions::snippet(),
        }
    }
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

fn default_wrapper_tag() -> String {
    "template".to_string()
}

fn default_event() -> String {
    SNIPPET_RENDERED.to_string()
}

impl ReplicaOptions {
    /// Wrap code in the configured wrapper element.
    pub fn wrap(&self, code: &str) -> String {
        if self.wrapper_tag.is_empty() {
            return code.to_string();
        }
        format!("<{tag}>{code}</{tag}>", tag = self.wrapper_tag)
    }
}
