//! # vize_replica
//!
//! Replica - Live source reconstruction for Musea component previews.
//!
//! ## Name Origin
//!
//! A **replica** is a faithful copy of a work, made by the artist's own hand.
//! `vize_replica` redraws the markup of a previewed component so the source
//! shown next to it always matches the props set in the controls panel.
//!
//! ## Pipeline
//!
//! 1. [`extract_template`] finds the `template` field in the preview source
//! 2. [`rewrite`] replaces `v-bind="args"` with attributes for every prop
//!    that differs from its default
//! 3. the result is wrapped in `<template>`, formatted with `vize_glyph` and
//!    emitted on a [`SnippetChannel`] as [`SNIPPET_RENDERED`]
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use vize_replica::{GlyphSnippetFormatter, MemoryChannel, PreviewContext, SourceDecorator};
//!
//! let channel = Arc::new(MemoryChannel::new());
//! let decorator = SourceDecorator::new(GlyphSnippetFormatter::default(), channel.clone());
//!
//! let ctx = PreviewContext::from_json(r#"{
//!     "id": "button--primary",
//!     "source": "{ template: '<my-button v-bind=\"args\">Go</my-button>' }",
//!     "args": { "size": "lg", "disabled": true },
//!     "argTypes": {
//!         "size": { "table": { "category": "props" }, "defaultValue": "md" },
//!         "disabled": { "table": { "category": "props" }, "defaultValue": false }
//!     }
//! }"#).unwrap();
//!
//! decorator.render(&ctx);
//!
//! let events = channel.take();
//! assert_eq!(
//!     events[0].snippet.code,
//!     "<template>\n  <my-button size=\"lg\" disabled>Go</my-button>\n</template>"
//! );
//! ```

pub mod channel;
pub mod decorator;
pub mod extract;
pub mod formatter;
pub mod logging;
pub mod options;
pub mod rewrite;
pub mod types;

// Re-exports for convenience
#[cfg(feature = "native")]
pub use channel::BroadcastChannel;
pub use channel::{ChannelEvent, MemoryChannel, SnippetChannel, SNIPPET_RENDERED};
pub use decorator::SourceDecorator;
pub use extract::extract_template;
pub use formatter::{GlyphSnippetFormatter, SnippetFormatter};
pub use logging::init_logging;
pub use options::ReplicaOptions;
pub use rewrite::{
    assemble_attributes, rendered_attributes, rewrite, serialize_attribute, DEFAULT_PLACEHOLDER,
};
pub use types::{
    structurally_equal, ArgTable, ArgType, ArgumentDescriptor, ArgumentSet, Classification,
    PreviewContext, PreviewParameters, RenderedAttribute, ReplicaError, Snippet,
};

// Re-export formatter options for convenience
pub use vize_glyph::{FormatError, FormatOptions};
