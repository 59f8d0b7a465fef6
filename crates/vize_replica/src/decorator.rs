//! Source decorator.
//!
//! Turns a mounted preview into a formatted snippet on the channel:
//! extract the template, rewrite it against the current args, wrap,
//! format, emit. Failures are logged and never reach the host.

use crate::channel::SnippetChannel;
use crate::extract::extract_template;
use crate::formatter::{GlyphSnippetFormatter, SnippetFormatter};
use crate::options::ReplicaOptions;
use crate::rewrite::rewrite;
use crate::types::{PreviewContext, ReplicaError, Snippet};

/// Decorator reconstructing preview source from live args.
#[derive(Debug)]
pub struct SourceDecorator<F, C> {
    formatter: F,
    channel: C,
    options: ReplicaOptions,
}

impl<C: SnippetChannel> SourceDecorator<GlyphSnippetFormatter, C> {
    /// Decorator using the glyph formatter configured from `options.format`.
    pub fn with_glyph(channel: C, options: ReplicaOptions) -> Self {
        Self {
            formatter: GlyphSnippetFormatter::new(options.format.clone()),
            channel,
            options,
        }
    }
}

impl<F: SnippetFormatter, C: SnippetChannel> SourceDecorator<F, C> {
    pub fn new(formatter: F, channel: C) -> Self {
        Self {
            formatter,
            channel,
            options: ReplicaOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ReplicaOptions) -> Self {
        self.options = options;
        self
    }

    #[inline]
    pub fn options(&self) -> &ReplicaOptions {
        &self.options
    }

    #[inline]
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Unformatted source for a preview, or `None` when it has no template.
    ///
    /// An explicit `parameters.docs.source.code` is returned as is.
    pub fn reconstruct(&self, ctx: &PreviewContext) -> Option<String> {
        if let Some(code) = ctx.explicit_source() {
            return Some(code.to_string());
        }

        let template = extract_template(&ctx.source)?;
        Some(rewrite(template, &ctx.arguments(), &self.options.placeholder))
    }

    /// Wrap and format reconstructed code.
    pub fn format_snippet(&self, preview_id: &str, code: &str) -> Result<Snippet, ReplicaError> {
        let wrapped = self.options.wrap(code);
        let formatted = self.formatter.format(&wrapped)?;
        Ok(Snippet {
            preview_id: preview_id.to_string(),
            code: formatted,
        })
    }

    /// Build the snippet for a preview without emitting it.
    pub fn snippet(&self, ctx: &PreviewContext) -> Result<Option<Snippet>, ReplicaError> {
        match self.reconstruct(ctx) {
            Some(code) => self.format_snippet(&ctx.id, &code).map(Some),
            None => Ok(None),
        }
    }

    /// Render a preview synchronously and emit the snippet.
    ///
    /// Returns the emitted snippet. Missing templates and formatting
    /// failures yield `None`, the latter logged as a warning.
    pub fn render(&self, ctx: &PreviewContext) -> Option<Snippet> {
        let Some(code) = self.reconstruct(ctx) else {
            tracing::debug!(preview = %ctx.id, "no template found, skipping source");
            return None;
        };
        self.emit_formatted(&ctx.id, &code)
    }

    fn emit_formatted(&self, preview_id: &str, code: &str) -> Option<Snippet> {
        match self.format_snippet(preview_id, code) {
            Ok(snippet) => {
                self.channel.emit(&self.options.event, snippet.clone());
                Some(snippet)
            }
            Err(err) => {
                tracing::warn!(preview = %preview_id, "Failed to render code: {}", err);
                None
            }
        }
    }
}

#[cfg(feature = "native")]
impl<F, C> SourceDecorator<F, C>
where
    F: SnippetFormatter + 'static,
    C: SnippetChannel + 'static,
{
    /// Handle a preview mount.
    ///
    /// The source is reconstructed immediately; formatting and emission run
    /// on the current Tokio runtime after yielding once. The returned handle
    /// may be dropped. Outside a runtime the snippet is formatted inline and
    /// `None` is returned.
    pub fn on_mounted(
        self: &std::sync::Arc<Self>,
        ctx: &PreviewContext,
    ) -> Option<tokio::task::JoinHandle<()>> {
        let Some(code) = self.reconstruct(ctx) else {
            tracing::debug!(preview = %ctx.id, "no template found, skipping source");
            return None;
        };

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::debug!(preview = %ctx.id, "no async runtime, formatting inline");
            self.emit_formatted(&ctx.id, &code);
            return None;
        };

        let decorator = std::sync::Arc::clone(self);
        let preview_id = ctx.id.clone();
        Some(handle.spawn(async move {
            tokio::task::yield_now().await;
            decorator.emit_formatted(&preview_id, &code);
        }))
    }
}
