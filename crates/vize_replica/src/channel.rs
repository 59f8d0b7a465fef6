//! Notification channel for rendered snippets.

use crate::types::Snippet;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Event emitted when a snippet has been rendered for a preview.
pub const SNIPPET_RENDERED: &str = "storybook/docs/snippet-rendered";

/// A published snippet together with its event name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelEvent {
    pub event: String,
    pub snippet: Snippet,
}

/// Publisher the decorator delivers rendered snippets to.
pub trait SnippetChannel: Send + Sync {
    /// Publish a snippet under `event`. Delivery failures are the channel's concern.
    fn emit(&self, event: &str, snippet: Snippet);
}

impl<T: SnippetChannel + ?Sized> SnippetChannel for Arc<T> {
    #[inline]
    fn emit(&self, event: &str, snippet: Snippet) {
        (**self).emit(event, snippet)
    }
}

/// Channel that records every emitted event.
#[derive(Debug, Default)]
pub struct MemoryChannel {
    events: Mutex<Vec<ChannelEvent>>,
}

impl MemoryChannel {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events emitted so far.
    pub fn events(&self) -> Vec<ChannelEvent> {
        self.events.lock().clone()
    }

    /// Remove and return all recorded events.
    pub fn take(&self) -> Vec<ChannelEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl SnippetChannel for MemoryChannel {
    fn emit(&self, event: &str, snippet: Snippet) {
        self.events.lock().push(ChannelEvent {
            event: event.to_string(),
            snippet,
        });
    }
}

#[cfg(feature = "native")]
pub use broadcast::BroadcastChannel;

#[cfg(feature = "native")]
mod broadcast {
    use super::{ChannelEvent, SnippetChannel};
    use crate::types::Snippet;
    use tokio::sync::broadcast;

    /// Channel fanning events out to any number of subscribers.
    #[derive(Debug, Clone)]
    pub struct BroadcastChannel {
        sender: broadcast::Sender<ChannelEvent>,
    }

    impl BroadcastChannel {
        /// Create a channel buffering up to `capacity` events per subscriber.
        pub fn new(capacity: usize) -> Self {
            let (sender, _) = broadcast::channel(capacity.max(1));
            Self { sender }
        }

        /// Subscribe to events emitted from now on.
        #[inline]
        pub fn subscribe(&self) -> broadcast::Receiver<ChannelEvent> {
            self.sender.subscribe()
        }
    }

    impl Default for BroadcastChannel {
        fn default() -> Self {
            Self::new(64)
        }
    }

    impl SnippetChannel for BroadcastChannel {
        fn emit(&self, event: &str, snippet: Snippet) {
            let preview_id = snippet.preview_id.clone();
            let message = ChannelEvent {
                event: event.to_string(),
                snippet,
            };
            if self.sender.send(message).is_err() {
                tracing::debug!(preview = %preview_id, "no subscribers for {}", event);
            }
        }
    }
}
