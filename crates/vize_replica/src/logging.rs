//! Logging setup for hosts embedding the decorator.

use std::sync::Once;

/// Install a stderr `tracing` subscriber once.
///
/// Hosts that already installed a subscriber keep theirs.
pub fn init_logging() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .try_init();
    });
}
