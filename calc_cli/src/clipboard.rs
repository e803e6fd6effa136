//! Best-effort clipboard access for copying results.

use tracing::{debug, warn};

/// Put `text` on the system clipboard. Failures are logged, never raised.
#[cfg(not(target_arch = "wasm32"))]
pub fn copy(text: &str) -> bool {
    let copied = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.to_string()));
    match copied {
        Ok(()) => {
            debug!(chars = text.chars().count(), "copied to clipboard");
            true
        }
        Err(e) => {
            warn!(error = %e, "clipboard unavailable, copy skipped");
            false
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn copy(_text: &str) -> bool {
    warn!("no clipboard on this target, copy skipped");
    false
}
