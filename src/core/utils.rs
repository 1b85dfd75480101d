//! Small shared helpers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Process-wide sequence counter for id generation.
static ID_SEQ: AtomicU64 = AtomicU64::new(0);

/// Generate a unique record id: prefix + millisecond timestamp + sequence.
///
/// The raw timestamp alone is not collision-free — bulk regeneration creates
/// ten records within the same millisecond tick — so a monotonically
/// increasing process-wide counter disambiguates.
pub fn unique_id(prefix: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let seq = ID_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}{millis}-{seq}")
}

/// Escape text for Telegram HTML parse mode.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
