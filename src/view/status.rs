use std::time::{Duration, Instant};

/// Default time a status message stays on screen
pub const DEFAULT_STATUS_TTL: Duration = Duration::from_secs(5);

/// The latest message for the message bar
///
/// Expiry only affects display; the text itself is kept until replaced.
#[derive(Debug, Clone, Default)]
pub struct StatusMessage {
    text: String,
    set_at: Option<Instant>,
}

impl StatusMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, text: impl Into<String>, now: Instant) {
        self.text = text.into();
        self.set_at = Some(now);
    }

    pub fn clear(&mut self, now: Instant) {
        self.set(String::new(), now);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The text to draw at `now`, if any
    pub fn visible_text(&self, now: Instant, ttl: Duration) -> Option<&str> {
        let set_at = self.set_at?;
        if self.text.is_empty() || now.saturating_duration_since(set_at) >= ttl {
            return None;
        }
        Some(&self.text)
    }
}
