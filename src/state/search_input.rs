//! Debounced search input (pure state transitions).
//!
//! The edited text is visible immediately; consumers that trigger
//! retrievals only see the value once the input has been quiet for the
//! debounce window. Time is passed in explicitly so every transition is
//! testable without sleeping.

use std::time::{Duration, Instant};

/// Default inactivity window before an edit settles.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Debounce state machine.
///
/// ```text
/// Idle --edit--> Pending --deadline--> Settled
///                  ^  |                   |
///                  +--+ edit              | edit
///                  +----------------------+
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebouncePhase {
    /// No edit has happened since creation or cancellation.
    Idle,
    /// An edit is waiting out the window. Only `value` will ever settle.
    Pending {
        /// Value captured when the window (re)started.
        value: String,
        /// Instant at which `value` settles.
        deadline: Instant,
    },
    /// The last edit settled.
    Settled {
        /// The settled value.
        value: String,
    },
}

/// Search text with a cursor and a debounce deadline.
///
/// Exactly one deadline is live at a time; each edit replaces it.
#[derive(Debug, Clone)]
pub struct SearchInput {
    text: String,
    /// Cursor position in characters, `0..=text.chars().count()`.
    cursor: usize,
    phase: DebouncePhase,
    window: Duration,
}

impl SearchInput {
    /// Input pre-filled with `initial` (e.g. the URL's `search` value).
    ///
    /// The initial value counts as settled: it does not emit again.
    pub fn new(initial: impl Into<String>, window: Duration) -> Self {
        let text = initial.into();
        let cursor = text.chars().count();
        let phase = if text.is_empty() {
            DebouncePhase::Idle
        } else {
            DebouncePhase::Settled { value: text.clone() }
        };
        Self {
            text,
            cursor,
            phase,
            window,
        }
    }

    /// Text to display, updated synchronously on every edit.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current debounce phase.
    pub fn phase(&self) -> &DebouncePhase {
        &self.phase
    }

    /// Debounce window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Whether an edit is waiting to settle.
    pub fn is_pending(&self) -> bool {
        matches!(self.phase, DebouncePhase::Pending { .. })
    }

    // ===== Edits =====

    /// Insert a character at the cursor. Returns the displayed text.
    pub fn insert_char(&mut self, ch: char, now: Instant) -> &str {
        let at = self.byte_offset(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
        self.changed(now)
    }

    /// Delete the character before the cursor.
    ///
    /// Returns `None` (and leaves the deadline alone) at position 0.
    pub fn backspace(&mut self, now: Instant) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        let at = self.byte_offset(self.cursor - 1);
        self.text.remove(at);
        self.cursor -= 1;
        Some(self.changed(now))
    }

    /// Delete the character under the cursor.
    ///
    /// Returns `None` (and leaves the deadline alone) at the end of the text.
    pub fn delete(&mut self, now: Instant) -> Option<&str> {
        if self.cursor >= self.text.chars().count() {
            return None;
        }
        let at = self.byte_offset(self.cursor);
        self.text.remove(at);
        Some(self.changed(now))
    }

    /// Replace the whole text, cursor at the end.
    pub fn set_text(&mut self, text: impl Into<String>, now: Instant) -> &str {
        self.text = text.into();
        self.cursor = self.text.chars().count();
        self.changed(now)
    }

    /// Clear the text. Returns `None` if it was already empty.
    pub fn clear(&mut self, now: Instant) -> Option<&str> {
        if self.text.is_empty() {
            return None;
        }
        Some(self.set_text(String::new(), now))
    }

    // ===== Cursor movement (not edits) =====

    /// Move the cursor one character left, saturating at 0.
    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor one character right, saturating at the end.
    pub fn cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    /// Move the cursor to the start.
    pub fn home(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to the end.
    pub fn end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    // ===== Timer =====

    /// Settle the pending value once its deadline has passed.
    ///
    /// Returns the settled value exactly once per deadline.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let settled = match &self.phase {
            DebouncePhase::Pending { value, deadline } if now >= *deadline => value.clone(),
            _ => return None,
        };
        self.phase = DebouncePhase::Settled {
            value: settled.clone(),
        };
        Some(settled)
    }

    /// Time left until the pending value settles, or `None` if nothing is
    /// pending. Zero once the deadline has passed.
    pub fn time_until_settle(&self, now: Instant) -> Option<Duration> {
        match &self.phase {
            DebouncePhase::Pending { deadline, .. } => {
                Some(deadline.saturating_duration_since(now))
            }
            _ => None,
        }
    }

    /// Drop a pending deadline without settling it.
    ///
    /// Called on teardown so no late settle reaches a discarded screen.
    pub fn cancel(&mut self) {
        if self.is_pending() {
            self.phase = DebouncePhase::Idle;
        }
    }

    fn changed(&mut self, now: Instant) -> &str {
        self.phase = DebouncePhase::Pending {
            value: self.text.clone(),
            deadline: now + self.window,
        };
        &self.text
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

impl Default for SearchInput {
    fn default() -> Self {
        Self::new(String::new(), DEFAULT_DEBOUNCE)
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "search_input_tests.rs"]
mod tests;
