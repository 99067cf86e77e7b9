//! On-device event log.
//!
//! Keeps the last few placement moves, phase transitions and power switches in a
//! fixed ring buffer so the simulator debug page can show them without a console.
//! Every entry is also emitted through the `log` facade by the code that records it.
//!
//! # Usage
//!
//! ```
//! use watchface_common::debug_log::DebugLog;
//!
//! let mut log = DebugLog::new();
//! log.push("face started");
//! log.push_fmt(format_args!("bat -> q{}", 3));
//!
//! assert_eq!(log.iter().last(), Some("bat -> q3"));
//! ```

use core::fmt::{self, Write};

use heapless::{Deque, String};

// =============================================================================
// Debug Log Configuration
// =============================================================================

/// Maximum number of log lines to keep in the ring buffer.
pub const LOG_BUFFER_SIZE: usize = 8;

/// Maximum characters per log line. Sized to the debug page width.
pub const LOG_LINE_LENGTH: usize = 24;

// =============================================================================
// Debug Log Ring Buffer
// =============================================================================

/// Ring buffer for event lines. Old lines are dropped when the buffer is full.
#[derive(Debug)]
pub struct DebugLog {
    buffer: Deque<String<LOG_LINE_LENGTH>, LOG_BUFFER_SIZE>,
}

impl DebugLog {
    /// Create a new empty debug log.
    pub const fn new() -> Self { Self { buffer: Deque::new() } }

    /// Push a line, truncated to [`LOG_LINE_LENGTH`].
    pub fn push(
        &mut self,
        msg: &str,
    ) {
        self.push_fmt(format_args!("{msg}"));
    }

    /// Push a formatted line. Output past the line length is dropped.
    pub fn push_fmt(
        &mut self,
        args: fmt::Arguments<'_>,
    ) {
        if self.buffer.is_full() {
            self.buffer.pop_front();
        }

        let mut line = Truncating(String::new());
        line.write_fmt(args).ok();

        self.buffer.push_back(line.0).ok();
    }

    /// Iterate over log lines (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &str> { self.buffer.iter().map(heapless::string::StringInner::as_str) }

    /// Get number of log entries.
    #[inline]
    pub const fn len(&self) -> usize { self.buffer.len() }

    /// Check if log is empty.
    #[inline]
    pub fn is_empty(&self) -> bool { self.buffer.is_empty() }
}

impl Default for DebugLog {
    fn default() -> Self { Self::new() }
}

/// Writer that keeps whatever fits and silently drops the rest.
struct Truncating(String<LOG_LINE_LENGTH>);

impl Write for Truncating {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_log_push() {
        let mut log = DebugLog::new();
        assert!(log.is_empty(), "new log should be empty");

        log.push("Test message");
        assert_eq!(log.len(), 1);

        log.push("Another message");
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_debug_log_ring_buffer() {
        let mut log = DebugLog::new();

        for i in 0..LOG_BUFFER_SIZE {
            log.push_fmt(format_args!("{i}"));
        }
        assert_eq!(log.len(), LOG_BUFFER_SIZE);

        // Push one more - should drop oldest
        log.push("New");
        assert_eq!(log.len(), LOG_BUFFER_SIZE);

        let first = log.iter().next().unwrap();
        assert_eq!(first, "1", "entry 0 should have been dropped");
        assert_eq!(log.iter().last(), Some("New"));
    }

    #[test]
    fn test_debug_log_truncation() {
        let mut log = DebugLog::new();
        log.push("This is a very long message that exceeds the maximum line length limit");

        let stored = log.iter().next().unwrap();
        assert_eq!(stored.len(), LOG_LINE_LENGTH, "line should be cut at the limit");
        assert!(stored.starts_with("This is a very"), "truncation keeps the head");
    }

    #[test]
    fn test_push_fmt_formats_arguments() {
        let mut log = DebugLog::new();
        log.push_fmt(format_args!("bat {}% {}", 15, "low"));
        assert_eq!(log.iter().next(), Some("bat 15% low"));
    }
}
