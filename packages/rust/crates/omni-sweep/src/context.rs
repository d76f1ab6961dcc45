//! Context windows and line/column tracking.
//!
//! Windows are measured in characters and clamped at the document edges, so
//! they never split a UTF-8 sequence and never read before offset 0.

use memchr::memchr_iter;

use crate::types::Location;

/// Up to `len` characters immediately preceding byte offset `start`.
#[must_use]
pub fn context_before(content: &str, start: usize, len: usize) -> &str {
    if len == 0 {
        return "";
    }
    let head = &content[..start];
    let from = head.char_indices().rev().nth(len - 1).map_or(0, |(i, _)| i);
    &head[from..]
}

/// Up to `len` characters immediately following byte offset `end`.
#[must_use]
pub fn context_after(content: &str, end: usize, len: usize) -> &str {
    let tail = &content[end..];
    let to = tail.char_indices().nth(len).map_or(tail.len(), |(i, _)| i);
    &tail[..to]
}

/// Converts increasing byte offsets into line/column locations.
///
/// Offsets passed to [`LineTracker::locate`] must never decrease, and the
/// text passed on each call must extend (or equal) the text of the previous
/// call. Appending to an output buffer between calls is fine.
#[derive(Debug, Clone, Copy)]
pub struct LineTracker {
    offset: usize,
    line: usize,
    line_start: usize,
}

impl Default for LineTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl LineTracker {
    /// Start tracking at offset 0, line 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            offset: 0,
            line: 1,
            line_start: 0,
        }
    }

    /// Location of `offset` in `text`.
    pub fn locate(&mut self, text: &str, offset: usize) -> Location {
        debug_assert!(offset >= self.offset, "offsets must not go backwards");
        let scanned = &text.as_bytes()[self.offset..offset];
        for pos in memchr_iter(b'\n', scanned) {
            self.line += 1;
            self.line_start = self.offset + pos + 1;
        }
        self.offset = offset;
        Location {
            offset,
            line: self.line,
            column: text[self.line_start..offset].chars().count() + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_before_clamped_at_start() {
        assert_eq!(context_before("abc", 0, 10), "");
        assert_eq!(context_before("abcdef", 3, 10), "abc");
        assert_eq!(context_before("abcdef", 3, 2), "bc");
    }

    #[test]
    fn test_after_clamped_at_end() {
        assert_eq!(context_after("abcdef", 6, 4), "");
        assert_eq!(context_after("abcdef", 3, 10), "def");
        assert_eq!(context_after("abcdef", 3, 2), "de");
    }

    #[test]
    fn test_zero_length_windows() {
        assert_eq!(context_before("abcdef", 3, 0), "");
        assert_eq!(context_after("abcdef", 3, 0), "");
    }

    #[test]
    fn test_windows_count_characters_not_bytes() {
        let text = "ÄÖÜ-x-éè";
        let x = text.find('x').unwrap_or_default();
        assert_eq!(context_before(text, x, 2), "Ü-");
        assert_eq!(context_after(text, x + 1, 2), "-é");
    }

    #[test]
    fn test_line_tracker_columns() {
        let text = "ab\ncdé\nfg";
        let mut tracker = LineTracker::new();
        assert_eq!(tracker.locate(text, 1).line, 1);
        let loc = tracker.locate(text, text.find('g').unwrap_or_default());
        assert_eq!((loc.line, loc.column), (3, 2));
    }

    #[test]
    fn test_line_tracker_on_growing_buffer() {
        let mut buffer = String::from("one\n");
        let mut tracker = LineTracker::new();
        let first = tracker.locate(&buffer, buffer.len());
        buffer.push_str("two\nthree");
        let second = tracker.locate(&buffer, buffer.len());
        assert_eq!((first.line, first.column), (2, 1));
        assert_eq!((second.line, second.column), (3, 6));
    }
}
