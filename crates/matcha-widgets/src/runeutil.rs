//! Unicode text utilities for TUI rendering.
//!
//! Provides functions for sanitizing strings, calculating display widths
//! of Unicode text, and truncating strings to fit within a given width.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Sanitize a string by removing non-printable characters.
///
/// Keeps printable characters, spaces, and common whitespace (newlines, tabs).
/// Removes all other control characters.
pub fn sanitize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

/// Calculate the display width of a string, accounting for wide characters.
///
/// CJK characters, fullwidth forms, and similar characters count as 2
/// columns. Control characters count as 0 columns.
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Truncate a string to fit within `max_width` display columns.
///
/// If the string fits within `max_width`, it is returned unchanged.
/// If truncated, `tail` (e.g., "...") is appended. The total display width
/// of the result (including the tail) will not exceed `max_width`.
///
/// # Examples
///
/// ```
/// use matcha_widgets::runeutil::truncate;
///
/// assert_eq!(truncate("hello world", 8, "..."), "hello...");
/// assert_eq!(truncate("hi", 10, "..."), "hi");
/// ```
pub fn truncate(s: &str, max_width: usize, tail: &str) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }

    let tail_width = display_width(tail);
    if tail_width >= max_width {
        // The tail itself does not fit; return as much of it as does.
        return take_width(tail, max_width);
    }

    let mut result = take_width(s, max_width - tail_width);
    result.push_str(tail);
    result
}

/// Longest prefix of `s` that fits in `max_width` columns.
fn take_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;
    for c in s.chars() {
        let cw = c.width().unwrap_or(0);
        if width + cw > max_width {
            break;
        }
        result.push(c);
        width += cw;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_removes_control_chars() {
        assert_eq!(sanitize("hello\x00world"), "helloworld");
        assert_eq!(sanitize("abc\x07def"), "abcdef");
    }

    #[test]
    fn sanitize_keeps_newlines_and_tabs() {
        assert_eq!(sanitize("hello\nworld"), "hello\nworld");
        assert_eq!(sanitize("hello\tworld"), "hello\tworld");
    }

    #[test]
    fn sanitize_keeps_printable() {
        let s = "Hello, World! 123 @#$";
        assert_eq!(sanitize(s), s);
    }

    #[test]
    fn display_width_ascii() {
        assert_eq!(display_width("hello"), 5);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn display_width_cjk() {
        // Each CJK character is width 2
        assert_eq!(display_width("\u{4E16}\u{754C}"), 4); // "世界"
    }

    #[test]
    fn display_width_mixed() {
        // "hi世界" = 2 + 4 = 6
        assert_eq!(display_width("hi\u{4E16}\u{754C}"), 6);
    }

    #[test]
    fn truncate_no_truncation_needed() {
        assert_eq!(truncate("hello", 10, "..."), "hello");
    }

    #[test]
    fn truncate_basic() {
        assert_eq!(truncate("hello world", 8, "..."), "hello...");
    }

    #[test]
    fn truncate_exact_fit() {
        assert_eq!(truncate("hello", 5, "..."), "hello");
    }

    #[test]
    fn truncate_with_cjk() {
        // "世界abc" has width 4+3=7. Truncate to 6 with "…" (width 1).
        // Target width = 5. "世界a" = 5. Result: "世界a…"
        let result = truncate("\u{4E16}\u{754C}abc", 6, "\u{2026}");
        assert_eq!(display_width(&result), 6);
    }

    #[test]
    fn truncate_empty_tail() {
        assert_eq!(truncate("hello world", 5, ""), "hello");
    }

    #[test]
    fn truncate_tail_wider_than_max() {
        assert_eq!(truncate("hello", 2, "..."), "..");
    }
}
