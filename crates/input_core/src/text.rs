//! UTF-8 helpers for caret handling.

use std::borrow::Cow;

/// Clamp a byte index to `s.len()` and then back onto a char boundary.
///
/// ```
/// use input_core::clamp_to_char_boundary;
///
/// let s = "a€b";
/// assert_eq!(clamp_to_char_boundary(s, 2), 1);
/// assert_eq!(clamp_to_char_boundary(s, 100), 5);
/// ```
#[inline]
pub fn clamp_to_char_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Byte index of the char boundary before `i`, or 0.
pub fn prev_cursor_boundary(s: &str, i: usize) -> usize {
    let i = clamp_to_char_boundary(s, i);
    s[..i].char_indices().last().map(|(idx, _)| idx).unwrap_or(0)
}

/// Byte index of the char boundary after `i`, or `s.len()`.
pub fn next_cursor_boundary(s: &str, i: usize) -> usize {
    let i = clamp_to_char_boundary(s, i);
    s[i..]
        .chars()
        .next()
        .map(|c| i + c.len_utf8())
        .unwrap_or(s.len())
}

/// Drop CR and LF, for single-line controls.
///
/// ```
/// use input_core::filter_single_line;
///
/// assert_eq!(filter_single_line("a\r\nb"), "ab");
/// ```
pub fn filter_single_line(s: &str) -> Cow<'_, str> {
    if !s.contains(['\n', '\r']) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.chars().filter(|c| *c != '\n' && *c != '\r').collect())
}

/// CRLF and lone CR become LF.
///
/// ```
/// use input_core::normalize_newlines;
///
/// assert_eq!(normalize_newlines("a\r\nb\rc"), "a\nb\nc");
/// ```
pub fn normalize_newlines(s: &str) -> Cow<'_, str> {
    if !s.contains('\r') {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.replace("\r\n", "\n").replace('\r', "\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_step_over_multibyte_chars() {
        let s = "a€b";
        assert_eq!(prev_cursor_boundary(s, 4), 1);
        assert_eq!(prev_cursor_boundary(s, 0), 0);
        assert_eq!(next_cursor_boundary(s, 1), 4);
        assert_eq!(next_cursor_boundary(s, 5), 5);
    }

    #[test]
    fn single_line_filter_borrows_when_clean() {
        assert!(matches!(filter_single_line("abc"), Cow::Borrowed(_)));
    }
}
