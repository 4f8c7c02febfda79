//! Byte-offset helpers for editing a single UTF-8 line.
//!
//! Offsets passed in must already sit on character boundaries; every
//! function returns a character boundary.

use unicode_width::UnicodeWidthStr;

/// Columns `text` occupies on screen.
pub(super) fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Byte offset of the character before `pos`, or 0.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the character after `pos`, or `text.len()`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Start of the word before `pos`, readline `backward-word` style:
/// skip separators, then the word itself.
pub(super) fn prev_word_boundary(text: &str, pos: usize) -> usize {
    let mut boundary = pos;
    let mut in_word = false;
    for (i, c) in text[..pos].char_indices().rev() {
        if is_word_char(c) {
            in_word = true;
        } else if in_word {
            break;
        }
        boundary = i;
    }
    boundary
}

/// End of the word after `pos`, readline `forward-word` style.
pub(super) fn next_word_boundary(text: &str, pos: usize) -> usize {
    let mut in_word = false;
    for (i, c) in text[pos..].char_indices() {
        if is_word_char(c) {
            in_word = true;
        } else if in_word {
            return pos + i;
        }
    }
    text.len()
}

/// Drop line breaks from pasted text; the field holds one line.
pub(super) fn single_line(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '\n' | '\r')).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prev_char_boundary_ascii() {
        assert_eq!(prev_char_boundary("hello", 3), 2);
        assert_eq!(prev_char_boundary("hello", 0), 0);
    }

    #[test]
    fn prev_char_boundary_multibyte() {
        // "é" is 2 bytes
        let text = "aé";
        assert_eq!(prev_char_boundary(text, text.len()), 1);
    }

    #[test]
    fn next_char_boundary_multibyte() {
        let text = "é!";
        assert_eq!(next_char_boundary(text, 0), 2);
        assert_eq!(next_char_boundary(text, text.len()), text.len());
    }

    #[test]
    fn prev_word_skips_separators_then_word() {
        let text = "ws://host:8001/ws";
        assert_eq!(prev_word_boundary(text, text.len()), 15);
        assert_eq!(prev_word_boundary(text, 15), 10);
        assert_eq!(prev_word_boundary("hello  ", 7), 0);
        assert_eq!(prev_word_boundary("abc", 0), 0);
    }

    #[test]
    fn next_word_skips_separators_then_word() {
        let text = "say hello world";
        assert_eq!(next_word_boundary(text, 0), 3);
        assert_eq!(next_word_boundary(text, 3), 9);
        assert_eq!(next_word_boundary(text, 9), text.len());
    }

    #[test]
    fn display_width_counts_wide_chars() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("日本"), 4);
    }

    #[test]
    fn single_line_strips_breaks() {
        assert_eq!(single_line("ws://x\r\n/path\n"), "ws://x/path");
    }
}
