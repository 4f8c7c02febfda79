//! Cursor position and horizontal scrolling for the InputBox.
//!
//! `CursorState` owns the cursor byte offset and the offset of the first
//! visible character. The text itself is owned by `InputBox` and passed in.

use super::text_edit::{display_width, next_char_boundary};

/// Cursor and scroll state, separated from the text buffer.
pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// Byte offset of the first visible character (0 when the line fits)
    pub scroll: usize,
}

impl CursorState {
    pub fn new() -> Self {
        Self { pos: 0, scroll: 0 }
    }

    /// Reset cursor to start (used when the buffer is cleared).
    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll = 0;
    }

    /// Slide the window so the cursor cell fits inside `width` columns.
    pub fn update_scroll(&mut self, buffer: &str, width: u16) {
        let width = width as usize;
        if width == 0 {
            self.scroll = self.pos;
            return;
        }
        if self.pos < self.scroll {
            self.scroll = self.pos;
        }
        // The cursor needs a cell of its own after the text before it
        while self.scroll < self.pos && display_width(&buffer[self.scroll..self.pos]) >= width {
            self.scroll = next_char_boundary(buffer, self.scroll);
        }
    }

    /// The slice of `buffer` that fits in `width` columns from the scroll offset.
    pub fn visible<'b>(&self, buffer: &'b str, width: u16) -> &'b str {
        let start = self.scroll.min(buffer.len());
        let mut used = 0;
        let mut end = start;
        for c in buffer[start..].chars() {
            let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
            if used + w > width as usize {
                break;
            }
            used += w;
            end += c.len_utf8();
        }
        &buffer[start..end]
    }

    /// Column of the cursor relative to the start of the text area.
    pub fn column(&self, buffer: &str) -> u16 {
        let start = self.scroll.min(self.pos);
        display_width(&buffer[start..self.pos]) as u16
    }
}
