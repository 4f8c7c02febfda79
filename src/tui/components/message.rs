use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::{Paragraph, Widget, Wrap};

use crate::core::messages::Message;
use crate::tui::component::Component;
use crate::tui::theme;

/// A stateless component that renders one log entry as terminal output.
///
/// # Design
///
/// `MessageLine` is a **transient component**: it's created fresh each frame
/// with a borrowed entry. No borders, no role label, just the text the way a
/// terminal would print it: whitespace preserved, long lines wrapped, empty
/// entries taking one blank row.
///
/// # Height Calculation
///
/// [`calculate_height`](Self::calculate_height) predicts the rendered height
/// with `textwrap`, so the parent `MessageList` can size its scroll canvas
/// without rendering first.
#[derive(Clone, Copy)]
pub struct MessageLine<'a> {
    pub message: &'a Message,
}

impl<'a> MessageLine<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }

    /// Rows this entry occupies at `width` columns. Never less than 1.
    /// Not capped: a single frame can be taller than a terminal canvas.
    pub fn calculate_height(message: &Message, width: u16) -> usize {
        if width == 0 || message.text.is_empty() {
            return 1;
        }

        let options = textwrap::Options::new(width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        textwrap::wrap(&message.text, options).len().max(1)
    }
}

impl<'a> Widget for MessageLine<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        Paragraph::new(self.message.text.as_str())
            .style(theme::sender(self.message.sender))
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

impl<'a> Component for MessageLine<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
