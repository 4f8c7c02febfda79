//! # InputBox Component
//!
//! The single input line at the bottom of the screen.
//!
//! ## Responsibilities
//!
//! - Capture text input (single line; pasted line breaks are dropped)
//! - Handle editing (backspace, delete, word delete, cursor movement)
//! - Handle submission (Enter)
//! - Show the prompt that matches the session: URL entry, composer, or the
//!   disconnected affordance
//!
//! ## State Management
//!
//! The buffer is internal state. The prompt is a prop derived from the
//! application flags each frame. Submitting does not clear the buffer; the
//! parent clears it when the core answers with `Effect::ClearInput`.

mod cursor;
mod text_edit;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme;

use cursor::CursorState;
use text_edit::{
    display_width, next_char_boundary, next_word_boundary, prev_char_boundary,
    prev_word_boundary, single_line,
};

pub const URL_LABEL: &str = "CONNECT TO: ";
pub const COMPOSER_LABEL: &str = "> ";
pub const DISCONNECTED_TEXT: &str = "DISCONNECTED - Press Enter to reconnect";

/// Which of the three faces the input line shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    Url,
    Composer,
    Disconnected,
}

impl Prompt {
    pub fn from_flags(show_url_input: bool, connected: bool) -> Self {
        match (show_url_input, connected) {
            (true, _) => Prompt::Url,
            (false, true) => Prompt::Composer,
            (false, false) => Prompt::Disconnected,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Prompt::Url => URL_LABEL,
            Prompt::Composer => COMPOSER_LABEL,
            Prompt::Disconnected => "",
        }
    }
}

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User pressed Enter; carries the raw buffer
    Submit(String),
    /// Text or cursor changed
    ContentChanged,
}

/// Single-line text input.
///
/// # Props
///
/// - `prompt`: which face to show (from App flags)
/// - `focused`: whether the terminal cursor belongs here
///
/// # State
///
/// - `buffer`: current text
/// - `cursor`: byte position and horizontal scroll (see `CursorState`)
pub struct InputBox {
    pub buffer: String,
    pub prompt: Prompt,
    pub focused: bool,
    placeholder: String,
    cursor: CursorState,
}

impl InputBox {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            buffer: String::new(),
            prompt: Prompt::Url,
            focused: true,
            placeholder: placeholder.into(),
            cursor: CursorState::new(),
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor.reset();
    }

    fn insert(&mut self, text: &str) -> Option<InputEvent> {
        if text.is_empty() {
            return None;
        }
        self.buffer.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
        Some(InputEvent::ContentChanged)
    }

    fn delete_range(&mut self, start: usize, end: usize) -> Option<InputEvent> {
        if start == end {
            return None;
        }
        self.buffer.drain(start..end);
        self.cursor.pos = start;
        Some(InputEvent::ContentChanged)
    }

    fn move_to(&mut self, pos: usize) -> Option<InputEvent> {
        (self.cursor.pos != pos).then(|| {
            self.cursor.pos = pos;
            InputEvent::ContentChanged
        })
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.prompt == Prompt::Disconnected {
            frame.render_widget(Paragraph::new(DISCONNECTED_TEXT).style(theme::base()), area);
            return;
        }

        let label = self.prompt.label();
        let label_width = display_width(label) as u16;
        let text_width = area.width.saturating_sub(label_width);
        self.cursor.update_scroll(&self.buffer, text_width);

        let body = if self.buffer.is_empty() && self.prompt == Prompt::Url {
            Span::styled(self.placeholder.as_str(), theme::placeholder())
        } else {
            Span::styled(self.cursor.visible(&self.buffer, text_width), theme::base())
        };
        let line = Line::from(vec![Span::styled(label, theme::base()), body]);
        frame.render_widget(Paragraph::new(line).style(theme::base()), area);

        if self.focused && area.width > 0 {
            let col = label_width
                .saturating_add(self.cursor.column(&self.buffer))
                .min(area.width - 1);
            frame.set_cursor_position((area.x + col, area.y));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        // The disconnected line is not editable; Enter still goes through
        if self.prompt == Prompt::Disconnected && *event != TuiEvent::Submit {
            return None;
        }

        let pos = self.cursor.pos;
        match event {
            TuiEvent::InputChar(c) => self.insert(c.encode_utf8(&mut [0; 4])),
            TuiEvent::Paste(text) => self.insert(&single_line(text)),
            TuiEvent::Backspace => {
                let prev = prev_char_boundary(&self.buffer, pos);
                self.delete_range(prev, pos)
            }
            TuiEvent::Delete => {
                let next = next_char_boundary(&self.buffer, pos);
                self.buffer.drain(pos..next).next()?;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::DeleteWordBack => {
                let start = prev_word_boundary(&self.buffer, pos);
                self.delete_range(start, pos)
            }
            TuiEvent::ClearLine => {
                if self.buffer.is_empty() {
                    return None;
                }
                self.clear();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => self.move_to(prev_char_boundary(&self.buffer, pos)),
            TuiEvent::CursorRight => self.move_to(next_char_boundary(&self.buffer, pos)),
            TuiEvent::WordLeft => self.move_to(prev_word_boundary(&self.buffer, pos)),
            TuiEvent::WordRight => self.move_to(next_word_boundary(&self.buffer, pos)),
            TuiEvent::CursorHome => self.move_to(0),
            TuiEvent::CursorEnd => self.move_to(self.buffer.len()),
            TuiEvent::Submit => Some(InputEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn typed(text: &str) -> InputBox {
        let mut input = InputBox::new("ws://localhost:8001/ws");
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
        input
    }

    fn draw(input: &mut InputBox, width: u16) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(width, 1)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                input.render(f, area);
            })
            .unwrap();
        terminal
    }

    fn line_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn prompt_follows_flags() {
        assert_eq!(Prompt::from_flags(true, false), Prompt::Url);
        assert_eq!(Prompt::from_flags(false, true), Prompt::Composer);
        assert_eq!(Prompt::from_flags(false, false), Prompt::Disconnected);
    }

    #[test]
    fn typing_and_backspace() {
        let mut input = typed("ab");
        assert_eq!(input.buffer, "ab");

        let res = input.handle_event(&TuiEvent::Backspace);
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn submit_keeps_buffer_until_cleared() {
        let mut input = typed("hello");

        let res = input.handle_event(&TuiEvent::Submit);
        assert_eq!(res, Some(InputEvent::Submit("hello".to_string())));
        assert_eq!(input.buffer, "hello");

        input.clear();
        assert!(input.buffer.is_empty());
        assert_eq!(input.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn submit_of_empty_buffer_is_still_reported() {
        let mut input = typed("");
        assert_eq!(
            input.handle_event(&TuiEvent::Submit),
            Some(InputEvent::Submit(String::new()))
        );
    }

    #[test]
    fn paste_drops_line_breaks() {
        let mut input = typed("");
        input.handle_event(&TuiEvent::Paste("ws://host\n:9000/ws\r\n".into()));
        assert_eq!(input.buffer, "ws://host:9000/ws");
    }

    #[test]
    fn editing_in_the_middle() {
        let mut input = typed("helo");
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::InputChar('l'));
        assert_eq!(input.buffer, "hello");

        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "ello");

        input.handle_event(&TuiEvent::CursorEnd);
        assert_eq!(input.handle_event(&TuiEvent::Delete), None);
        assert_eq!(input.handle_event(&TuiEvent::CursorRight), None);
    }

    #[test]
    fn word_editing() {
        let mut input = typed("say hello");
        input.handle_event(&TuiEvent::DeleteWordBack);
        assert_eq!(input.buffer, "say ");

        input.handle_event(&TuiEvent::WordLeft);
        input.handle_event(&TuiEvent::InputChar('!'));
        assert_eq!(input.buffer, "!say ");

        input.handle_event(&TuiEvent::ClearLine);
        assert!(input.buffer.is_empty());
    }

    #[test]
    fn disconnected_ignores_edits_but_passes_enter() {
        let mut input = typed("hi");
        input.prompt = Prompt::Disconnected;

        assert_eq!(input.handle_event(&TuiEvent::InputChar('x')), None);
        assert_eq!(input.buffer, "hi");
        assert_eq!(
            input.handle_event(&TuiEvent::Submit),
            Some(InputEvent::Submit("hi".to_string()))
        );
    }

    #[test]
    fn renders_url_prompt_with_placeholder() {
        let mut input = typed("");
        let terminal = draw(&mut input, 40);
        let text = line_text(&terminal);
        assert!(text.starts_with("CONNECT TO: ws://localhost:8001/ws"));
        assert_eq!(terminal.backend().buffer()[(12, 0)].fg, theme::PHOSPHOR_FAINT);
    }

    #[test]
    fn renders_composer_prompt() {
        let mut input = typed("hi");
        input.prompt = Prompt::Composer;
        let mut terminal = draw(&mut input, 20);
        assert!(line_text(&terminal).starts_with("> hi"));
        terminal.backend_mut().assert_cursor_position((4, 0));
    }

    #[test]
    fn renders_disconnected_affordance() {
        let mut input = typed("");
        input.prompt = Prompt::Disconnected;
        let terminal = draw(&mut input, 50);
        assert!(line_text(&terminal).starts_with(DISCONNECTED_TEXT));
    }

    #[test]
    fn long_input_scrolls_horizontally() {
        let mut input = typed("abcdefghijklmnop");
        input.prompt = Prompt::Composer;
        let terminal = draw(&mut input, 8);
        // Two columns of label leave six; the cursor takes the last one
        assert_eq!(line_text(&terminal), "> lmnop ");
    }
}
