//! # TitleBar Component
//!
//! Single status row above the log.
//!
//! ## Responsibilities
//!
//! - Display the program name
//! - Display the session URL, if a connection was ever attempted
//! - Display the session state label (`OFFLINE`, `CONNECTING`, `ONLINE`, ...)
//! - Show `[LOG]` while the log has keyboard focus
//!
//! TitleBar is purely presentational: every field is a prop set by the
//! parent before rendering.
//!
//! ## Formatting
//!
//! 1. **With session**: `"CRTCHAT | ws://host/ws | ONLINE"`
//! 2. **Without session**: `"CRTCHAT | OFFLINE"`
//!
//! `" | [LOG]"` is appended to either form while the log is focused.

use crate::core::session::SessionState;
use crate::tui::component::Component;
use crate::tui::theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

pub const PROGRAM_NAME: &str = "CRTCHAT";

/// Top status bar component.
///
/// # Props
///
/// - `url`: URL of the current session (`None` before the first connect)
/// - `state`: lifecycle state of the current session
/// - `log_focused`: whether arrow keys currently scroll the log
pub struct TitleBar {
    pub url: Option<String>,
    pub state: SessionState,
    pub log_focused: bool,
}

impl TitleBar {
    pub fn new(url: Option<String>, state: SessionState, log_focused: bool) -> Self {
        Self {
            url,
            state,
            log_focused,
        }
    }

    fn text(&self) -> String {
        let mut text = match &self.url {
            Some(url) => format!("{} | {} | {}", PROGRAM_NAME, url, self.state.label()),
            None => format!("{} | {}", PROGRAM_NAME, self.state.label()),
        };
        if self.log_focused {
            text.push_str(" | [LOG]");
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::styled(self.text(), theme::status()), area);
    }
}
