//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! One thread owns the `App`. Each turn of the loop:
//!
//! 1. Waits up to 50ms for terminal input, then drains everything pending
//! 2. Drains transport events that arrived from the socket task
//! 3. Redraws, but only if one of the above changed something
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
mod theme;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::transport::WebSocketTransport;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Which pane receives the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Text editing in the input line. Esc switches to Log.
    Input,
    /// Arrow keys scroll the log. Typing or Enter switches back to Input.
    Log,
}

/// TUI-specific presentation state (not part of core logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub input_mode: InputMode,
}

impl TuiState {
    pub fn new(placeholder: &str) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(placeholder),
            input_mode: InputMode::Input, // User expects to type immediately
        }
    }

    /// Apply what the core asked of the presentation layer.
    /// Returns true when the loop should stop.
    fn apply(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::None => {}
            Effect::ClearInput => self.input_box.clear(),
            Effect::FocusComposer => self.input_mode = InputMode::Input,
            Effect::Quit => return true,
        }
        false
    }

    /// Route one terminal event. Returns the action it produced, if any.
    fn route(&mut self, event: &TuiEvent) -> Option<Action> {
        match event {
            // Ctrl+C quits from any mode
            TuiEvent::ForceQuit => return Some(Action::Quit),
            TuiEvent::Resize => return None,
            TuiEvent::ScrollUp
            | TuiEvent::ScrollDown
            | TuiEvent::ScrollPageUp
            | TuiEvent::ScrollPageDown => {
                self.message_list.handle_event(event);
                return None;
            }
            TuiEvent::Escape => {
                self.input_mode = match self.input_mode {
                    InputMode::Input => InputMode::Log,
                    InputMode::Log => InputMode::Input,
                };
                return None;
            }
            _ => {}
        }

        if self.input_mode == InputMode::Log {
            match event {
                // Typing returns focus and lands in the buffer
                TuiEvent::InputChar(_) | TuiEvent::Paste(_) => {
                    self.input_mode = InputMode::Input;
                }
                // Enter only returns focus
                TuiEvent::Submit => {
                    self.input_mode = InputMode::Input;
                    return None;
                }
                _ => return None,
            }
        }

        match self.input_box.handle_event(event)? {
            InputEvent::Submit(text) => Some(Action::Submit(text)),
            InputEvent::ContentChanged => None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Terminals without the Kitty protocol ignore the enhancement flags
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Run the terminal UI until the user quits. Must be called inside a tokio runtime.
pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    // Channel for events from socket tasks
    let (tx, rx) = mpsc::channel();
    let transport = Arc::new(WebSocketTransport::new(tokio::runtime::Handle::current()));
    let mut app = App::new(transport, tx);
    let mut tui = TuiState::new(&config.placeholder);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    if let Some(url) = config.url.clone() {
        info!("Connecting to startup URL {}", url);
        let effect = update(&mut app, Action::Submit(url));
        tui.apply(effect);
    }

    let mut needs_redraw = true; // Force first frame
    'event_loop: loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // Process first event + drain ALL pending events before next draw
        let first_event = poll_event_timeout(POLL_INTERVAL);
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            needs_redraw = true;
            if let Some(action) = tui.route(&event) {
                let effect = update(&mut app, action);
                if tui.apply(effect) {
                    break 'event_loop;
                }
            }
        }

        // Socket events, in arrival order
        while let Ok((connection, event)) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received {:?} from connection {}", event, connection);
            let effect = update(&mut app, Action::Transport { connection, event });
            if tui.apply(effect) {
                break 'event_loop;
            }
        }
    }

    app.teardown();
    drop(_terminal_mode_guard);
    ratatui::restore();
    info!("Terminal restored");
    Ok(())
}
