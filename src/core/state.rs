//! # Application State
//!
//! Everything the screen shows, in one struct. No TUI types here;
//! presentation state (scroll offsets, cursor, focus) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── log: MessageLog               // what's on screen, oldest first
//! ├── session: Option<Session>      // the one connection, if any
//! ├── connected: bool               // an Opened arrived and no Closed since
//! ├── show_url_input: bool          // prompt still asks for a URL
//! ├── transport: Arc<dyn Transport> // opens connections
//! ├── events: EventSink             // handed to every connection we open
//! └── next_connection_id: u64
//! ```
//!
//! State changes go through the controller methods (controller.rs), which
//! `update()` in action.rs dispatches to.

use std::sync::Arc;

use crate::core::messages::MessageLog;
use crate::core::session::{Session, SessionState};
use crate::transport::{ConnectionId, EventSink, Transport};

/// Shown once, before any connection attempt.
pub const BOOT_BANNER: [&str; 8] = [
    "SPATIAL COMPUTER BY DISTRACTED/DEFIANT TOUGH NEWTS",
    "DEBUG ROM V0.3   28 JUN 2018",
    "512KB AVAILABLE RAM",
    "",
    "ENGINE: NEXTv16.0.6",
    "128040960 BYTES",
    "OFFSETS: F33 K279 D311",
    "",
];

pub struct App {
    pub log: MessageLog,
    pub session: Option<Session>,
    pub connected: bool,
    pub show_url_input: bool,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) events: EventSink,
    pub(crate) next_connection_id: ConnectionId,
}

impl App {
    pub fn new(transport: Arc<dyn Transport>, events: EventSink) -> Self {
        let mut log = MessageLog::new();
        for line in BOOT_BANNER {
            log.system(line);
        }

        Self {
            log,
            session: None,
            connected: false,
            show_url_input: true,
            transport,
            events,
            next_connection_id: 1,
        }
    }

    pub fn session_state(&self) -> SessionState {
        self.session
            .as_ref()
            .map(|s| s.state)
            .unwrap_or_default()
    }

    pub fn session_url(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.url.as_str())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.teardown();
    }
}
