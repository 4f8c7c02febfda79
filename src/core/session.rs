//! # Session
//!
//! One connection attempt and where it stands.
//!
//! ```text
//! Unset ──connect──▶ Connecting ──Opened──▶ Open ──Closed──▶ Closed
//!                        │                   │
//!                     Errored             Errored (stays Open)
//!                        ▼
//!                      Failed ──Closed──▶ Closed
//! ```
//!
//! Nothing here recovers on its own. A new `connect()` builds a new `Session`.

use crate::transport::{Connection, ConnectionId, TransportEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unset,
    Connecting,
    Open,
    Closed,
    Failed,
}

impl SessionState {
    /// Next state after `event`. Messages never change the state.
    pub fn after(self, event: &TransportEvent) -> Self {
        match (self, event) {
            (_, TransportEvent::Opened) => SessionState::Open,
            (SessionState::Connecting, TransportEvent::Errored(_)) => SessionState::Failed,
            (_, TransportEvent::Closed) => SessionState::Closed,
            (state, _) => state,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SessionState::Unset => "OFFLINE",
            SessionState::Connecting => "CONNECTING",
            SessionState::Open => "ONLINE",
            SessionState::Closed => "CLOSED",
            SessionState::Failed => "FAILED",
        }
    }
}

pub struct Session {
    pub id: ConnectionId,
    pub url: String,
    pub state: SessionState,
    /// Live transport handle. `None` once released.
    pub connection: Option<Box<dyn Connection>>,
}

impl Session {
    pub fn new(id: ConnectionId, url: String, connection: Box<dyn Connection>) -> Self {
        Self {
            id,
            url,
            state: SessionState::Connecting,
            connection: Some(connection),
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open && self.connection.is_some()
    }

    /// Close and drop the handle. Returns `false` if it was already released.
    pub fn release(&mut self) -> bool {
        match self.connection.take() {
            Some(mut connection) => {
                connection.close();
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("url", &self.url)
            .field("state", &self.state)
            .field("connection", &self.connection.is_some())
            .finish()
    }
}
