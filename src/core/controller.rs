//! # Session Controller
//!
//! The only code that opens, uses or closes a connection. Every user-visible
//! outcome, including every failure, becomes a system entry in the log.

use log::{debug, info, warn};

use crate::core::action::Effect;
use crate::core::messages::{Message, Sender};
use crate::core::session::{Session, SessionState};
use crate::core::state::App;
use crate::transport::{ConnectionId, TransportEvent};

pub const ERR_EMPTY_URL: &str = "ERROR: Please enter a WebSocket URL";
pub const ERR_INVALID_URL: &str = "ERROR: Invalid WebSocket URL";
pub const ERR_CONNECTION_FAILED: &str = "ERROR: CONNECTION FAILED";
pub const READY_BANNER: &str = "MONITOR READY.";
pub const CONNECTION_ESTABLISHED: &str = "CONNECTION ESTABLISHED";
pub const CONNECTION_CLOSED: &str = "CONNECTION CLOSED";
/// Blank line that ends each lifecycle block.
pub const PROMPT_MARKER: &str = "";
/// Prefix for the local echo of a sent line.
pub const LOCAL_ECHO_PREFIX: &str = "> ";

impl App {
    /// Start a connection to `url`.
    pub fn connect(&mut self, url: &str) -> Effect {
        if url.is_empty() {
            self.log.system(ERR_EMPTY_URL);
            return Effect::None;
        }
        // Surrounding whitespace is stripped, as a browser WebSocket does.
        // A blank URL therefore reaches the transport empty and is invalid.
        let url = url.trim();

        // Never hold two handles at once
        if let Some(mut previous) = self.session.take()
            && previous.release()
        {
            info!("Released connection {} before reconnecting", previous.id);
        }

        let id = self.next_connection_id;
        self.next_connection_id += 1;

        match self.transport.open(url, id, self.events.clone()) {
            Ok(connection) => {
                info!("Connection {} connecting to {}", id, url);
                self.session = Some(Session::new(id, url.to_string(), connection));
                Effect::ClearInput
            }
            Err(e) => {
                warn!("Could not open {}: {}", url, e);
                self.log.system(ERR_INVALID_URL);
                Effect::None
            }
        }
    }

    /// Send one line to the peer and echo it locally.
    pub fn send(&mut self, text: &str) -> Effect {
        if text.trim().is_empty() {
            return Effect::None;
        }
        if !self.connected {
            debug!("Ignoring send while disconnected");
            return Effect::None;
        }
        let Some(connection) = self
            .session
            .as_ref()
            .filter(|s| s.is_open())
            .and_then(|s| s.connection.as_ref())
        else {
            debug!("Ignoring send without an open session");
            return Effect::None;
        };

        // Transport failures surface through its own Errored/Closed events
        if let Err(e) = connection.send(text) {
            warn!("Send failed: {}", e);
        }
        self.log
            .append(Message::new(format!("{LOCAL_ECHO_PREFIX}{text}"), Sender::Local));
        Effect::ClearInput
    }

    /// React to something the transport reported.
    pub fn handle_transport_event(&mut self, id: ConnectionId, event: TransportEvent) -> Effect {
        let Some(session) = self.session.as_mut().filter(|s| s.id == id) else {
            debug!("Ignoring {:?} from stale connection {}", event, id);
            return Effect::None;
        };

        let previous = session.state;
        session.state = previous.after(&event);
        if previous != session.state {
            info!(
                "Connection {}: {:?} -> {:?}",
                id, previous, session.state
            );
        }

        match event {
            TransportEvent::Opened => {
                self.connected = true;
                self.show_url_input = false;
                self.log.system(READY_BANNER);
                self.log.system(CONNECTION_ESTABLISHED);
                self.log.system(PROMPT_MARKER);
                Effect::FocusComposer
            }
            TransportEvent::Message(text) => {
                self.log.append(Message::new(text, Sender::Remote));
                Effect::None
            }
            TransportEvent::Errored(reason) => {
                warn!("Connection {} error: {}", id, reason);
                self.log.system(ERR_CONNECTION_FAILED);
                Effect::None
            }
            TransportEvent::Closed => {
                // The socket is gone; drop our handle without a second close
                session.connection = None;
                self.connected = false;
                self.log.system(CONNECTION_CLOSED);
                self.log.system(PROMPT_MARKER);
                Effect::None
            }
        }
    }

    /// Release the connection, whatever state it is in. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if let Some(session) = self.session.as_mut()
            && session.release()
        {
            info!("Connection {} closed on teardown", session.id);
            if session.state != SessionState::Failed {
                session.state = SessionState::Closed;
            }
        }
    }
}
