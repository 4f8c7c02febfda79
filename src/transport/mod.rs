//! # Transport
//!
//! The duplex text-stream seam between the core and the network.
//!
//! The core only needs four things from a connection: to open it, to push a
//! line of text into it, to close it, and to hear back about what happened.
//! Everything that happens asynchronously is reported as a [`TransportEvent`]
//! tagged with the [`ConnectionId`] it belongs to, so the event loop can drop
//! events from connections that have since been replaced.
//!
//! ```text
//!   core::controller ──open/send/close──▶ Transport / Connection
//!          ▲                                      │
//!          └────── (ConnectionId, TransportEvent) ┘  (mpsc channel)
//! ```

pub mod websocket;

use std::fmt;
use std::sync::mpsc;

pub use websocket::WebSocketTransport;

/// Identifies one connection attempt. Monotonic per `App`.
pub type ConnectionId = u64;

/// Where a transport reports lifecycle events.
pub type EventSink = mpsc::Sender<(ConnectionId, TransportEvent)>;

/// Everything a connection can report after it has been opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// Handshake completed; the connection can carry text.
    Opened,
    /// A frame arrived from the peer.
    Message(String),
    /// Something went wrong. Not necessarily followed by `Closed`.
    Errored(String),
    /// The connection is gone.
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The URL cannot be used as a connection target. Raised synchronously by `open`.
    InvalidUrl(String),
    /// The frame could not be queued for sending.
    Send(String),
    /// The connection has already been released.
    Closed,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::InvalidUrl(msg) => write!(f, "invalid url: {msg}"),
            TransportError::Send(msg) => write!(f, "send failed: {msg}"),
            TransportError::Closed => write!(f, "connection closed"),
        }
    }
}

impl std::error::Error for TransportError {}

/// Opens connections. Held by the core as `Arc<dyn Transport>`.
pub trait Transport: Send + Sync {
    /// Starts connecting to `url`.
    ///
    /// Returns immediately. Progress is reported on `events`, every event
    /// tagged with `id`. Fails only when the URL is unusable.
    fn open(
        &self,
        url: &str,
        id: ConnectionId,
        events: EventSink,
    ) -> Result<Box<dyn Connection>, TransportError>;
}

/// A handle to one open (or opening) connection.
pub trait Connection: Send {
    /// Queues `text` to be sent verbatim as a single frame.
    fn send(&self, text: &str) -> Result<(), TransportError>;

    /// Closes the connection and releases its resources.
    fn close(&mut self);
}
