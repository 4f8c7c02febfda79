//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};

use crate::core::state::App;
use crate::transport::websocket::client_request;
use crate::transport::{
    Connection, ConnectionId, EventSink, Transport, TransportError, TransportEvent,
};

#[derive(Default)]
struct Record {
    opened: Vec<String>,
    sent: Vec<String>,
    closes: usize,
}

/// A transport that never touches the network. Records what the core asks of it.
/// URLs are checked with the same rules as the real WebSocket transport.
#[derive(Clone, Default)]
pub struct MockTransport {
    record: Arc<Mutex<Record>>,
}

impl MockTransport {
    pub fn opened(&self) -> Vec<String> {
        self.record.lock().unwrap().opened.clone()
    }

    pub fn sent(&self) -> Vec<String> {
        self.record.lock().unwrap().sent.clone()
    }

    pub fn close_count(&self) -> usize {
        self.record.lock().unwrap().closes
    }
}

impl Transport for MockTransport {
    fn open(
        &self,
        url: &str,
        _id: ConnectionId,
        _events: EventSink,
    ) -> Result<Box<dyn Connection>, TransportError> {
        client_request(url)?;
        self.record.lock().unwrap().opened.push(url.to_string());
        Ok(Box::new(MockConnection {
            record: self.record.clone(),
        }))
    }
}

struct MockConnection {
    record: Arc<Mutex<Record>>,
}

impl Connection for MockConnection {
    fn send(&self, text: &str) -> Result<(), TransportError> {
        self.record.lock().unwrap().sent.push(text.to_string());
        Ok(())
    }

    fn close(&mut self) {
        self.record.lock().unwrap().closes += 1;
    }
}

/// Creates a test App backed by a MockTransport.
pub fn test_app() -> (App, MockTransport, Receiver<(ConnectionId, TransportEvent)>) {
    let transport = MockTransport::default();
    let (tx, rx) = mpsc::channel();
    let app = App::new(Arc::new(transport.clone()), tx);
    (app, transport, rx)
}
