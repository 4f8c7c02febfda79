//! WebSocket transport built on tokio-tungstenite.
//!
//! Each connection is one tokio task. The task owns the socket; the
//! [`WebSocketConnection`] handle only holds the command channel into it.
//! Dropping the handle closes the channel, which the task treats as `Close`.
//!
//! Event sequence mirrors a browser `WebSocket`:
//! - handshake ok: `Opened`, then `Message`* , then `Closed`
//! - handshake failed: `Errored`, then `Closed`

use futures::{SinkExt, StreamExt};
use log::{debug, info, warn};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;

use super::{Connection, ConnectionId, EventSink, Transport, TransportError, TransportEvent};

/// Commands from the handle to the connection task.
#[derive(Debug)]
enum Command {
    Send(String),
    Close,
}

/// Opens WebSocket connections on the given tokio runtime.
pub struct WebSocketTransport {
    runtime: Handle,
}

impl WebSocketTransport {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }
}

/// Build the handshake request for `url`, rejecting anything that is not a
/// `ws://` or `wss://` URL with a host.
pub fn client_request(url: &str) -> Result<Request, TransportError> {
    let request = url
        .into_client_request()
        .map_err(|e| TransportError::InvalidUrl(e.to_string()))?;

    match request.uri().scheme_str() {
        Some("ws") | Some("wss") => {}
        other => {
            return Err(TransportError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                other.unwrap_or_default()
            )));
        }
    }

    if request.uri().host().is_none_or(str::is_empty) {
        return Err(TransportError::InvalidUrl("missing host".to_string()));
    }

    Ok(request)
}

impl Transport for WebSocketTransport {
    fn open(
        &self,
        url: &str,
        id: ConnectionId,
        events: EventSink,
    ) -> Result<Box<dyn Connection>, TransportError> {
        let request = client_request(url)?;
        let (commands_tx, commands_rx) = unbounded_channel();

        info!("Opening connection {} to {}", id, url);
        self.runtime
            .spawn(drive_connection(request, id, commands_rx, events));

        Ok(Box::new(WebSocketConnection {
            commands: commands_tx,
            closed: false,
        }))
    }
}

/// Handle to a running connection task.
pub struct WebSocketConnection {
    commands: UnboundedSender<Command>,
    closed: bool,
}

impl Connection for WebSocketConnection {
    fn send(&self, text: &str) -> Result<(), TransportError> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        self.commands
            .send(Command::Send(text.to_owned()))
            .map_err(|_| TransportError::Send("connection task has exited".to_string()))
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if self.commands.send(Command::Close).is_err() {
            debug!("Close requested after connection task exited");
        }
    }
}

fn emit(events: &EventSink, id: ConnectionId, event: TransportEvent) {
    if events.send((id, event)).is_err() {
        debug!("Dropping event for connection {}: receiver gone", id);
    }
}

/// Resolves once the handle asks to close or goes away.
/// Frames queued before the handshake finishes are discarded.
async fn until_close_requested(commands: &mut UnboundedReceiver<Command>) {
    while let Some(command) = commands.recv().await {
        match command {
            Command::Close => return,
            Command::Send(_) => warn!("Discarding frame queued before handshake"),
        }
    }
}

async fn drive_connection(
    request: Request,
    id: ConnectionId,
    mut commands: UnboundedReceiver<Command>,
    events: EventSink,
) {
    let stream = tokio::select! {
        result = connect_async(request) => match result {
            Ok((stream, _response)) => stream,
            Err(e) => {
                warn!("Connection {} handshake failed: {}", id, e);
                emit(&events, id, TransportEvent::Errored(e.to_string()));
                emit(&events, id, TransportEvent::Closed);
                return;
            }
        },
        _ = until_close_requested(&mut commands) => {
            info!("Connection {} closed before handshake completed", id);
            emit(&events, id, TransportEvent::Closed);
            return;
        }
    };

    info!("Connection {} open", id);
    emit(&events, id, TransportEvent::Opened);

    let (mut sink, mut frames) = stream.split();

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Send(text)) => {
                    debug!("Connection {} sending {} bytes", id, text.len());
                    if let Err(e) = sink.send(WsMessage::text(text)).await {
                        warn!("Connection {} send failed: {}", id, e);
                        emit(&events, id, TransportEvent::Errored(e.to_string()));
                        break;
                    }
                }
                Some(Command::Close) | None => {
                    if let Err(e) = sink.send(WsMessage::Close(None)).await {
                        debug!("Connection {} close frame not sent: {}", id, e);
                    }
                    break;
                }
            },
            frame = frames.next() => match frame {
                Some(Ok(WsMessage::Text(text))) => {
                    emit(&events, id, TransportEvent::Message(text.as_str().to_owned()));
                }
                Some(Ok(WsMessage::Binary(bytes))) => {
                    let text = String::from_utf8_lossy(&bytes).into_owned();
                    emit(&events, id, TransportEvent::Message(text));
                }
                Some(Ok(WsMessage::Close(frame))) => {
                    info!("Connection {} closed by peer: {:?}", id, frame);
                    break;
                }
                // Ping/pong are answered by tungstenite itself
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!("Connection {} read failed: {}", id, e);
                    emit(&events, id, TransportEvent::Errored(e.to_string()));
                    break;
                }
                None => break,
            },
        }
    }

    info!("Connection {} finished", id);
    emit(&events, id, TransportEvent::Closed);
}
