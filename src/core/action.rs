//! # Actions
//!
//! Everything that can happen in crtchat becomes an `Action`.
//! User presses Enter? That's `Action::Submit(line)`.
//! The socket delivers a frame? That's `Action::Transport { .. }`.
//!
//! `update()` applies an action to the `App` and returns an `Effect`: the
//! part of the outcome that belongs to the presentation layer (clear the
//! input line, move focus, quit).
//!
//! ```text
//! App + Action  →  update()  →  App'  +  Effect
//! ```

use log::debug;

use crate::core::state::App;
use crate::transport::{ConnectionId, TransportEvent};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Enter pressed. Carries the input line as typed.
    Submit(String),
    /// Something happened on a connection.
    Transport {
        connection: ConnectionId,
        event: TransportEvent,
    },
    Quit,
}

/// What the presentation layer should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Empty the input line.
    ClearInput,
    /// Give keyboard focus to the message composer.
    FocusComposer,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Submit(line) => {
            if app.show_url_input {
                app.connect(&line)
            } else {
                // Also reached after a close: the prompt never comes back,
                // and send() ignores the line while disconnected.
                app.send(&line)
            }
        }
        Action::Transport { connection, event } => app.handle_transport_event(connection, event),
        Action::Quit => {
            app.teardown();
            Effect::Quit
        }
    }
}
