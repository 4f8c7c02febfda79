//! # TUI Components
//!
//! UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as props:
//! - `TitleBar`: status row with program name, session URL and state
//! - `MessageLine`: one log entry, printed the way a terminal would
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `InputBox`: the single input line (URL entry, composer, disconnected)
//! - `MessageList`: scrollable log view with layout caching
//!
//! Each component file holds its state types, event types, rendering,
//! event handling and tests.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (status row)
//! ├── message.rs       (single log entry)
//! ├── message_list.rs  (scrollable log)
//! └── input_box/       (single-line input)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod input_box;
pub mod message;
pub use input_box::{InputBox, InputEvent, Prompt};
pub mod message_list;
pub use message_list::{MessageList, MessageListState};
