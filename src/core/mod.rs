//! # Core Application Logic
//!
//! The chat session, independent of any terminal library.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • App (state)          │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • controller (socket)  │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │ Transport  │
//!     │  Adapter   │                          │ (WebSocket)│
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all session state in one place
//! - [`action`]: The `Action` enum and `update()`
//! - [`controller`]: connect / send / transport events / teardown
//! - [`session`]: one connection attempt and its state machine
//! - [`messages`]: the append-only message log
//! - [`config`]: settings file, env and CLI resolution

pub mod action;
pub mod config;
pub mod controller;
pub mod messages;
pub mod session;
pub mod state;
