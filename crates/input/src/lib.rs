//! Terminal input mapping.
//!
//! Translates `crossterm` key events into engine [`Command`](crate::types::Command)s.
//! Repeat handling is left to the terminal's own auto-repeat.

pub mod map;

pub use tui_stacker_types as types;

pub use map::{accepts_kind, command_for, handle_key_event, should_quit};
