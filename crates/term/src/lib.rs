//! Terminal front-end for the stacker engine.
//!
//! The engine paints into a [`CellCanvas`](crate::core::CellCanvas) through its
//! render adapter; this crate turns that canvas plus a small HUD into a styled
//! framebuffer and flushes it to the terminal with crossterm.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_stacker_core as core;
pub use tui_stacker_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, HudView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
