//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every game rule and the simulation loop. It has no
//! terminal, input or I/O dependencies; rendering and tick scheduling are
//! reached through the [`render::RenderTarget`] and
//! [`scheduler::TickScheduler`] traits.
//!
//! # Module Structure
//!
//! - [`shapes`]: static catalog of the seven shapes and their rotation states
//! - [`rng`]: uniform random shape/rotation picks and spawn placement
//! - [`board`]: 10x20 occupancy grid, merging, full-row scan and row clearing
//! - [`piece`]: the active piece and its rotation clamp
//! - [`collision`]: bounds and overlap checks
//! - [`scoring`]: points per cleared row
//! - [`engine`]: the state machine and per-tick step
//! - [`config`], [`scheduler`], [`render`], [`events`], [`snapshot`]: the engine's seams
//!
//! # Game Rules
//!
//! - Pieces spawn at row 0, at a random column where their box fits
//! - Gravity moves the piece one row per fall interval (1000ms by default)
//! - Fast drop makes gravity step on every tick until the piece locks
//! - A piece that cannot move down locks; full rows clear for 10 points each
//! - A spawn that overlaps locked cells ends the game
//!
//! # Example
//!
//! ```
//! use tui_stacker_core::{EngineConfig, HeadlessEngine, ManualScheduler};
//! use tui_stacker_core::types::{Command, EnginePhase};
//!
//! let config = EngineConfig { seed: Some(12345), ..EngineConfig::default() };
//! let mut engine = HeadlessEngine::new(config, ManualScheduler::new());
//! engine.start();
//! assert_eq!(engine.phase(), EnginePhase::Running);
//!
//! engine.apply(Command::FastDrop);
//! let mut now = 0;
//! while engine.pieces_locked() == 0 {
//!     let handle = engine.scheduler_mut().take_pending().unwrap();
//!     engine.on_tick(handle, now);
//!     now += 16;
//! }
//! assert_eq!(engine.board().filled_count(), 4);
//! ```

pub mod board;
pub mod collision;
pub mod config;
pub mod engine;
pub mod events;
pub mod piece;
pub mod render;
pub mod rng;
pub mod scheduler;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use tui_stacker_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::{can_place, overlaps};
pub use config::{ConfigError, EngineConfig, RotationRule};
pub use engine::{Engine, HeadlessEngine};
pub use events::Listeners;
pub use piece::ActivePiece;
pub use render::{CellCanvas, RenderTarget};
pub use rng::ShapePicker;
pub use scheduler::{FrameClock, ManualScheduler, TickHandle, TickScheduler};
pub use scoring::line_clear_score;
pub use shapes::{rotation_count, rotation_state, rotations, RotationState};
pub use snapshot::{board_hash, BoardGrid, EngineSnapshot};
