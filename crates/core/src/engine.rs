//! Game engine - the state machine tying board, pieces, scoring and timing together
//!
//! The engine owns the board and the active piece, accepts player commands and
//! advances the simulation one step per delivered tick:
//!
//! 1. A freshly spawned piece that already overlaps the board ends the game.
//! 2. The first tick after a spawn only records the gravity baseline.
//! 3. Once the fall interval has elapsed (or on every tick while fast drop is
//!    set) the piece moves down one row; if it cannot, it locks, full rows are
//!    cleared and scored, and the next piece spawns.
//! 4. Every step ends by painting the board + piece composite.

use log::{debug, info, trace};

use crate::board::Board;
use crate::collision::{can_place, overlaps};
use crate::config::{EngineConfig, RotationRule};
use crate::events::Listeners;
use crate::piece::ActivePiece;
use crate::render::{CellCanvas, RenderTarget};
use crate::rng::ShapePicker;
use crate::scheduler::{ManualScheduler, TickHandle, TickScheduler};
use crate::scoring::line_clear_score;
use crate::snapshot::{board_hash, EngineSnapshot};
use crate::types::{Command, Direction, EngineEvent, EnginePhase, BOARD_HEIGHT, BOARD_WIDTH};

/// Engine driven by a [`ManualScheduler`] and painting into a [`CellCanvas`]
pub type HeadlessEngine = Engine<ManualScheduler, CellCanvas>;

/// The falling-block game engine
pub struct Engine<S, R = CellCanvas> {
    config: EngineConfig,
    board: Board,
    active: Option<ActivePiece>,
    picker: ShapePicker,
    phase: EnginePhase,
    score: u32,
    /// Gravity baseline; `None` until the first tick after a spawn
    last_tick_ms: Option<u64>,
    fast_drop: bool,
    /// The single live tick subscription
    tick_handle: Option<TickHandle>,
    scheduler: S,
    renderer: Option<R>,
    listeners: Listeners,
    rows_cleared: u32,
    pieces_locked: u32,
}

impl<S: TickScheduler, R: RenderTarget> Engine<S, R> {
    /// Create an idle engine. Call [`Engine::start`] to begin a game.
    pub fn new(config: EngineConfig, scheduler: S) -> Self {
        let picker = match config.seed {
            Some(seed) => ShapePicker::new(seed),
            None => ShapePicker::from_entropy(),
        };

        Self {
            config,
            board: Board::new(),
            active: None,
            picker,
            phase: EnginePhase::Idle,
            score: 0,
            last_tick_ms: None,
            fast_drop: false,
            tick_handle: None,
            scheduler,
            renderer: None,
            listeners: Listeners::default(),
            rows_cleared: 0,
            pieces_locked: 0,
        }
    }

    pub fn with_renderer(mut self, renderer: R) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Install a render target, returning the previous one
    pub fn attach_renderer(&mut self, renderer: R) -> Option<R> {
        self.renderer.replace(renderer)
    }

    pub fn detach_renderer(&mut self) -> Option<R> {
        self.renderer.take()
    }

    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access for hosts that poll the scheduler for due ticks
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn on_start(&mut self, f: impl FnMut() + Send + 'static) {
        self.listeners.set_on_start(f);
    }

    pub fn on_game_over(&mut self, f: impl FnMut() + Send + 'static) {
        self.listeners.set_on_game_over(f);
    }

    pub fn on_score_change(&mut self, f: impl FnMut(u32) + Send + 'static) {
        self.listeners.set_on_score_change(f);
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == EnginePhase::Running
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn fast_drop(&self) -> bool {
        self.fast_drop
    }

    pub fn last_tick_ms(&self) -> Option<u64> {
        self.last_tick_ms
    }

    pub fn tick_handle(&self) -> Option<TickHandle> {
        self.tick_handle
    }

    pub fn rows_cleared(&self) -> u32 {
        self.rows_cleared
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn seed(&self) -> u64 {
        self.picker.seed()
    }

    /// Start a new game; restarts the current one when already running.
    pub fn start(&mut self) {
        if let Some(handle) = self.tick_handle.take() {
            self.scheduler.cancel(handle);
        }
        let restart = self.phase != EnginePhase::Idle;

        self.board.clear();
        self.score = 0;
        self.fast_drop = false;
        self.rows_cleared = 0;
        self.pieces_locked = 0;
        self.spawn_piece();

        self.tick_handle = Some(self.scheduler.schedule());
        self.phase = EnginePhase::Running;

        info!(
            "game started (seed={}, restart={}, fall_interval_ms={}, rotation={})",
            self.picker.seed(),
            restart,
            self.config.fall_interval_ms,
            self.config.rotation_rule.as_str()
        );
        self.listeners.emit(EngineEvent::Started);
    }

    /// Cancel the tick subscription and leave the game idle.
    ///
    /// Board and score are kept; no game-over notification is sent.
    pub fn stop(&mut self) {
        if let Some(handle) = self.tick_handle.take() {
            self.scheduler.cancel(handle);
        }
        if self.phase == EnginePhase::Running {
            self.phase = EnginePhase::Idle;
            info!(
                "game stopped (phase={}, score={})",
                self.phase.as_str(),
                self.score
            );
        }
    }

    /// Dispatch a player command. Returns whether it changed anything.
    pub fn apply(&mut self, command: Command) -> bool {
        trace!("command {} in {}", command.as_str(), self.phase.as_str());
        match command {
            Command::Start => {
                self.start();
                true
            }
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::MoveDown => self.move_down(),
            Command::Rotate => self.rotate(),
            Command::FastDrop => self.request_fast_drop(),
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.move_horizontal(Direction::Left)
    }

    pub fn move_right(&mut self) -> bool {
        self.move_horizontal(Direction::Right)
    }

    pub fn move_horizontal(&mut self, direction: Direction) -> bool {
        if !self.is_running() {
            return false;
        }
        self.try_move(direction.dx(), 0)
    }

    /// Move one row down if possible. Never locks the piece; only gravity does.
    pub fn move_down(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.try_move(0, 1)
    }

    /// Advance to the next rotation state, clamped inside the board.
    ///
    /// Under [`RotationRule::ClampAndCheck`] a rotation that would overlap
    /// locked cells is rejected and the piece keeps its state.
    pub fn rotate(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        let rotated = piece.rotated_clamped();
        if self.config.rotation_rule == RotationRule::ClampAndCheck
            && !can_place(&self.board, &rotated, 0, 0)
        {
            trace!("rotation of {} rejected", piece.shape.as_str());
            return false;
        }

        self.active = Some(rotated);
        true
    }

    /// Make gravity step on every tick until the current piece locks
    pub fn request_fast_drop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.fast_drop = true;
        true
    }

    /// Entry point for scheduler ticks.
    ///
    /// Ticks carrying anything but the live handle are ignored. An accepted tick
    /// re-subscribes before stepping, so the engine always holds the one
    /// pending handle until the game ends or is stopped.
    pub fn on_tick(&mut self, handle: TickHandle, now_ms: u64) -> bool {
        if self.tick_handle != Some(handle) {
            trace!("ignoring stale tick {:?}", handle);
            return false;
        }
        self.tick_handle = Some(self.scheduler.schedule());
        self.step(now_ms);
        true
    }

    /// Run one simulation step at time `now_ms`
    pub fn step(&mut self, now_ms: u64) {
        if !self.is_running() {
            return;
        }
        let Some(piece) = self.active else {
            return;
        };

        if piece.y == 0 && overlaps(&self.board, &piece) {
            self.game_over();
            return;
        }

        match self.last_tick_ms {
            None => self.last_tick_ms = Some(now_ms),
            Some(last) => {
                let interval = self.config.fall_interval_ms as u64;
                if self.fast_drop || now_ms.saturating_sub(last) >= interval {
                    self.last_tick_ms = Some(now_ms);
                    if !self.try_move(0, 1) {
                        self.lock_active();
                    } else {
                        trace!("gravity step at {}ms", now_ms);
                    }
                }
            }
        }

        self.draw();
    }

    /// Paint the board + active piece composite into the render target, if any
    pub fn draw(&mut self) {
        if self.renderer.is_none() {
            return;
        }
        let composite = self.composite();
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.clear(BOARD_WIDTH, BOARD_HEIGHT);
            for y in 0..BOARD_HEIGHT {
                for x in 0..BOARD_WIDTH {
                    renderer.fill_cell(x, y, composite.is_occupied(x as i16, y as i16));
                }
            }
        }
    }

    /// The board with the active piece merged in; the real board is not modified
    pub fn composite(&self) -> Board {
        match self.active {
            Some(piece) => self.board.project_merge(&piece),
            None => self.board.clone(),
        }
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let mut snap = EngineSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    pub fn snapshot_into(&self, out: &mut EngineSnapshot) {
        self.composite().write_u8_grid(&mut out.board);
        out.board_hash = board_hash(&out.board);
        out.active = self.active;
        out.phase = self.phase;
        out.score = self.score;
        out.fast_drop = self.fast_drop;
        out.rows_cleared = self.rows_cleared;
        out.pieces_locked = self.pieces_locked;
        out.seed = self.picker.seed();
    }

    /// Replace the locked cells, e.g. to set up a puzzle position.
    ///
    /// The active piece is left where it is.
    pub fn replace_board(&mut self, board: Board) {
        self.board = board;
    }

    /// Swap in a specific active piece. Rejected if it does not fit where it stands.
    pub fn place_active(&mut self, piece: ActivePiece) -> bool {
        if !can_place(&self.board, &piece, 0, 0) {
            return false;
        }
        self.active = Some(piece);
        true
    }

    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        if !can_place(&self.board, &piece, dx, dy) {
            trace!("move ({}, {}) of {} rejected", dx, dy, piece.shape.as_str());
            return false;
        }
        self.active = Some(piece.shifted(dx, dy));
        true
    }

    fn spawn_piece(&mut self) {
        let piece = self.picker.spawn();
        debug!(
            "spawned {} rotation {} at x={}",
            piece.shape.as_str(),
            piece.rotation,
            piece.x
        );
        self.active = Some(piece);
        self.last_tick_ms = None;
    }

    /// Commit the active piece, clear and score rows, then spawn the next piece
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        self.board.commit_merge(&piece);
        self.pieces_locked += 1;
        debug!(
            "locked {} at ({}, {})",
            piece.shape.as_str(),
            piece.x,
            piece.y
        );

        let cleared = self.board.clear_full_rows();
        if !cleared.is_empty() {
            self.rows_cleared += cleared.len() as u32;
            self.score = self.score.saturating_add(line_clear_score(cleared.len()));
            debug!("cleared rows {:?}, score {}", cleared.as_slice(), self.score);
            self.listeners.emit(EngineEvent::ScoreChanged(self.score));
        }

        self.spawn_piece();
        self.fast_drop = false;
    }

    fn game_over(&mut self) {
        self.phase = EnginePhase::GameOver;
        if let Some(handle) = self.tick_handle.take() {
            self.scheduler.cancel(handle);
        }
        info!(
            "{} (score={}, rows={}, pieces={})",
            self.phase.as_str(),
            self.score,
            self.rows_cleared,
            self.pieces_locked
        );
        self.listeners.emit(EngineEvent::GameOver);
    }
}
