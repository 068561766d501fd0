use crate::piece::ActivePiece;
use crate::types::{EnginePhase, BOARD_HEIGHT, BOARD_WIDTH};

/// Row-major copy of the board with the active piece merged in
pub type BoardGrid = [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// Read-only copy of everything a front-end needs to display a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineSnapshot {
    /// Locked cells plus the active piece
    pub board: BoardGrid,
    /// FNV-1a hash of `board`, for cheap change detection
    pub board_hash: u64,
    pub active: Option<ActivePiece>,
    pub phase: EnginePhase,
    pub score: u32,
    pub fast_drop: bool,
    pub rows_cleared: u32,
    pub pieces_locked: u32,
    pub seed: u64,
}

impl Default for EngineSnapshot {
    fn default() -> Self {
        let board = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        Self {
            board,
            board_hash: board_hash(&board),
            active: None,
            phase: EnginePhase::Idle,
            score: 0,
            fast_drop: false,
            rows_cleared: 0,
            pieces_locked: 0,
            seed: 0,
        }
    }
}

impl EngineSnapshot {
    pub fn playable(&self) -> bool {
        self.phase == EnginePhase::Running
    }
}

/// FNV-1a 64-bit hash over the grid bytes
pub fn board_hash(board: &BoardGrid) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for &b in board.iter().flatten() {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}
