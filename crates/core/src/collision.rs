//! Collision checker
//!
//! Pure placement tests used before every move, rotation and at spawn.

use crate::board::Board;
use crate::piece::ActivePiece;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Whether `piece` shifted by (dx, dy) fits the board.
///
/// Rejects placements whose bounding box crosses the left, right or bottom edge,
/// then any placement where a filled piece cell lands on a filled board cell.
/// There is no top-edge check: pieces spawn at row 0 and never move up.
pub fn can_place(board: &Board, piece: &ActivePiece, dx: i8, dy: i8) -> bool {
    let x = piece.x as i16 + dx as i16;
    let y = piece.y as i16 + dy as i16;
    let state = piece.state();

    if x < 0 || x + state.width as i16 > BOARD_WIDTH as i16 {
        return false;
    }
    if y + state.height as i16 > BOARD_HEIGHT as i16 {
        return false;
    }

    state
        .filled_cells()
        .all(|(col, row)| !board.is_occupied(x + col as i16, y + row as i16))
}

/// Whether any filled cell of the piece, where it stands, sits on a filled board cell
pub fn overlaps(board: &Board, piece: &ActivePiece) -> bool {
    piece.cells().any(|(x, y)| board.is_occupied(x, y))
}
