//! Active piece - the falling, player-controlled piece
//!
//! The piece is a value type: movement and rotation produce a candidate piece
//! that the engine only adopts after the collision checker accepts it.

use crate::shapes::{rotation_count, rotation_state, RotationState};
use crate::types::{ShapeName, BOARD_HEIGHT, BOARD_WIDTH};

/// Shape, rotation index and top-left anchor of the falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub shape: ShapeName,
    /// Index into the shape's rotation list, always in `[0, rotation_count)`
    pub rotation: usize,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Create a piece; the rotation index is reduced into the shape's valid range
    pub fn new(shape: ShapeName, rotation: usize, x: i8, y: i8) -> Self {
        Self {
            shape,
            rotation: rotation % rotation_count(shape),
            x,
            y,
        }
    }

    /// Current rotation state (bounding box + mask)
    pub fn state(&self) -> &'static RotationState {
        rotation_state(self.shape, self.rotation)
    }

    pub fn width(&self) -> u8 {
        self.state().width
    }

    pub fn height(&self) -> u8 {
        self.state().height
    }

    /// Absolute board coordinates of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        let (x, y) = (self.x as i16, self.y as i16);
        self.state()
            .filled_cells()
            .map(move |(col, row)| (x + col as i16, y + row as i16))
    }

    /// The same piece moved by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }

    /// The next rotation state, pulled back inside the right and bottom edges.
    ///
    /// The clamp only looks at the board bounds, never at locked cells.
    pub fn rotated_clamped(&self) -> Self {
        let rotation = (self.rotation + 1) % rotation_count(self.shape);
        let state = rotation_state(self.shape, rotation);

        let max_x = BOARD_WIDTH as i8 - state.width as i8;
        let max_y = BOARD_HEIGHT as i8 - state.height as i8;

        Self {
            rotation,
            x: self.x.min(max_x),
            y: self.y.min(max_y),
            ..*self
        }
    }
}
