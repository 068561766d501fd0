//! Shape catalog - static piece definitions
//!
//! Every shape owns an ordered list of rotation states. A rotation state is a
//! bounding box plus a row-major occupancy mask (`1` = filled). Only distinct
//! orientations are stored, so I/S/Z have two states and O has one.

use crate::types::ShapeName;

/// One orientation of a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationState {
    pub width: u8,
    pub height: u8,
    /// Row-major occupancy mask, `width * height` entries of 0 or 1
    pub mask: &'static [u8],
}

impl RotationState {
    const fn new(width: u8, height: u8, mask: &'static [u8]) -> Self {
        Self {
            width,
            height,
            mask,
        }
    }

    /// Whether the mask cell at (col, row) inside the bounding box is filled
    #[inline]
    pub fn is_filled(&self, col: u8, row: u8) -> bool {
        if col >= self.width || row >= self.height {
            return false;
        }
        self.mask
            .get(row as usize * self.width as usize + col as usize)
            .is_some_and(|&v| v != 0)
    }

    /// Number of filled cells in the mask
    pub fn filled_count(&self) -> usize {
        self.mask.iter().filter(|&&v| v != 0).count()
    }

    /// Filled cells as (col, row) offsets from the top-left of the bounding box
    pub fn filled_cells(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        let width = self.width.max(1) as usize;
        self.mask
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0)
            .map(move |(i, _)| ((i % width) as u8, (i / width) as u8))
    }
}

const I_STATES: [RotationState; 2] = [
    RotationState::new(4, 1, &[1, 1, 1, 1]),
    RotationState::new(1, 4, &[1, 1, 1, 1]),
];

const O_STATES: [RotationState; 1] = [RotationState::new(2, 2, &[1, 1, 1, 1])];

const T_STATES: [RotationState; 4] = [
    RotationState::new(3, 2, &[1, 1, 1, 0, 1, 0]),
    RotationState::new(2, 3, &[0, 1, 1, 1, 0, 1]),
    RotationState::new(3, 2, &[0, 1, 0, 1, 1, 1]),
    RotationState::new(2, 3, &[1, 0, 1, 1, 1, 0]),
];

const S_STATES: [RotationState; 2] = [
    RotationState::new(3, 2, &[0, 1, 1, 1, 1, 0]),
    RotationState::new(2, 3, &[1, 0, 1, 1, 0, 1]),
];

const Z_STATES: [RotationState; 2] = [
    RotationState::new(3, 2, &[1, 1, 0, 0, 1, 1]),
    RotationState::new(2, 3, &[0, 1, 1, 1, 1, 0]),
];

const J_STATES: [RotationState; 4] = [
    RotationState::new(3, 2, &[1, 0, 0, 1, 1, 1]),
    RotationState::new(2, 3, &[1, 1, 1, 0, 1, 0]),
    RotationState::new(3, 2, &[1, 1, 1, 0, 0, 1]),
    RotationState::new(2, 3, &[0, 1, 0, 1, 1, 1]),
];

const L_STATES: [RotationState; 4] = [
    RotationState::new(3, 2, &[0, 0, 1, 1, 1, 1]),
    RotationState::new(2, 3, &[1, 0, 1, 0, 1, 1]),
    RotationState::new(3, 2, &[1, 1, 1, 1, 0, 0]),
    RotationState::new(2, 3, &[1, 1, 0, 1, 0, 1]),
];

/// All rotation states of a shape, in rotation order
pub fn rotations(shape: ShapeName) -> &'static [RotationState] {
    match shape {
        ShapeName::I => &I_STATES,
        ShapeName::O => &O_STATES,
        ShapeName::T => &T_STATES,
        ShapeName::S => &S_STATES,
        ShapeName::Z => &Z_STATES,
        ShapeName::J => &J_STATES,
        ShapeName::L => &L_STATES,
    }
}

/// Number of rotation states of a shape
pub fn rotation_count(shape: ShapeName) -> usize {
    rotations(shape).len()
}

/// Rotation state `index` of a shape.
///
/// Indices wrap modulo the rotation count, so every index resolves to a state.
pub fn rotation_state(shape: ShapeName, index: usize) -> &'static RotationState {
    let states = rotations(shape);
    &states[index % states.len()]
}
