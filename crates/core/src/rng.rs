//! Random selector - uniform shape and rotation picks
//!
//! Every pick is independent: a uniformly random shape from the catalog, then
//! a uniformly random rotation of that shape. A seeded ChaCha stream makes
//! games reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

use crate::piece::ActivePiece;
use crate::shapes::{rotation_count, rotation_state};
use crate::types::{ShapeName, BOARD_WIDTH};

/// Seeded source of new pieces
#[derive(Debug, Clone)]
pub struct ShapePicker {
    rng: ChaCha12Rng,
    seed: u64,
}

impl ShapePicker {
    /// Create a picker with a fixed seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha12Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a picker seeded from the thread RNG
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Pick a shape and a rotation index within that shape's range
    pub fn pick_shape(&mut self) -> (ShapeName, usize) {
        let shape = ShapeName::ALL[self.rng.random_range(0..ShapeName::ALL.len())];
        let rotation = self.rng.random_range(0..rotation_count(shape));
        (shape, rotation)
    }

    /// A fresh piece at row 0 and a random column where its box fits the board
    pub fn spawn(&mut self) -> ActivePiece {
        let (shape, rotation) = self.pick_shape();
        let width = rotation_state(shape, rotation).width;
        let max_x = BOARD_WIDTH - width;
        let x = self.rng.random_range(0..=max_x);
        ActivePiece::new(shape, rotation, x as i8, 0)
    }
}
