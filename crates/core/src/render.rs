//! Render adapter interface
//!
//! The engine paints a full board snapshot through [`RenderTarget`] once per tick.
//! [`CellCanvas`] is an in-memory target that front-ends read back from.

/// Minimal drawing surface the engine paints into
pub trait RenderTarget {
    /// Start a new frame of `width` x `height` cells
    fn clear(&mut self, width: u8, height: u8);

    /// Paint one cell
    fn fill_cell(&mut self, x: u8, y: u8, solid: bool);
}

impl<T: RenderTarget + ?Sized> RenderTarget for Box<T> {
    fn clear(&mut self, width: u8, height: u8) {
        (**self).clear(width, height)
    }

    fn fill_cell(&mut self, x: u8, y: u8, solid: bool) {
        (**self).fill_cell(x, y, solid)
    }
}

/// Grid of painted cells, rebuilt on every frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellCanvas {
    width: u8,
    height: u8,
    cells: Vec<bool>,
    frames: u64,
}

impl CellCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Number of frames painted so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Whether (x, y) was painted solid in the current frame
    pub fn is_solid(&self, x: u8, y: u8) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.cells[y as usize * self.width as usize + x as usize]
    }

    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

impl RenderTarget for CellCanvas {
    fn clear(&mut self, width: u8, height: u8) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize(width as usize * height as usize, false);
        self.frames += 1;
    }

    fn fill_cell(&mut self, x: u8, y: u8, solid: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.cells[y as usize * self.width as usize + x as usize] = solid;
    }
}
