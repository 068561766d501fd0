//! GameView: maps the engine's painted canvas and HUD values into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{CellCanvas, EngineSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{EnginePhase, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Numbers and state shown next to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudView {
    pub phase: EnginePhase,
    pub score: u32,
    pub rows_cleared: u32,
    pub pieces_locked: u32,
}

impl From<&EngineSnapshot> for HudView {
    fn from(snap: &EngineSnapshot) -> Self {
        Self {
            phase: snap.phase,
            score: snap.score,
            rows_cleared: snap.rows_cleared,
            pieces_locked: snap.pieces_locked,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is only resized
    /// when the viewport changes.
    pub fn render_into(
        &self,
        canvas: &CellCanvas,
        hud: &HudView,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                if canvas.is_solid(x, y) {
                    self.draw_solid_cell(fb, start_x, start_y, x as u16, y as u16);
                } else {
                    self.draw_empty_cell(fb, start_x, start_y, x as u16, y as u16);
                }
            }
        }

        self.draw_side_panel(fb, hud, viewport, start_x, start_y, frame_w);

        match hud.phase {
            EnginePhase::Idle => {
                self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "PRESS ENTER")
            }
            EnginePhase::GameOver => {
                self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER")
            }
            EnginePhase::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, canvas: &CellCanvas, hud: &HudView, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(canvas, hud, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16) {
        let style = CellStyle {
            fg: Rgb::new(90, 90, 100),
            bg: PLAYFIELD_BG,
            bold: false,
            dim: true,
        };
        self.fill_cell_rect(fb, start_x, start_y, x, y, '·', style);
    }

    fn draw_solid_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16) {
        let style = CellStyle {
            fg: Rgb::new(170, 170, 170),
            bg: PLAYFIELD_BG,
            bold: true,
            dim: false,
        };
        self.fill_cell_rect(fb, start_x, start_y, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        hud: &HudView,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };
        let dim = CellStyle { dim: true, ..value };

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, hud.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "ROWS", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, hud.rows_cleared, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "PIECES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, hud.pieces_locked, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "KEYS", label);
        y = y.saturating_add(1);
        for line in [
            "←→  move",
            "↓   down",
            "↑   rotate",
            "spc drop",
            "ent start",
            "q   quit",
        ] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, dim);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        fb.put_str(x, mid_y, text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RenderTarget;

    #[test]
    fn top_anchor_places_frame_at_row_zero() {
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let fb = view.render(&CellCanvas::new(), &HudView::default(), Viewport::new(22, 40));
        assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    }

    #[test]
    fn custom_cell_size_scales_board() {
        let mut canvas = CellCanvas::new();
        canvas.clear(BOARD_WIDTH, BOARD_HEIGHT);
        canvas.fill_cell(0, 0, true);

        let view = GameView::new(3, 1).with_anchor_y(AnchorY::Top);
        let hud = HudView {
            phase: EnginePhase::Running,
            ..HudView::default()
        };
        let fb = view.render(&canvas, &hud, Viewport::new(32, 22));
        assert_eq!(fb.get(1, 1).unwrap().ch, '█');
        assert_eq!(fb.get(3, 1).unwrap().ch, '█');
        assert_eq!(fb.get(4, 1).unwrap().ch, '·');
        assert_eq!(fb.get(31, 0).unwrap().ch, '┐');
    }

    #[test]
    fn running_phase_has_no_overlay() {
        let view = GameView::default();
        let hud = HudView {
            phase: EnginePhase::Running,
            ..HudView::default()
        };
        let fb = view.render(&CellCanvas::new(), &hud, Viewport::new(22, 22));
        let all: String = (0..fb.height()).map(|y| fb.row_string(y)).collect();
        assert!(!all.contains("GAME OVER"));
        assert!(!all.contains("PRESS ENTER"));
    }
}
