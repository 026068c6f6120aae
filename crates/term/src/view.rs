//! BoardView: paints a [`GameSnapshot`] into a framebuffer.
//!
//! Pure; no terminal I/O happens here.

use crate::core::{Board, GameSnapshot, PieceSnapshot};
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{Color, GamePhase};

/// Terminal size in character cells
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

const FRAME: Style = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const LABEL: Style = Style::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0));
const PANEL_GAP: u16 = 3;
/// Width of the side panel in terminal columns
const PANEL_W: u16 = 12;

pub struct BoardView {
    /// Terminal columns per board cell
    cell_w: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // Two columns per cell keeps cells roughly square
        Self { cell_w: 2 }
    }
}

impl BoardView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Render into `fb`, resizing it to the viewport
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        if fb.width() != viewport.width || fb.height() != viewport.height {
            fb.resize(viewport.width, viewport.height);
        } else {
            fb.clear();
        }

        let board = &snap.board;
        // Oversized boards are clipped by the framebuffer
        let frame_w = board.cols().saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = board.rows().saturating_add(2);
        let total_w = frame_w.saturating_add(PANEL_GAP + PANEL_W);
        let origin_x = viewport.width.saturating_sub(total_w) / 2;
        let origin_y = viewport.height.saturating_sub(frame_h) / 2;

        draw_frame(fb, origin_x, origin_y, frame_w, frame_h);

        let left = origin_x + 1;
        let top = origin_y + 1;
        self.draw_board(fb, board, left, top);
        if let Some(shadow) = &snap.shadow {
            self.draw_piece(fb, board, shadow, left, top);
        }
        if let Some(current) = &snap.current {
            self.draw_piece(fb, board, current, left, top);
        }

        let panel_x = origin_x.saturating_add(frame_w).saturating_add(PANEL_GAP);
        self.draw_panel(fb, snap, panel_x, origin_y);

        let banner = match snap.phase {
            GamePhase::Paused => Some("PAUSED"),
            GamePhase::GameOver => Some("GAME OVER"),
            _ => None,
        };
        if let Some(text) = banner {
            let w = text.len() as u16;
            let x = origin_x.saturating_add(frame_w.saturating_sub(w) / 2);
            fb.put_str(x, origin_y.saturating_add(frame_h / 2), text, LABEL.bold());
        }
    }

    /// Convenience wrapper that allocates a framebuffer
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_board(&self, fb: &mut FrameBuffer, board: &Board, left: u16, top: u16) {
        for (col, row, cell) in board.cells() {
            self.draw_cell(fb, left, top, col, row, cell.color.into(), cell.border);
        }
    }

    /// Cells above the board are clipped
    fn draw_piece(
        &self,
        fb: &mut FrameBuffer,
        board: &Board,
        piece: &PieceSnapshot,
        left: u16,
        top: u16,
    ) {
        for (col, row) in piece.cells() {
            let Some(under) = board.cell_at(col, row) else {
                continue;
            };
            let fill = Rgb::blend(piece.color, under.color.into());
            self.draw_cell(fb, left, top, col, row, fill, piece.border);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        left: u16,
        top: u16,
        col: i32,
        row: i32,
        fill: Rgb,
        border: Color,
    ) {
        let (Ok(col), Ok(row)) = (u16::try_from(col), u16::try_from(row)) else {
            return;
        };
        let style = Style::new(Rgb::blend(border, fill), fill);
        let Some(x) = col
            .checked_mul(self.cell_w)
            .and_then(|dx| left.checked_add(dx))
        else {
            return;
        };
        let Some(y) = top.checked_add(row) else {
            return;
        };
        if self.cell_w >= 2 {
            fb.set(x, y, '[', style);
            fb.set(x.saturating_add(self.cell_w - 1), y, ']', style);
            for dx in 1..self.cell_w - 1 {
                fb.set(x.saturating_add(dx), y, ' ', style);
            }
        } else {
            fb.set(x, y, '#', style);
        }
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        fb.put_str(x, y, "NEXT", LABEL.bold());
        if let Some(next) = &snap.next {
            self.draw_preview(fb, next, x, y + 1, false);
        }

        let hold_label = if snap.held_used { "HOLD (used)" } else { "HOLD" };
        fb.put_str(x, y + 6, hold_label, LABEL.bold());
        if let Some(hold) = &snap.hold {
            self.draw_preview(fb, hold, x, y + 7, snap.held_used);
        }

        fb.put_str(x, y + 12, &format!("SPEED {}", snap.drop_speed), LABEL);
        fb.put_str(x, y + 13, snap.phase.as_str(), LABEL);
    }

    /// Piece bitmap drawn at its own origin, ignoring its board position
    fn draw_preview(&self, fb: &mut FrameBuffer, piece: &PieceSnapshot, x: u16, y: u16, dim: bool) {
        let fill = if dim {
            Rgb::blend(piece.color.with_alpha(0.4), Rgb::new(0, 0, 0))
        } else {
            piece.color.into()
        };
        for (r, c) in piece.shape.filled() {
            let style = Style::new(Rgb::blend(piece.border, fill), fill);
            let cx = x.saturating_add(c as u16 * self.cell_w);
            let cy = y.saturating_add(r as u16);
            if self.cell_w >= 2 {
                fb.set(cx, cy, '[', style);
                fb.set(cx.saturating_add(self.cell_w - 1), cy, ']', style);
            } else {
                fb.set(cx, cy, '#', style);
            }
        }
    }
}

fn draw_frame(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    let right = x.saturating_add(w - 1);
    let bottom = y.saturating_add(h - 1);
    for cx in x + 1..right {
        fb.set(cx, y, '─', FRAME);
        fb.set(cx, bottom, '─', FRAME);
    }
    for cy in y + 1..bottom {
        fb.set(x, cy, '│', FRAME);
        fb.set(right, cy, '│', FRAME);
    }
    fb.set(x, y, '┌', FRAME);
    fb.set(right, y, '┐', FRAME);
    fb.set(x, bottom, '└', FRAME);
    fb.set(right, bottom, '┘', FRAME);
}
