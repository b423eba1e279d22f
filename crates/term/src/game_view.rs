//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_COLS, BOARD_ROWS};

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

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

const CONTROLS: [(&str, &str); 5] = [
    ("← →", "move"),
    ("↑", "rotate"),
    ("↓", "drop"),
    ("r", "restart"),
    ("q", "quit"),
];

/// Draws the display grid inside a border, centred in the viewport, with a
/// controls panel to its right when there is room.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Outer size of the bordered playfield.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_COLS as u16 * self.cell_w + 2,
            BOARD_ROWS as u16 * self.cell_h + 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let (frame_w, frame_h) = self.frame_size();
        let origin_x = viewport.width.saturating_sub(frame_w) / 2;
        let origin_y = viewport.height.saturating_sub(frame_h) / 2;

        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        draw_border(fb, origin_x, origin_y, frame_w, frame_h, border);

        for (row, cells) in snap.board.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let (r, c) = (row as i8, col as i8);
                let (ch, style) = match cell {
                    Some(kind) => {
                        let style = CellStyle::new(piece_color(*kind), PLAYFIELD_BG);
                        let is_active = snap.active.is_some_and(|a| a.covers(r, c));
                        ('█', if is_active { style.bold() } else { style })
                    }
                    None => ('·', CellStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim()),
                };
                let px = origin_x + 1 + col as u16 * self.cell_w;
                let py = origin_y + 1 + row as u16 * self.cell_h;
                fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
            }
        }

        self.draw_panel(fb, snap, viewport, origin_x + frame_w + 2, origin_y);

        if snap.game_over {
            let text = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
            let mid = origin_y + frame_h / 2;
            draw_centered(fb, origin_x, frame_w, mid, "GAME OVER", text);
            draw_centered(fb, origin_x, frame_w, mid + 1, "r to restart", text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        x: u16,
        y: u16,
    ) {
        if x.saturating_add(14) > viewport.width {
            return;
        }
        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        fb.put_str(x, y, "PIECES", label);
        fb.put_str(x, y + 1, &snap.pieces_locked.to_string(), value);

        if let Some(active) = snap.active {
            fb.put_str(x, y + 3, "FALLING", label);
            fb.put_str(x, y + 4, active.kind.as_str(), value);
        }

        fb.put_str(x, y + 6, "KEYS", label);
        for (i, (key, what)) in CONTROLS.iter().enumerate() {
            let ly = y + 7 + i as u16;
            fb.put_str(x, ly, key, value);
            fb.put_str(x + 5, ly, what, value.dim());
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }
    let (right, bottom) = (x + w - 1, y + h - 1);
    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for dx in x + 1..right {
        fb.put_char(dx, y, '─', style);
        fb.put_char(dx, bottom, '─', style);
    }
    for dy in y + 1..bottom {
        fb.put_char(x, dy, '│', style);
        fb.put_char(right, dy, '│', style);
    }
}

fn draw_centered(fb: &mut FrameBuffer, x: u16, w: u16, y: u16, text: &str, style: CellStyle) {
    let text_w = text.chars().count() as u16;
    fb.put_str(x + w.saturating_sub(text_w) / 2, y, text, style);
}

pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::Z => Rgb::new(220, 80, 80),
    }
}
