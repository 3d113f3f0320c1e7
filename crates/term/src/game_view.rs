//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested. Rendering into a reused
//! framebuffer does not allocate.

use crate::core::{get_shape, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

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

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

/// Board, border and HUD layout
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares a cell in most terminal fonts.
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

    /// Width and height of the bordered board in terminal cells
    pub fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Render a snapshot into an existing framebuffer.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        if snap.game_over {
            self.draw_game_over(fb, snap, viewport);
            return;
        }

        let (frame_w, frame_h) = self.frame_size();
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            CellStyle::plain(Rgb::new(80, 80, 90), PLAY_BG),
        );
        draw_border(
            fb,
            start_x,
            start_y,
            frame_w,
            frame_h,
            CellStyle::plain(Rgb::new(200, 200, 200), SCREEN_BG),
        );

        for (y, row) in snap.board.iter().enumerate() {
            for (x, &id) in row.iter().enumerate() {
                match PieceKind::from_color_id(id) {
                    Some(kind) => {
                        self.draw_block(fb, start_x, start_y, x as u16, y as u16, kind)
                    }
                    None => self.fill_cell_rect(
                        fb,
                        start_x,
                        start_y,
                        x as u16,
                        y as u16,
                        '·',
                        CellStyle::plain(Rgb::new(90, 90, 100), PLAY_BG).dim(),
                    ),
                }
            }
        }

        if let Some(active) = snap.active {
            for &(dx, dy) in get_shape(active.kind, active.rotation).iter() {
                let x = active.x + dx;
                let y = active.y + dy;
                if (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y) {
                    self.draw_block(fb, start_x, start_y, x as u16, y as u16, active.kind);
                }
            }
        }

        self.draw_hud(fb, snap, viewport, start_x + frame_w + 2, start_y);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_block(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        kind: PieceKind,
    ) {
        let style = CellStyle::plain(piece_color(kind), PLAY_BG).bold();
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

    fn draw_hud(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x.saturating_add(10) > viewport.width {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::plain(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = start_y;
        let mut field = |fb: &mut FrameBuffer, name: &str, n: u32| {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y += 3;
        };
        field(fb, "SCORE", snap.score);
        field(fb, "PERIOD", snap.period);
        field(fb, "LINES", snap.lines);
        field(fb, "PIECES", snap.pieces);

        fb.put_str(panel_x, y, "DIR", label);
        if let Some(active) = snap.active {
            fb.put_char(panel_x, y + 1, active.direction.arrow(), value);
            fb.put_str(panel_x + 2, y + 1, active.direction.as_str(), value);
            fb.put_str(panel_x, y + 3, "PIECE", label);
            fb.put_str(panel_x, y + 4, active.kind.as_str(), value);
        } else {
            fb.put_char(panel_x, y + 1, '-', value);
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport) {
        let title = CellStyle::plain(Rgb::new(255, 255, 255), SCREEN_BG).bold();
        let value = CellStyle::plain(Rgb::new(240, 220, 80), SCREEN_BG).bold();
        let hint = CellStyle::default().dim();

        let mid_y = viewport.height / 2;
        let top = mid_y.saturating_sub(2);
        put_centered(fb, viewport, top, "GAME OVER", title);
        put_centered(fb, viewport, top + 2, "FINAL SCORE", CellStyle::default());

        let digits = digit_count(snap.score);
        let x = viewport.width.saturating_sub(digits) / 2;
        fb.put_u32(x, top + 3, snap.score, value);

        put_centered(fb, viewport, top + 5, "SPACE TO PLAY AGAIN  Q TO QUIT", hint);
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

fn put_centered(fb: &mut FrameBuffer, viewport: Viewport, y: u16, text: &str, style: CellStyle) {
    let w = text.chars().count() as u16;
    fb.put_str(viewport.width.saturating_sub(w) / 2, y, text, style);
}

fn digit_count(mut n: u32) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

/// Display color per color id
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_count_matches_decimal_width() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(899_999), 6);
        assert_eq!(digit_count(u32::MAX), 10);
    }

    #[test]
    fn every_kind_has_a_distinct_color() {
        for a in PieceKind::ALL {
            for b in PieceKind::ALL {
                if a != b {
                    assert_ne!(piece_color(a), piece_color(b));
                }
            }
        }
    }

    #[test]
    fn frame_includes_one_cell_border() {
        assert_eq!(GameView::default().frame_size(), (42, 22));
        assert_eq!(GameView::new(1, 1).frame_size(), (22, 22));
    }
}
