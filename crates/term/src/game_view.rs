//! GameView: draws a [`SessionSnapshot`] into a framebuffer.
//!
//! Pure (no I/O), so layouts can be unit-tested.

use crate::core::SessionSnapshot;
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::{CascadeState, Rank};

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

/// Front-end state that is not part of the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorView {
    pub row: usize,
    pub col: usize,
    /// Board index of a picked-up tile.
    pub held: Option<usize>,
}

const BOARD_BG: Rgb = Rgb::new(0xbb, 0xad, 0xa0);
const EMPTY_BG: Rgb = Rgb::new(0xcd, 0xc1, 0xb4);
const DARK_FONT: Rgb = Rgb::new(0x77, 0x6e, 0x65);
const LIGHT_FONT: Rgb = Rgb::new(0xf9, 0xf6, 0xf2);
const CURSOR: Rgb = Rgb::new(0xff, 0xff, 0xff);

/// Background and font colour for a tile of `rank`.
pub fn tile_colors(rank: Rank) -> (Rgb, Rgb) {
    let bg = match rank {
        1 => Rgb::new(0xee, 0xe4, 0xda),
        2 => Rgb::new(0xed, 0xe0, 0xc8),
        3 => Rgb::new(0xf2, 0xb1, 0x79),
        4 => Rgb::new(0xf5, 0x95, 0x63),
        5 => Rgb::new(0xf6, 0x7c, 0x5f),
        6 => Rgb::new(0xf6, 0x5e, 0x3b),
        7 => Rgb::new(0xed, 0xcf, 0x72),
        8 => Rgb::new(0xed, 0xcc, 0x61),
        9 => Rgb::new(0x99, 0xcc, 0x88),
        10 => Rgb::new(0x88, 0xbb, 0x77),
        11 => Rgb::new(0x77, 0xaa, 0x66),
        12 => Rgb::new(0x66, 0x99, 0x55),
        13 => Rgb::new(0xf9, 0xf6, 0xf2),
        _ => Rgb::new(0x3c, 0x3a, 0x32),
    };
    let fg = match rank {
        1 | 2 | 13 => DARK_FONT,
        _ => LIGHT_FONT,
    };
    (bg, fg)
}

/// Board renderer with configurable tile size (in terminal cells).
pub struct GameView {
    tile_w: u16,
    tile_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Terminal glyphs are roughly twice as tall as wide.
        Self::new(6, 3)
    }
}

impl GameView {
    pub fn new(tile_w: u16, tile_h: u16) -> Self {
        Self {
            tile_w: tile_w.max(3),
            tile_h: tile_h.max(1),
        }
    }

    /// Outer size of the framed board for a grid of `size`, or `None` when
    /// it does not fit in terminal coordinates.
    pub fn frame_size(&self, size: usize) -> Option<(u16, u16)> {
        let n = u16::try_from(size).ok()?;
        let w = n.checked_mul(self.tile_w)?.checked_add(2)?;
        let h = n.checked_mul(self.tile_h)?.checked_add(2)?;
        Some((w, h))
    }

    /// Render into a reused framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        cursor: &CursorView,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Glyph::default());

        let Some((frame_w, frame_h)) = self.frame_size(snap.size) else {
            fb.put_str(0, 0, "board too large", Style::default().bold());
            return;
        };
        let x0 = viewport.width.saturating_sub(frame_w.saturating_add(16)) / 2;
        let y0 = viewport.height.saturating_sub(frame_h) / 2;

        let border = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        fb.draw_box(x0, y0, frame_w, frame_h, border);
        fb.fill_rect(
            x0 + 1,
            y0 + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            Style::new(DARK_FONT, BOARD_BG),
        );

        for (index, cell) in snap.cells.iter().enumerate() {
            let (row, col) = (index / snap.size, index % snap.size);
            let held = cursor.held == Some(index);
            self.draw_tile(fb, x0, y0, row, col, *cell, held);
        }
        self.draw_cursor(fb, x0, y0, cursor);

        let panel_x = x0.saturating_add(frame_w).saturating_add(2);
        self.draw_panel(fb, snap, cursor, viewport, panel_x, y0);

        if snap.game_over {
            let text = "GAME OVER";
            let style = Style::new(CURSOR, Rgb::new(0, 0, 0)).bold();
            let mid = y0 + frame_h / 2;
            let x = x0 + frame_w.saturating_sub(text.len() as u16) / 2;
            fb.put_str(x, mid, text, style);

            let digits = digit_count(snap.score);
            let x = x0 + frame_w.saturating_sub(digits) / 2;
            fb.put_u64(x, mid + 1, snap.score, style);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, cursor: &CursorView, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    fn tile_origin(&self, x0: u16, y0: u16, row: usize, col: usize) -> (u16, u16) {
        (
            x0 + 1 + col as u16 * self.tile_w,
            y0 + 1 + row as u16 * self.tile_h,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        x0: u16,
        y0: u16,
        row: usize,
        col: usize,
        cell: Option<Rank>,
        held: bool,
    ) {
        let (x, y) = self.tile_origin(x0, y0, row, col);
        // One column of gap on each side keeps tiles visually separate.
        let (inner_x, inner_w) = (x + 1, self.tile_w - 2);

        let Some(rank) = cell else {
            fb.fill_rect(inner_x, y, inner_w, self.tile_h, ' ', Style::new(DARK_FONT, EMPTY_BG));
            return;
        };

        let (bg, fg) = tile_colors(rank);
        let mut style = Style::new(fg, bg).bold();
        if held {
            style = style.dim();
        }
        fb.fill_rect(inner_x, y, inner_w, self.tile_h, ' ', style);

        let digits = digit_count(u64::from(rank));
        let tx = inner_x + inner_w.saturating_sub(digits) / 2;
        fb.put_u64(tx, y + self.tile_h / 2, u64::from(rank), style);
    }

    fn draw_cursor(&self, fb: &mut FrameBuffer, x0: u16, y0: u16, cursor: &CursorView) {
        let (x, y) = self.tile_origin(x0, y0, cursor.row, cursor.col);
        let style = Style::new(CURSOR, BOARD_BG).bold();
        let mid = y + self.tile_h / 2;
        fb.put_char(x, mid, '[', style);
        fb.put_char(x + self.tile_w - 1, mid, ']', style);
    }

    fn draw_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        cursor: &CursorView,
        viewport: Viewport,
        x: u16,
        y0: u16,
    ) {
        if x.saturating_add(10) > viewport.width {
            return;
        }
        let label = Style::default().bold();
        let value = Style::default();
        let dim = Style::default().dim();

        let mut y = y0;
        fb.put_str(x, y, "SCORE", label);
        fb.put_u64(x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(x, y, "NEXT", label);
        match snap.pending {
            Some(rank) => {
                let (bg, fg) = tile_colors(rank);
                let style = Style::new(fg, bg).bold();
                fb.put_str(x, y + 1, "   ", style);
                fb.put_u64(x + 1, y + 1, u64::from(rank), style);
            }
            None => {
                fb.put_str(x, y + 1, "-", dim);
            }
        }
        y += 3;

        fb.put_str(x, y, "MOVE", label);
        match snap.move_cost {
            Some(cost) => {
                let end = fb.put_str(x, y + 1, "-", value);
                fb.put_u64(end, y + 1, cost, value);
            }
            None => {
                fb.put_str(x, y + 1, "locked", dim);
            }
        }
        y += 3;

        if cursor.held.is_some() {
            fb.put_str(x, y, "HOLDING", label.dim());
            y += 2;
        }
        if snap.cascade == CascadeState::Resolving {
            fb.put_str(x, y, "merging...", dim);
        }
    }
}

fn digit_count(mut n: u64) -> u16 {
    let mut d = 1;
    while n >= 10 {
        n /= 10;
        d += 1;
    }
    d
}
