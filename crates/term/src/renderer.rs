//! TerminalRenderer: flushes framebuffers to the real terminal.
//!
//! The first frame (and any frame after a resize or `invalidate`) is a full
//! redraw; later frames only rewrite runs of glyphs that changed.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Glyph, Rgb, Style};

pub struct TerminalRenderer {
    out: io::Stdout,
    /// Last frame shown on screen; `None` forces a full redraw.
    shown: Option<FrameBuffer>,
    scratch: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            shown: None,
            scratch: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.scratch.clear();
        self.scratch.queue(terminal::EnterAlternateScreen)?;
        self.scratch.queue(cursor::Hide)?;
        self.scratch.queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    /// Undo everything `enter` did.
    pub fn exit(&mut self) -> Result<()> {
        self.scratch.clear();
        self.scratch.queue(ResetColor)?;
        self.scratch.queue(SetAttribute(Attribute::Reset))?;
        self.scratch.queue(terminal::EnableLineWrap)?;
        self.scratch.queue(cursor::Show)?;
        self.scratch.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Show `frame`, then swap it with the previously shown buffer so the
    /// caller can draw the next frame into recycled storage.
    pub fn draw_swap(&mut self, frame: &mut FrameBuffer) -> Result<()> {
        self.scratch.clear();
        match self.shown.take() {
            Some(mut prev) if prev.width() == frame.width() && prev.height() == frame.height() => {
                encode_diff_into(&prev, frame, &mut self.scratch)?;
                self.flush()?;
                std::mem::swap(&mut prev, frame);
                self.shown = Some(prev);
            }
            _ => {
                encode_full_into(frame, &mut self.scratch)?;
                self.flush()?;
                self.shown = Some(frame.clone());
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.write_all(&self.scratch)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Encode a whole frame as terminal commands.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::default();
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for glyph in fb.row(y) {
            pen.print(out, *glyph)?;
        }
    }
    reset_into(out)
}

/// Encode only the glyph runs that differ between `prev` and `next`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    for y in 0..next.height() {
        let row = next.row(y);
        for (start, end) in changed_runs(prev.row(y), row) {
            out.queue(cursor::MoveTo(start as u16, y))?;
            for glyph in &row[start..end] {
                pen.print(out, *glyph)?;
            }
        }
    }
    reset_into(out)
}

/// Tracks the active style so consecutive glyphs skip redundant SGR codes.
#[derive(Default)]
struct Pen {
    style: Option<Style>,
}

impl Pen {
    fn print(&mut self, out: &mut Vec<u8>, glyph: Glyph) -> Result<()> {
        if self.style != Some(glyph.style) {
            let s = glyph.style;
            out.queue(SetAttribute(Attribute::Reset))?;
            out.queue(SetForegroundColor(color(s.fg)))?;
            out.queue(SetBackgroundColor(color(s.bg)))?;
            if s.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if s.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.style = Some(s);
        }
        out.queue(Print(glyph.ch))?;
        Ok(())
    }
}

fn reset_into(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Half-open `[start, end)` column ranges where two equally wide rows differ.
fn changed_runs<'a>(prev: &'a [Glyph], next: &'a [Glyph]) -> impl Iterator<Item = (usize, usize)> + 'a {
    let mut x = 0;
    std::iter::from_fn(move || {
        while x < next.len() && prev.get(x) == Some(&next[x]) {
            x += 1;
        }
        if x >= next.len() {
            return None;
        }
        let start = x;
        while x < next.len() && prev.get(x) != Some(&next[x]) {
            x += 1;
        }
        Some((start, x))
    })
}
