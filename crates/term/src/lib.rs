//! Terminal renderer for the merge puzzle.
//!
//! A small game-oriented rendering layer: views draw a session snapshot into a
//! framebuffer of styled glyphs, and the renderer flushes that framebuffer to
//! the terminal with full or diff redraws. No widget toolkit is involved.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_merge_core as core;
pub use tui_merge_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{tile_colors, CursorView, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
