//! Keyboard stand-in for drag-and-drop.
//!
//! A cursor walks the grid. Placing drops the pending tile on the cursor cell;
//! picking up a board tile "holds" it until the next place (a paid move) or a
//! cancel (an aborted drag, reported as a miss). Tiles can only be picked up
//! while a move is affordable.

use crate::types::{Cell, DropSource, UiAction};

/// What the session should do in response to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Drop { source: DropSource, target: usize },
    Miss,
    Restart,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorController {
    size: usize,
    row: usize,
    col: usize,
    held: Option<usize>,
}

impl CursorController {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            row: 0,
            col: 0,
            held: None,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Cursor position as `(row, col)`
    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Flat index of the cursor cell
    pub fn index(&self) -> usize {
        self.row * self.size + self.col
    }

    /// Board index of the tile being held, if any
    pub fn held(&self) -> Option<usize> {
        self.held
    }

    /// Center the cursor and drop any held tile.
    pub fn reset(&mut self, size: usize) {
        self.size = size;
        self.row = size / 2;
        self.col = size / 2;
        self.held = None;
    }

    /// Apply one action against the current cells and move price. Cursor
    /// moves stop at the board edge.
    pub fn apply(
        &mut self,
        action: UiAction,
        cells: &[Cell],
        move_cost: Option<u64>,
    ) -> Option<Intent> {
        let last = self.size.saturating_sub(1);
        match action {
            UiAction::CursorUp => {
                self.row = self.row.saturating_sub(1);
                None
            }
            UiAction::CursorDown => {
                self.row = (self.row + 1).min(last);
                None
            }
            UiAction::CursorLeft => {
                self.col = self.col.saturating_sub(1);
                None
            }
            UiAction::CursorRight => {
                self.col = (self.col + 1).min(last);
                None
            }
            UiAction::PlacePending => {
                let source = match self.held.take() {
                    Some(from) => DropSource::Grid(from),
                    None => DropSource::Pending,
                };
                Some(Intent::Drop {
                    source,
                    target: self.index(),
                })
            }
            UiAction::PickUp => {
                let here = self.index();
                if self.held == Some(here) {
                    self.held = None;
                    return Some(Intent::Miss);
                }
                let occupied = cells.get(here).copied().flatten().is_some();
                if occupied && move_cost.is_some() {
                    self.held = Some(here);
                    None
                } else {
                    Some(Intent::Miss)
                }
            }
            UiAction::Cancel => self.held.take().map(|_| Intent::Miss),
            UiAction::Restart => {
                self.held = None;
                Some(Intent::Restart)
            }
        }
    }
}
