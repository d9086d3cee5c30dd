//! Terminal-state detection.

use crate::grid::Grid;
use crate::types::GameEvent;

pub struct GameOverDetector;

impl GameOverDetector {
    /// The game ends when no empty cell is left.
    pub fn is_over(grid: &Grid) -> bool {
        grid.is_full()
    }

    /// Re-evaluate after a cascade settles. Emits `GameOver` only on the
    /// transition; an already terminal session stays terminal.
    pub fn evaluate(grid: &Grid, score: u64, terminal: &mut bool) -> Option<GameEvent> {
        if *terminal || !Self::is_over(grid) {
            return None;
        }
        *terminal = true;
        Some(GameEvent::GameOver { final_score: score })
    }
}
