use serde::{Deserialize, Serialize};

use crate::types::{CascadeState, Cell, Rank};

/// Read-only copy of everything the presentation layer draws.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub size: usize,
    /// Row-major cells, `size * size` long.
    pub cells: Vec<Cell>,
    pub score: u64,
    pub pending: Option<Rank>,
    pub cascade: CascadeState,
    pub game_over: bool,
    pub episode_id: u32,
    /// What moving a board tile would cost right now (`None` if unaffordable).
    pub move_cost: Option<u64>,
}

impl SessionSnapshot {
    /// Whether a Drop could currently be accepted
    pub fn playable(&self) -> bool {
        !self.game_over && self.cascade == CascadeState::Idle
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells.get(row * self.size + col).copied().flatten()
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            size: 0,
            cells: Vec::new(),
            score: 0,
            pending: None,
            cascade: CascadeState::Idle,
            game_over: false,
            episode_id: 0,
            move_cost: None,
        }
    }
}
