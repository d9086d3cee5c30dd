use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::grid::cell_count;
use crate::types::DEFAULT_GRID_SIZE;

/// Parameters fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Board side length; the board has `size * size` cells.
    pub size: usize,
    /// Seed for the layout and pending-tile RNG.
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            seed: 1,
        }
    }
}

impl SessionConfig {
    pub fn new(size: usize, seed: u64) -> Self {
        Self { size, seed }
    }

    pub fn validate(&self) -> Result<()> {
        cell_count(self.size)
            .map(|_| ())
            .ok_or(GameError::Configuration { size: self.size })
    }
}
