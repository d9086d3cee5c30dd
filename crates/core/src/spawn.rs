//! Spawn module - starting layout and pending tile generation
//!
//! The starting layout deals ranks round-robin from `{1, 2, 3}`, shuffles
//! them, then drops each one on a random empty cell, preferring cells that do
//! not touch an already placed tile. Pending tiles are rank 1 (80%) or rank 2.
//!
//! The random source is injected so a seed fully determines a session.

use rand::seq::SliceRandom;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::grid::Grid;
use crate::types::{
    Rank, PENDING_RANK_ONE_PROBABILITY, START_COUNT_BY_SIZE, START_FALLBACK_MIN, START_FILL_RATIO,
    START_RANK_CYCLE,
};

/// Number of tiles seeded on a fresh `size` x `size` board
pub fn starting_count(size: usize) -> usize {
    let total = size.saturating_mul(size);
    let max = total.saturating_sub(1);
    let planned = START_COUNT_BY_SIZE
        .iter()
        .find(|(s, _)| *s == size)
        .map(|(_, count)| *count)
        .unwrap_or_else(|| {
            let by_ratio = (total as f64 * START_FILL_RATIO).round() as usize;
            by_ratio.max(START_FALLBACK_MIN).min(max)
        });
    planned.min(max).max(1)
}

/// Generates the starting layout and the stream of pending tiles.
#[derive(Debug, Clone)]
pub struct SpawnPlanner<R = Pcg32> {
    rng: R,
}

impl<R: Rng> SpawnPlanner<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Ranks for the starting layout, in placement order
    pub fn starting_ranks(&mut self, size: usize) -> Vec<Rank> {
        let mut ranks: Vec<Rank> = START_RANK_CYCLE
            .iter()
            .copied()
            .cycle()
            .take(starting_count(size))
            .collect();
        ranks.shuffle(&mut self.rng);
        ranks
    }

    /// Seed an empty grid. Returns the `(index, rank)` placements in order.
    pub fn seed_layout(&mut self, grid: &mut Grid) -> Vec<(usize, Rank)> {
        let ranks = self.starting_ranks(grid.size());
        let mut placed = Vec::with_capacity(ranks.len());

        for rank in ranks {
            let empty = grid.empty_indices();
            if empty.is_empty() {
                break;
            }

            let spread: Vec<usize> = empty
                .iter()
                .copied()
                .filter(|&cell| !placed.iter().any(|&(p, _)| grid.is_adjacent(cell, p)))
                .collect();
            let candidates = if spread.is_empty() { &empty } else { &spread };

            let index = candidates[self.rng.random_range(0..candidates.len())];
            grid.cells_mut()[index] = Some(rank);
            placed.push((index, rank));
        }

        placed
    }

    /// Fill the pending slot if it is empty. Returns the generated rank.
    pub fn next_tile(&mut self, pending: &mut Option<Rank>) -> Option<Rank> {
        if pending.is_some() {
            return None;
        }
        let rank = if self.rng.random_bool(PENDING_RANK_ONE_PROBABILITY) {
            1
        } else {
            2
        };
        *pending = Some(rank);
        Some(rank)
    }
}
