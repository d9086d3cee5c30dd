//! Placement module - Drop intent validation and the single placement mutation
//!
//! A Drop either places the pending tile (free) or relocates a board tile
//! (costs `score / 3`, needs a score of at least 3). Validation never mutates;
//! [`apply`] performs the mutation only for a plan that passed [`validate`].

use crate::error::{GameError, Result};
use crate::grid::Grid;
use crate::scoring::{move_cost, ScoreLedger};
use crate::types::{DropSource, Rank, RejectReason};

/// Read-only view of the session state a Drop is judged against.
#[derive(Debug, Clone, Copy)]
pub struct PlacementContext<'a> {
    pub grid: &'a Grid,
    pub score: u64,
    pub pending: Option<Rank>,
    pub resolving: bool,
    pub game_over: bool,
}

/// A validated Drop, ready to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub source: DropSource,
    pub target: usize,
    pub rank: Rank,
    /// Score debit; 0 for pending placements.
    pub cost: u64,
}

/// Contract check: every index named by the intent must be on the board.
pub fn check_bounds(grid: &Grid, source: DropSource, target: usize) -> Result<()> {
    for index in [Some(target), source.grid_index()].into_iter().flatten() {
        if !grid.contains(index) {
            return Err(GameError::IndexOutOfRange {
                index,
                len: grid.len(),
            });
        }
    }
    Ok(())
}

/// Judge a Drop intent. Indices must already have passed [`check_bounds`].
pub fn validate(
    ctx: &PlacementContext<'_>,
    source: DropSource,
    target: usize,
) -> std::result::Result<Placement, RejectReason> {
    if ctx.game_over {
        return Err(RejectReason::GameOver);
    }
    if ctx.resolving {
        return Err(RejectReason::CascadeInProgress);
    }
    let target_empty = ctx.grid.is_empty_cell(target).unwrap_or(false);
    if !target_empty || source.grid_index() == Some(target) {
        return Err(RejectReason::OccupiedTarget);
    }

    match source {
        DropSource::Pending => {
            let rank = ctx.pending.ok_or(RejectReason::EmptySource)?;
            Ok(Placement {
                source,
                target,
                rank,
                cost: 0,
            })
        }
        DropSource::Grid(from) => {
            let rank = ctx
                .grid
                .cells()
                .get(from)
                .copied()
                .flatten()
                .ok_or(RejectReason::EmptySource)?;
            let cost = move_cost(ctx.score).ok_or(RejectReason::InsufficientScore)?;
            Ok(Placement {
                source,
                target,
                rank,
                cost,
            })
        }
    }
}

/// Apply a validated placement. Returns the anchor cell for the cascade.
pub fn apply(
    placement: &Placement,
    grid: &mut Grid,
    ledger: &mut ScoreLedger,
    pending: &mut Option<Rank>,
) -> Result<usize> {
    match placement.source {
        DropSource::Pending => {
            *pending = None;
        }
        DropSource::Grid(from) => {
            grid.set(from, None)?;
            // validate() priced the move from this same ledger
            let paid = ledger.debit(placement.cost);
            debug_assert!(paid, "move cost exceeded score");
        }
    }
    grid.set(placement.target, Some(placement.rank))?;
    Ok(placement.target)
}
