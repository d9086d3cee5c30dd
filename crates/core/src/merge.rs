//! Merge module - component search and cascade passes
//!
//! A pass partitions every occupied cell into maximal 4-connected groups of
//! equal rank, computed from the grid as it stood when the pass started. Each
//! group of two or more collapses into one tile of the next rank; all other
//! members are cleared. Passes repeat until one finds nothing to merge.
//!
//! Collapse target: the anchor (the cell the player just dropped on) when it
//! belongs to the group, else the group's smallest index.

use log::trace;

use crate::grid::Grid;
use crate::scoring::{merge_credit, ScoreLedger};
use crate::types::{CascadeState, Rank};

/// A maximal same-rank connected group. `members` is sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub rank: Rank,
    pub members: Vec<usize>,
}

impl Component {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether this group collapses (size >= 2)
    pub fn qualifies(&self) -> bool {
        self.members.len() >= 2
    }

    pub fn rank_sum(&self) -> u64 {
        u64::from(self.rank) * self.members.len() as u64
    }

    pub fn collapse_target(&self, anchor: Option<usize>) -> usize {
        match anchor {
            Some(a) if self.members.binary_search(&a).is_ok() => a,
            _ => self.members[0],
        }
    }
}

/// One collapsed component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merge {
    pub members: Vec<usize>,
    pub target: usize,
    pub new_rank: Rank,
    pub credit: u64,
}

/// Everything a single pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassOutcome {
    pub merges: Vec<Merge>,
    pub credit: u64,
}

impl PassOutcome {
    pub fn is_stable(&self) -> bool {
        self.merges.is_empty()
    }
}

/// Partition all occupied cells into components.
///
/// Index-based BFS over the flat cell array: `visited` is a bitmap and the
/// queue is a vector walked with a head cursor. Components come out ordered by
/// their smallest member.
pub fn find_components(grid: &Grid) -> Vec<Component> {
    let cells = grid.cells();
    let mut visited = vec![false; cells.len()];
    let mut queue: Vec<usize> = Vec::with_capacity(cells.len());
    let mut out = Vec::new();

    for start in 0..cells.len() {
        let Some(rank) = cells[start] else {
            continue;
        };
        if visited[start] {
            continue;
        }

        queue.clear();
        queue.push(start);
        visited[start] = true;
        let mut head = 0;

        while head < queue.len() {
            let current = queue[head];
            head += 1;
            let (row, col) = grid.position(current);
            let size = grid.size();
            let mut visit = |n: usize| {
                if !visited[n] && cells[n] == Some(rank) {
                    visited[n] = true;
                    queue.push(n);
                }
            };
            if row > 0 {
                visit(current - size);
            }
            if row + 1 < size {
                visit(current + size);
            }
            if col > 0 {
                visit(current - 1);
            }
            if col + 1 < size {
                visit(current + 1);
            }
        }

        let mut members = queue.clone();
        members.sort_unstable();
        out.push(Component { rank, members });
    }

    out
}

/// Components that will collapse in the next pass.
pub fn mergeable_components(grid: &Grid) -> Vec<Component> {
    find_components(grid)
        .into_iter()
        .filter(Component::qualifies)
        .collect()
}

/// Run one pass against `grid`, crediting `ledger`.
///
/// All components are found before any cell changes, so the collapses of one
/// pass never see each other.
pub fn resolve_pass(grid: &mut Grid, anchor: Option<usize>, ledger: &mut ScoreLedger) -> PassOutcome {
    let groups = mergeable_components(grid);
    let mut outcome = PassOutcome::default();

    for group in groups {
        let target = group.collapse_target(anchor);
        let new_rank = group.rank + 1;
        let credit = merge_credit(group.rank_sum(), group.len());

        let cells = grid.cells_mut();
        for &member in &group.members {
            cells[member] = None;
        }
        cells[target] = Some(new_rank);

        ledger.credit(credit);
        outcome.credit += credit;
        outcome.merges.push(Merge {
            members: group.members,
            target,
            new_rank,
            credit,
        });
    }

    outcome
}

/// Cascade state machine: `Idle` until triggered, `Resolving` until a pass
/// comes back stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeResolver {
    state: CascadeState,
    anchor: Option<usize>,
    pass: u32,
}

impl MergeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CascadeState {
        self.state
    }

    pub fn is_resolving(&self) -> bool {
        self.state == CascadeState::Resolving
    }

    /// Passes completed in the current (or last) cascade
    pub fn passes(&self) -> u32 {
        self.pass
    }

    /// Start a cascade anchored at the cell that was just filled.
    pub fn trigger(&mut self, anchor: usize) {
        self.state = CascadeState::Resolving;
        self.anchor = Some(anchor);
        self.pass = 0;
    }

    /// Resolve exactly one pass. Returns `None` when not resolving.
    ///
    /// The anchor only steers the first pass; follow-up passes collapse onto
    /// the smallest member. A stable pass leaves the state `Resolving` until
    /// [`MergeResolver::finish`] so the caller can run its settle hooks first.
    pub fn step(&mut self, grid: &mut Grid, ledger: &mut ScoreLedger) -> Option<PassOutcome> {
        if !self.is_resolving() {
            return None;
        }
        let outcome = resolve_pass(grid, self.anchor.take(), ledger);
        if !outcome.is_stable() {
            self.pass += 1;
            trace!(
                "pass {}: {} merge(s), +{}",
                self.pass,
                outcome.merges.len(),
                outcome.credit
            );
        }
        Some(outcome)
    }

    pub fn finish(&mut self) {
        self.state = CascadeState::Idle;
        self.anchor = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
