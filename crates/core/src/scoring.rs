//! Scoring module - merge credits, move costs, and the score ledger
//!
//! - A pair merge credits the sum of the merged ranks.
//! - A merge of three or more tiles credits `sum * (size - 1)`.
//! - Moving an existing tile costs `score / 3` and needs a score of at least 3,
//!   so the ledger can never go negative.

use crate::types::{MIN_SCORE_TO_MOVE, MOVE_COST_DIVISOR};

/// Credit for collapsing a component of `size` tiles whose ranks sum to `sum`
pub fn merge_credit(sum: u64, size: usize) -> u64 {
    match size {
        0 | 1 => 0,
        2 => sum,
        n => sum.saturating_mul(n as u64 - 1),
    }
}

/// Cost of moving a board tile at the given score, or `None` if unaffordable
pub fn move_cost(score: u64) -> Option<u64> {
    if score < MIN_SCORE_TO_MOVE {
        return None;
    }
    Some(score / MOVE_COST_DIVISOR)
}

/// The single score accumulator of a session.
///
/// Only the merge resolver credits and only the placement validator debits;
/// everything else reads through [`ScoreLedger::score`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreLedger {
    score: u64,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub(crate) fn credit(&mut self, amount: u64) {
        self.score = self.score.saturating_add(amount);
    }

    /// Subtract `amount`. Refuses (returns false) rather than go below zero.
    pub(crate) fn debit(&mut self, amount: u64) -> bool {
        match self.score.checked_sub(amount) {
            Some(left) => {
                self.score = left;
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_score(score: u64) -> Self {
        Self { score }
    }
}
