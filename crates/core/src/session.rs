//! Session module - owns and drives one game
//!
//! This module ties together all core components: grid, spawn planner,
//! placement validator, merge resolver, score ledger and game-over detector.
//! Every mutation enters through a Drop intent; a cascade always runs to a
//! stable grid before `drop_tile` returns.
//!
//! For animated front-ends the cascade can instead be driven one pass at a
//! time with [`Session::begin_drop`] and [`Session::step`]. The final grid and
//! score do not depend on how the cascade is stepped.
//!
//! A multi-threaded host must hold a single lock around each
//! `drop_tile`/`begin_drop`..`step` sequence.

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::SessionConfig;
use crate::error::Result;
use crate::game_over::GameOverDetector;
use crate::grid::Grid;
use crate::merge::{MergeResolver, PassOutcome};
use crate::placement::{self, PlacementContext};
use crate::scoring::{move_cost, ScoreLedger};
use crate::snapshot::SessionSnapshot;
use crate::spawn::SpawnPlanner;
use crate::types::{CascadeState, DropSource, GameEvent, Rank, RejectReason};

/// Result of a Drop intent that named valid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The tile was placed; `cost` was debited before any merge credit.
    Accepted { cost: u64 },
    /// Nothing changed.
    Rejected(RejectReason),
}

impl DropOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, DropOutcome::Accepted { .. })
    }

    pub fn rejection(&self) -> Option<RejectReason> {
        match self {
            DropOutcome::Accepted { .. } => None,
            DropOutcome::Rejected(reason) => Some(*reason),
        }
    }
}

/// Result of resolving a single cascade pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// No cascade was running.
    Idle,
    /// The pass merged at least one component; more passes follow.
    Merged(PassOutcome),
    /// The pass found nothing to merge; the session is `Idle` again.
    Settled,
}

/// Totals of a cascade run to completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeSummary {
    pub passes: u32,
    pub merges: u32,
    pub credit: u64,
}

/// One game, from `new` to game over (and beyond, via `restart`).
#[derive(Debug, Clone)]
pub struct Session<R = Pcg32> {
    grid: Grid,
    ledger: ScoreLedger,
    pending: Option<Rank>,
    resolver: MergeResolver,
    spawner: SpawnPlanner<R>,
    game_over: bool,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Buffered events (consumed by observers).
    events: Vec<GameEvent>,
}

impl Session<Pcg32> {
    /// Create a seeded session
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Self::with_rng(config.size, Pcg32::seed_from_u64(config.seed))
    }
}

impl<R: Rng> Session<R> {
    /// Create a session drawing layout and pending tiles from `rng`
    pub fn with_rng(size: usize, rng: R) -> Result<Self> {
        let mut session = Self {
            grid: Grid::new(size)?,
            ledger: ScoreLedger::new(),
            pending: None,
            resolver: MergeResolver::new(),
            spawner: SpawnPlanner::new(rng),
            game_over: false,
            episode_id: 0,
            events: Vec::new(),
        };
        session.init_board();
        Ok(session)
    }

    /// Start from a prepared position instead of a random layout.
    ///
    /// Used for puzzles, tests and benchmarks. The board is taken as is (no
    /// cascade runs); a full board is immediately terminal.
    pub fn with_board(grid: Grid, score: u64, pending: Option<Rank>, rng: R) -> Self {
        let mut session = Self {
            grid,
            ledger: ScoreLedger::new(),
            pending,
            resolver: MergeResolver::new(),
            spawner: SpawnPlanner::new(rng),
            game_over: false,
            episode_id: 0,
            events: Vec::new(),
        };
        session.ledger.credit(score);
        if let Some(rank) = session.spawner.next_tile(&mut session.pending) {
            session.events.push(GameEvent::PendingGenerated { rank });
        }
        if let Some(ev) =
            GameOverDetector::evaluate(&session.grid, session.ledger.score(), &mut session.game_over)
        {
            session.events.push(ev);
        }
        session
    }

    fn init_board(&mut self) {
        self.grid.clear();
        self.ledger = ScoreLedger::new();
        self.pending = None;
        self.resolver.reset();
        self.game_over = false;

        for (index, rank) in self.spawner.seed_layout(&mut self.grid) {
            self.events.push(GameEvent::TileSpawned { index, rank });
        }
        if let Some(rank) = self.spawner.next_tile(&mut self.pending) {
            self.events.push(GameEvent::PendingGenerated { rank });
        }

        info!(
            "new {}x{} board (episode {}), {} starting tiles",
            self.grid.size(),
            self.grid.size(),
            self.episode_id,
            self.grid.occupied_count()
        );
    }

    /// Discard the current game and deal a new one of the same size.
    ///
    /// The random stream continues, so a seeded run stays reproducible across
    /// restarts.
    pub fn restart(&mut self) {
        self.episode_id = self.episode_id.wrapping_add(1);
        self.events.clear();
        self.init_board();
    }

    /// Place a tile and resolve the resulting cascade to completion.
    ///
    /// Out-of-range indices are contract errors (`Err`); every other refusal
    /// is `Ok(DropOutcome::Rejected(_))`. Neither mutates the session.
    pub fn drop_tile(&mut self, source: DropSource, target: usize) -> Result<DropOutcome> {
        let outcome = self.begin_drop(source, target)?;
        if outcome.is_accepted() {
            self.resolve_cascade();
        }
        Ok(outcome)
    }

    /// Validate and apply a placement, leaving the cascade to [`Session::step`].
    ///
    /// Until the cascade settles the session reports `Resolving` and rejects
    /// further drops with `cascade-in-progress`.
    pub fn begin_drop(&mut self, source: DropSource, target: usize) -> Result<DropOutcome> {
        placement::check_bounds(&self.grid, source, target)?;

        let ctx = PlacementContext {
            grid: &self.grid,
            score: self.ledger.score(),
            pending: self.pending,
            resolving: self.resolver.is_resolving(),
            game_over: self.game_over,
        };
        let plan = match placement::validate(&ctx, source, target) {
            Ok(plan) => plan,
            Err(reason) => {
                debug!("drop {:?} -> {} rejected: {}", source, target, reason.as_str());
                self.events.push(GameEvent::MoveRejected { reason });
                return Ok(DropOutcome::Rejected(reason));
            }
        };

        let anchor = placement::apply(&plan, &mut self.grid, &mut self.ledger, &mut self.pending)?;
        match source {
            DropSource::Pending => {
                self.events.push(GameEvent::TileSpawned {
                    index: target,
                    rank: plan.rank,
                });
                if let Some(rank) = self.spawner.next_tile(&mut self.pending) {
                    self.events.push(GameEvent::PendingGenerated { rank });
                }
            }
            DropSource::Grid(from) => {
                self.events.push(GameEvent::TileMoved {
                    from,
                    to: target,
                    rank: plan.rank,
                    cost: plan.cost,
                });
            }
        }
        debug!(
            "drop {:?} -> {} accepted (rank {}, cost {})",
            source, target, plan.rank, plan.cost
        );

        self.resolver.trigger(anchor);
        Ok(DropOutcome::Accepted { cost: plan.cost })
    }

    /// Resolve exactly one cascade pass.
    pub fn step(&mut self) -> StepOutcome {
        let Some(pass) = self.resolver.step(&mut self.grid, &mut self.ledger) else {
            return StepOutcome::Idle;
        };

        if pass.is_stable() {
            self.settle();
            return StepOutcome::Settled;
        }

        for merge in &pass.merges {
            self.events.push(GameEvent::TilesMerged {
                members: merge.members.clone(),
                target: merge.target,
                new_rank: merge.new_rank,
                credit: merge.credit,
            });
        }
        self.events.push(GameEvent::PassResolved {
            pass: self.resolver.passes(),
            merges: pass.merges.len() as u32,
            credit: pass.credit,
        });
        StepOutcome::Merged(pass)
    }

    /// Step until the grid is stable.
    pub fn resolve_cascade(&mut self) -> CascadeSummary {
        let mut summary = CascadeSummary::default();
        while let StepOutcome::Merged(pass) = self.step() {
            summary.passes += 1;
            summary.merges += pass.merges.len() as u32;
            summary.credit += pass.credit;
        }
        summary
    }

    fn settle(&mut self) {
        if let Some(rank) = self.spawner.next_tile(&mut self.pending) {
            self.events.push(GameEvent::PendingGenerated { rank });
        }
        self.resolver.finish();
        debug!(
            "cascade settled after {} pass(es), score {}",
            self.resolver.passes(),
            self.ledger.score()
        );

        if let Some(ev) =
            GameOverDetector::evaluate(&self.grid, self.ledger.score(), &mut self.game_over)
        {
            info!("game over, final score {}", self.ledger.score());
            self.events.push(ev);
        }
    }

    /// Signal an aborted drag. No state changes.
    pub fn miss(&mut self) {
        self.events.push(GameEvent::MoveRejected {
            reason: RejectReason::Miss,
        });
    }

    pub fn score(&self) -> u64 {
        self.ledger.score()
    }

    pub fn pending_tile(&self) -> Option<Rank> {
        self.pending
    }

    pub fn cascade_state(&self) -> CascadeState {
        self.resolver.state()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Price of moving a board tile right now, if affordable
    pub fn move_cost(&self) -> Option<u64> {
        move_cost(self.ledger.score())
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Row-major copy of the cells
    pub fn cells(&self) -> Vec<Option<Rank>> {
        self.grid.cells().to_vec()
    }

    /// Events emitted since the last call to `take_events`
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take and clear the buffered events.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.size = self.grid.size();
        out.cells.clear();
        out.cells.extend_from_slice(self.grid.cells());
        out.score = self.ledger.score();
        out.pending = self.pending;
        out.cascade = self.resolver.state();
        out.game_over = self.game_over;
        out.episode_id = self.episode_id;
        out.move_cost = self.move_cost();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: usize, cells: &[u32], score: u64) -> Session {
        let cells = cells
            .iter()
            .map(|&r| if r == 0 { None } else { Some(r) })
            .collect();
        let grid = Grid::from_cells(size, cells).unwrap();
        let mut s = Session::with_board(grid, score, Some(1), Pcg32::seed_from_u64(7));
        s.take_events();
        s
    }

    #[test]
    fn test_new_session() {
        let s = Session::new(SessionConfig::new(4, 12345)).unwrap();
        assert_eq!(s.size(), 4);
        assert_eq!(s.grid().len(), 16);
        assert_eq!(s.grid().occupied_count(), 5);
        assert_eq!(s.score(), 0);
        assert!(s.pending_tile().is_some());
        assert_eq!(s.cascade_state(), CascadeState::Idle);
        assert!(!s.is_game_over());
        assert_eq!(s.episode_id(), 0);
    }

    #[test]
    fn test_new_session_emits_layout_events() {
        let mut s = Session::new(SessionConfig::new(3, 1)).unwrap();
        let events = s.take_events();
        let spawned = events
            .iter()
            .filter(|e| matches!(e, GameEvent::TileSpawned { .. }))
            .count();
        assert_eq!(spawned, 3);
        assert!(matches!(events.last(), Some(GameEvent::PendingGenerated { .. })));
        assert!(s.events().is_empty());
    }

    #[test]
    fn test_rejects_invalid_size() {
        assert!(Session::new(SessionConfig::new(1, 1)).is_err());
    }

    #[test]
    fn test_rejects_size_whose_cell_count_overflows() {
        let size = 1usize << 33;
        assert_eq!(
            Session::new(SessionConfig::new(size, 1)).err(),
            Some(crate::error::GameError::Configuration { size })
        );
        assert!(Session::with_rng(usize::MAX, Pcg32::seed_from_u64(1)).is_err());
    }

    #[test]
    fn test_restart_increments_episode_id() {
        let mut s = Session::new(SessionConfig::new(3, 1)).unwrap();
        s.restart();
        assert_eq!(s.episode_id(), 1);
        assert_eq!(s.size(), 3);
        assert_eq!(s.score(), 0);
        assert_eq!(s.grid().occupied_count(), 3);
    }

    #[test]
    fn test_step_api_rejects_drops_while_resolving() {
        let mut s = board(3, &[1, 0, 0, 0, 0, 0, 0, 0, 0], 0);
        let out = s.begin_drop(DropSource::Pending, 1).unwrap();
        assert!(out.is_accepted());
        assert_eq!(s.cascade_state(), CascadeState::Resolving);

        let snap = s.snapshot();
        let again = s.begin_drop(DropSource::Pending, 5).unwrap();
        assert_eq!(again, DropOutcome::Rejected(RejectReason::CascadeInProgress));
        assert_eq!(s.snapshot(), snap);

        assert!(matches!(s.step(), StepOutcome::Merged(_)));
        assert_eq!(s.step(), StepOutcome::Settled);
        assert_eq!(s.step(), StepOutcome::Idle);
        assert_eq!(s.cascade_state(), CascadeState::Idle);
        assert_eq!(s.score(), 2);
    }

    #[test]
    fn test_out_of_range_is_error_without_mutation() {
        let mut s = board(3, &[1, 0, 0, 0, 0, 0, 0, 0, 0], 9);
        let before = s.snapshot();
        assert!(s.drop_tile(DropSource::Pending, 9).is_err());
        assert!(s.drop_tile(DropSource::Grid(40), 1).is_err());
        assert_eq!(s.snapshot(), before);
        assert!(s.events().is_empty());
    }

    #[test]
    fn test_move_cost_debited_before_credit() {
        // Move the 2 at index 4 next to the 2 at index 2.
        let mut s = board(3, &[0, 0, 2, 0, 2, 0, 0, 0, 0], 5);
        let out = s.drop_tile(DropSource::Grid(4), 5).unwrap();
        assert_eq!(out, DropOutcome::Accepted { cost: 1 });
        // 5 - 1 + (2 + 2)
        assert_eq!(s.score(), 8);
        assert_eq!(s.grid().get(5), Ok(Some(3)));
        assert_eq!(s.grid().get(2), Ok(None));
        let events = s.take_events();
        assert_eq!(
            events[0],
            GameEvent::TileMoved {
                from: 4,
                to: 5,
                rank: 2,
                cost: 1
            }
        );
    }

    #[test]
    fn test_miss_only_emits_event() {
        let mut s = board(3, &[1, 0, 0, 0, 0, 0, 0, 0, 0], 0);
        let before = s.snapshot();
        s.miss();
        assert_eq!(s.snapshot(), before);
        assert_eq!(
            s.take_events(),
            vec![GameEvent::MoveRejected {
                reason: RejectReason::Miss
            }]
        );
    }

    #[test]
    fn test_snapshot_into_reuses_buffer() {
        let s = board(2, &[1, 0, 0, 2], 4);
        let mut snap = SessionSnapshot::default();
        s.snapshot_into(&mut snap);
        assert_eq!(snap.size, 2);
        assert_eq!(snap.cells, vec![Some(1), None, None, Some(2)]);
        assert_eq!(snap.move_cost, Some(1));
        assert_eq!(snap.cell(1, 1), Some(2));
        assert!(snap.playable());
    }
}
