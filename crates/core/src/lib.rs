//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the merge puzzle: the square grid, tile
//! spawning, Drop validation, the merge cascade, scoring and game-over
//! detection. It has no dependencies on rendering, input or I/O.
//!
//! - **Deterministic**: the same seed and the same Drop sequence produce the
//!   same grid, score and event stream
//! - **Steppable**: a cascade can be resolved at once or one pass at a time
//!   without changing the result
//!
//! # Module Structure
//!
//! - [`grid`]: N x N board with row-major cells and 4-way adjacency
//! - [`spawn`]: starting layout and pending tile generation
//! - [`placement`]: Drop validation and the placement mutation
//! - [`merge`]: component search and cascade passes
//! - [`scoring`]: merge credits, move costs and the score ledger
//! - [`game_over`]: terminal-state detection
//! - [`session`]: the orchestrator owning all of the above
//!
//! # Rules
//!
//! - Placing the pending tile is free; moving a board tile costs a third of
//!   the score and needs a score of at least 3
//! - Two or more edge-connected tiles of equal rank collapse into one tile of
//!   the next rank
//! - The game ends when the board has no empty cell
//!
//! # Example
//!
//! ```
//! use tui_merge_core::{Session, SessionConfig};
//! use tui_merge_core::types::DropSource;
//!
//! let mut session = Session::new(SessionConfig::new(4, 12345)).unwrap();
//! let target = session.grid().empty_indices()[0];
//! let outcome = session.drop_tile(DropSource::Pending, target).unwrap();
//! assert!(outcome.is_accepted());
//! assert!(!session.snapshot().cells.is_empty());
//! ```

pub mod config;
pub mod error;
pub mod game_over;
pub mod grid;
pub mod merge;
pub mod placement;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod spawn;

pub use tui_merge_types as types;

// Re-export commonly used types for convenience
pub use config::SessionConfig;
pub use error::{GameError, Result};
pub use game_over::GameOverDetector;
pub use grid::Grid;
pub use merge::{find_components, Component, Merge, MergeResolver, PassOutcome};
pub use scoring::{merge_credit, move_cost, ScoreLedger};
pub use session::{CascadeSummary, DropOutcome, Session, StepOutcome};
pub use snapshot::SessionSnapshot;
pub use spawn::{starting_count, SpawnPlanner};
