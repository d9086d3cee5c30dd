//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with serde derives, making them usable in any
//! context (core logic, terminal rendering, JSON export of snapshots/events).
//!
//! # Rules at a glance
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_GRID_SIZE` | 2 | Smallest accepted board side |
//! | `MIN_SCORE_TO_MOVE` | 3 | Score needed before a placed tile may be relocated |
//! | `MOVE_COST_DIVISOR` | 3 | Move cost is `score / 3`, rounded down |
//! | `START_FILL_RATIO` | 0.15 | Seed density for sizes without a table entry |
//! | `PENDING_RANK_ONE_PROBABILITY` | 0.8 | Chance that a new pending tile is rank 1 |
//!
//! # Examples
//!
//! ```
//! use tui_merge_types::{DropSource, RejectReason, UiAction};
//!
//! assert_eq!(RejectReason::OccupiedTarget.as_str(), "occupied-target");
//! assert_eq!(RejectReason::from_str("insufficient-score"), Some(RejectReason::InsufficientScore));
//!
//! assert_eq!(UiAction::from_str("pickUp"), Some(UiAction::PickUp));
//! assert_eq!(DropSource::Grid(4).grid_index(), Some(4));
//! ```

use serde::{Deserialize, Serialize};

/// Smallest accepted board side length.
pub const MIN_GRID_SIZE: usize = 2;

/// Board side used when nothing else is configured.
pub const DEFAULT_GRID_SIZE: usize = 4;

/// Score required before an existing tile may be moved.
pub const MIN_SCORE_TO_MOVE: u64 = 3;

/// Move cost divisor: `cost = score / MOVE_COST_DIVISOR`.
pub const MOVE_COST_DIVISOR: u64 = 3;

/// Ranks dealt round-robin into the starting layout.
pub const START_RANK_CYCLE: [Rank; 3] = [1, 2, 3];

/// Explicit starting tile counts per board size.
pub const START_COUNT_BY_SIZE: [(usize, usize); 3] = [(3, 3), (4, 5), (5, 10)];

/// Fraction of cells seeded for sizes without a table entry.
pub const START_FILL_RATIO: f64 = 0.15;

/// Lower bound of the fallback seed count (before the final clamp).
pub const START_FALLBACK_MIN: usize = 2;

/// Probability that a freshly generated pending tile is rank 1 (else rank 2).
pub const PENDING_RANK_ONE_PROBABILITY: f64 = 0.8;

/// Delay the terminal front-end leaves between cascade passes.
///
/// Presentation pacing only; never affects state or score.
pub const CASCADE_STEP_MS: u32 = 300;

/// Front-end frame interval in milliseconds (16ms ≈ 60 FPS).
pub const TICK_MS: u32 = 16;

/// Tile level. Always positive; merging raises it by one.
pub type Rank = u32;

/// A cell on the board
///
/// - `None`: empty cell
/// - `Some(rank)`: cell holding a tile of that rank
pub type Cell = Option<Rank>;

/// Where the tile of a Drop intent comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DropSource {
    /// The pending tile offered below the board.
    Pending,
    /// An existing tile on the board (a paid move).
    Grid(usize),
}

impl DropSource {
    /// Board index of the source, if it is a board tile.
    pub fn grid_index(&self) -> Option<usize> {
        match self {
            DropSource::Pending => None,
            DropSource::Grid(index) => Some(*index),
        }
    }
}

/// Why a Drop intent was refused.
///
/// Rejections are expected user-intent outcomes, not errors: the session is
/// left untouched and only a `MoveRejected` event is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RejectReason {
    /// Target cell is occupied, or source and target are the same cell.
    OccupiedTarget,
    /// Tried to move a board tile with score below `MIN_SCORE_TO_MOVE`.
    InsufficientScore,
    /// A cascade is still being resolved.
    CascadeInProgress,
    /// The named source holds no tile.
    EmptySource,
    /// The session already ended.
    GameOver,
    /// A drag was released outside any valid target.
    Miss,
}

impl RejectReason {
    /// Parse a reason from its kebab-case name
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "occupied-target" => Some(RejectReason::OccupiedTarget),
            "insufficient-score" => Some(RejectReason::InsufficientScore),
            "cascade-in-progress" => Some(RejectReason::CascadeInProgress),
            "empty-source" => Some(RejectReason::EmptySource),
            "game-over" => Some(RejectReason::GameOver),
            "miss" => Some(RejectReason::Miss),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::OccupiedTarget => "occupied-target",
            RejectReason::InsufficientScore => "insufficient-score",
            RejectReason::CascadeInProgress => "cascade-in-progress",
            RejectReason::EmptySource => "empty-source",
            RejectReason::GameOver => "game-over",
            RejectReason::Miss => "miss",
        }
    }
}

/// Merge resolution state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CascadeState {
    /// Grid is stable; drops are accepted.
    #[default]
    Idle,
    /// A cascade is running; drops are rejected.
    Resolving,
}

/// Events emitted by the core for presentation and audio layers.
///
/// They carry no state of their own: replaying them is never required to
/// reconstruct a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    /// A tile appeared on the board (starting layout or pending placement).
    TileSpawned { index: usize, rank: Rank },
    /// A board tile was relocated for `cost` points.
    TileMoved {
        from: usize,
        to: usize,
        rank: Rank,
        cost: u64,
    },
    /// A new pending tile was offered.
    PendingGenerated { rank: Rank },
    /// One component collapsed into `target`.
    TilesMerged {
        members: Vec<usize>,
        target: usize,
        new_rank: Rank,
        credit: u64,
    },
    /// A cascade pass finished with at least one merge.
    PassResolved { pass: u32, merges: u32, credit: u64 },
    /// A Drop intent was refused.
    MoveRejected { reason: RejectReason },
    /// The board filled up.
    GameOver { final_score: u64 },
}

/// Actions the terminal front-end feeds into the cursor controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UiAction {
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    /// Drop the pending tile (or the held tile) on the cursor cell.
    PlacePending,
    /// Pick up the tile under the cursor for a paid move.
    PickUp,
    /// Release a held tile without placing it.
    Cancel,
    /// Start a new session with the same board size.
    Restart,
}

impl UiAction {
    /// Parse action from string (case-insensitive)
    ///
    /// ```
    /// use tui_merge_types::UiAction;
    ///
    /// assert_eq!(UiAction::from_str("cursorLeft"), Some(UiAction::CursorLeft));
    /// assert_eq!(UiAction::from_str("PLACEPENDING"), Some(UiAction::PlacePending));
    /// assert_eq!(UiAction::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cursorup" => Some(UiAction::CursorUp),
            "cursordown" => Some(UiAction::CursorDown),
            "cursorleft" => Some(UiAction::CursorLeft),
            "cursorright" => Some(UiAction::CursorRight),
            "placepending" => Some(UiAction::PlacePending),
            "pickup" => Some(UiAction::PickUp),
            "cancel" => Some(UiAction::Cancel),
            "restart" => Some(UiAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UiAction::CursorUp => "cursorUp",
            UiAction::CursorDown => "cursorDown",
            UiAction::CursorLeft => "cursorLeft",
            UiAction::CursorRight => "cursorRight",
            UiAction::PlacePending => "placePending",
            UiAction::PickUp => "pickUp",
            UiAction::Cancel => "cancel",
            UiAction::Restart => "restart",
        }
    }
}
