//! TUI Merge (workspace facade crate).
//!
//! Re-exports the `tui_merge::{core,input,term,types}` public API; the
//! implementation lives in dedicated crates under `crates/`.

pub use tui_merge_core as core;
pub use tui_merge_input as input;
pub use tui_merge_term as term;
pub use tui_merge_types as types;
