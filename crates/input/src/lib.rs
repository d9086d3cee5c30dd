//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::UiAction`] and turns those
//! actions into Drop intents through a grid cursor. Nothing here touches the
//! session directly.

pub mod cursor;
pub mod map;

pub use tui_merge_types as types;

pub use cursor::{CursorController, Intent};
pub use map::{handle_key_event, should_quit};
