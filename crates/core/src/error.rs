//! Contract errors.
//!
//! These signal a caller bug (bad configuration, index outside the board) and
//! are raised before any mutation. Player mistakes are not errors: they come
//! back as [`crate::DropOutcome::Rejected`].

use crate::types::MIN_GRID_SIZE;

/// Errors that can occur when creating or addressing a session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid grid size {size} (must be at least {min})", min = MIN_GRID_SIZE)]
    Configuration { size: usize },

    #[error("cell index {index} out of range for a grid of {len} cells")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("expected {expected} cells, got {actual}")]
    CellCount { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display() {
        let err = GameError::Configuration { size: 1 };
        assert_eq!(err.to_string(), "invalid grid size 1 (must be at least 2)");
    }

    #[test]
    fn test_index_error_display() {
        let err = GameError::IndexOutOfRange { index: 9, len: 9 };
        assert_eq!(
            err.to_string(),
            "cell index 9 out of range for a grid of 9 cells"
        );
    }

    #[test]
    fn test_cell_count_error_display() {
        let err = GameError::CellCount {
            expected: 4,
            actual: 3,
        };
        assert_eq!(err.to_string(), "expected 4 cells, got 3");
    }
}
