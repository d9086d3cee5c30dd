//! Grid module - the square playfield
//!
//! The grid is an N x N board where each cell is empty or holds a tile rank.
//! Cells live in a flat vector in row-major order (`row * size + col`); the
//! length is fixed at construction and never changes.
//! Adjacency is 4-directional with no wraparound.

use arrayvec::ArrayVec;

use crate::error::{GameError, Result};
use crate::types::{Cell, MIN_GRID_SIZE};

/// Cell count of a `size` x `size` board, or `None` when `size` is below the
/// minimum or the board could not be allocated.
pub fn cell_count(size: usize) -> Option<usize> {
    if size < MIN_GRID_SIZE {
        return None;
    }
    let len = size.checked_mul(size)?;
    let bytes = len.checked_mul(std::mem::size_of::<Cell>())?;
    (bytes <= isize::MAX as usize).then_some(len)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    /// Flat array of cells, row-major order (row * size + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an all-empty `size` x `size` grid
    pub fn new(size: usize) -> Result<Self> {
        let len = cell_count(size).ok_or(GameError::Configuration { size })?;
        Ok(Self {
            size,
            cells: vec![None; len],
        })
    }

    /// Build a grid from row-major cells. `cells.len()` must be `size * size`.
    pub fn from_cells(size: usize, cells: Vec<Cell>) -> Result<Self> {
        let mut grid = Self::new(size)?;
        if cells.len() != grid.cells.len() {
            return Err(GameError::CellCount {
                expected: grid.cells.len(),
                actual: cells.len(),
            });
        }
        grid.cells = cells;
        Ok(grid)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells (`size * size`)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline(always)]
    fn check(&self, index: usize) -> Result<usize> {
        if index >= self.cells.len() {
            return Err(GameError::IndexOutOfRange {
                index,
                len: self.cells.len(),
            });
        }
        Ok(index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.cells.len()
    }

    pub fn get(&self, index: usize) -> Result<Cell> {
        self.check(index).map(|i| self.cells[i])
    }

    pub fn set(&mut self, index: usize, cell: Cell) -> Result<()> {
        let i = self.check(index)?;
        self.cells[i] = cell;
        Ok(())
    }

    pub fn is_empty_cell(&self, index: usize) -> Result<bool> {
        self.get(index).map(|cell| cell.is_none())
    }

    /// Row and column of a flat index (no bounds check)
    #[inline]
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.size, index % self.size)
    }

    /// Flat index of `(row, col)`, or `None` outside the board
    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.size || col >= self.size {
            return None;
        }
        Some(row * self.size + col)
    }

    /// In-bounds orthogonal neighbours, ordered up, down, left, right.
    pub fn neighbors(&self, index: usize) -> Result<ArrayVec<usize, 4>> {
        let i = self.check(index)?;
        let (row, col) = self.position(i);
        let mut out = ArrayVec::new();
        if row > 0 {
            out.push(i - self.size);
        }
        if row + 1 < self.size {
            out.push(i + self.size);
        }
        if col > 0 {
            out.push(i - 1);
        }
        if col + 1 < self.size {
            out.push(i + 1);
        }
        Ok(out)
    }

    /// Whether two in-bounds cells share an edge
    pub fn is_adjacent(&self, a: usize, b: usize) -> bool {
        if !self.contains(a) || !self.contains(b) {
            return false;
        }
        let (ra, ca) = self.position(a);
        let (rb, cb) = self.position(b);
        ra.abs_diff(rb) + ca.abs_diff(cb) == 1
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Empty cell indices in ascending order
    pub fn empty_indices(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Whether some pair of adjacent cells holds equal ranks
    pub fn has_adjacent_pair(&self) -> bool {
        (0..self.cells.len()).any(|i| {
            let Some(rank) = self.cells[i] else {
                return false;
            };
            let (row, col) = self.position(i);
            let right = col + 1 < self.size && self.cells[i + 1] == Some(rank);
            let down = row + 1 < self.size && self.cells[i + self.size] == Some(rank);
            right || down
        })
    }

    /// Get a reference to the internal cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(3).unwrap();
        assert_eq!(grid.len(), 9);
        assert_eq!(grid.size(), 3);
        assert!(grid.cells().iter().all(|c| c.is_none()));
        assert!(!grid.is_full());
    }

    #[test]
    fn test_rejects_small_sizes() {
        assert_eq!(Grid::new(1), Err(GameError::Configuration { size: 1 }));
        assert_eq!(Grid::new(0), Err(GameError::Configuration { size: 0 }));
    }

    #[test]
    fn test_get_set_bounds() {
        let mut grid = Grid::new(2).unwrap();
        grid.set(3, Some(2)).unwrap();
        assert_eq!(grid.get(3), Ok(Some(2)));
        assert_eq!(
            grid.get(4),
            Err(GameError::IndexOutOfRange { index: 4, len: 4 })
        );
        assert!(grid.set(4, Some(1)).is_err());
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_neighbors_order_and_edges() {
        let grid = Grid::new(3).unwrap();
        // Center: up, down, left, right
        assert_eq!(grid.neighbors(4).unwrap().as_slice(), &[1, 7, 3, 5]);
        // Corner
        assert_eq!(grid.neighbors(0).unwrap().as_slice(), &[3, 1]);
        // Right edge does not wrap into the next row
        assert_eq!(grid.neighbors(5).unwrap().as_slice(), &[2, 8, 4]);
        assert!(grid.neighbors(9).is_err());
    }

    #[test]
    fn test_adjacency() {
        let grid = Grid::new(3).unwrap();
        assert!(grid.is_adjacent(0, 1));
        assert!(grid.is_adjacent(1, 4));
        assert!(!grid.is_adjacent(2, 3));
        assert!(!grid.is_adjacent(0, 4));
        assert!(!grid.is_adjacent(0, 0));
    }

    #[test]
    fn test_adjacent_pair_detection() {
        let grid = Grid::from_cells(2, vec![Some(1), Some(2), Some(2), Some(1)]).unwrap();
        assert!(!grid.has_adjacent_pair());
        let grid = Grid::from_cells(2, vec![Some(1), Some(2), Some(1), None]).unwrap();
        assert!(grid.has_adjacent_pair());
    }

    #[test]
    fn test_from_cells_length_checked() {
        assert_eq!(
            Grid::from_cells(2, vec![None; 3]),
            Err(GameError::CellCount {
                expected: 4,
                actual: 3
            })
        );
        let grid = Grid::from_cells(2, vec![Some(1), None, None, Some(3)]).unwrap();
        assert_eq!(grid.empty_indices(), vec![1, 2]);
        assert_eq!(grid.is_empty_cell(1), Ok(true));
        assert_eq!(grid.is_empty_cell(3), Ok(false));
        assert!(grid.is_empty_cell(4).is_err());
    }

    #[test]
    fn test_oversized_board_is_a_configuration_error() {
        let size = 1usize << 33;
        assert_eq!(Grid::new(size), Err(GameError::Configuration { size }));
        assert_eq!(cell_count(usize::MAX), None);
        // Fits in usize but could never be allocated
        assert_eq!(cell_count(1 << 31), None);
        assert_eq!(cell_count(1), None);
        assert_eq!(cell_count(4), Some(16));
    }
}
