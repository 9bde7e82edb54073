//! Cell states and board snapshots

use anyhow::Result;
use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a single cell as visible to the solver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    /// Not yet revealed or marked
    Unrevealed,
    /// Marked as a known mine
    MarkedMine,
    /// Revealed, showing the count of adjacent mines
    Revealed(u8),
}

impl CellState {
    /// Numeric code used by text snapshots and traces:
    /// -1 unrevealed, -2 marked mine, 0..=8 revealed count
    pub fn code(&self) -> i8 {
        match self {
            CellState::Unrevealed => -1,
            CellState::MarkedMine => -2,
            CellState::Revealed(count) => *count as i8,
        }
    }

    /// Parse a numeric code back into a cell state
    pub fn from_code(code: i8) -> Result<Self> {
        match code {
            -1 => Ok(CellState::Unrevealed),
            -2 => Ok(CellState::MarkedMine),
            count if (0..=8).contains(&count) => Ok(CellState::Revealed(count as u8)),
            other => anyhow::bail!("Invalid cell code {}", other),
        }
    }

    /// Whether this cell shows a hint count
    pub fn is_revealed(&self) -> bool {
        matches!(self, CellState::Revealed(_))
    }
}

/// Immutable snapshot of the visible side of a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<CellState>,
}

impl BoardView {
    /// Create a view with every cell unrevealed
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![CellState::Unrevealed; rows * cols],
        }
    }

    /// Create a view from a 2D array of cell states
    pub fn from_rows(cells: Vec<Vec<CellState>>) -> Result<Self> {
        if cells.is_empty() {
            anyhow::bail!("Board cannot be empty");
        }

        let rows = cells.len();
        let cols = cells[0].len();

        if cols == 0 {
            anyhow::bail!("Board width cannot be zero");
        }

        // Verify all rows have the same length
        for (i, row) in cells.iter().enumerate() {
            if row.len() != cols {
                anyhow::bail!("Row {} has length {}, expected {}", i, row.len(), cols);
            }
        }

        let flat_cells: Vec<CellState> = cells.into_iter().flatten().collect();

        Ok(Self {
            rows,
            cols,
            cells: flat_cells,
        })
    }

    /// Convert 2D coordinates to a flattened position
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Convert a flattened position back to 2D coordinates
    #[inline]
    pub fn coords(&self, position: usize) -> (usize, usize) {
        (position / self.cols, position % self.cols)
    }

    /// Get the cell state at coordinates
    pub fn get(&self, row: usize, col: usize) -> CellState {
        self.cells[self.index(row, col)]
    }

    /// In-bounds Moore neighbors of a cell, in row-major offset order
    pub fn neighbors(&self, row: usize, col: usize) -> Vec<(usize, usize)> {
        iproduct!(-1isize..=1, -1isize..=1)
            .filter(|&(dr, dc)| !(dr == 0 && dc == 0))
            .filter_map(|(dr, dc)| {
                let r = row as isize + dr;
                let c = col as isize + dc;
                if r >= 0 && r < self.rows as isize && c >= 0 && c < self.cols as isize {
                    Some((r as usize, c as usize))
                } else {
                    None
                }
            })
            .collect()
    }

    /// Count cells still unrevealed
    pub fn unrevealed_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| cell == CellState::Unrevealed)
            .count()
    }

    /// Count cells marked as mines
    pub fn marked_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| cell == CellState::MarkedMine)
            .count()
    }

    /// Count revealed cells
    pub fn revealed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_revealed()).count()
    }

    /// Check if no unrevealed cell remains
    pub fn is_solved(&self) -> bool {
        self.cells
            .iter()
            .all(|&cell| cell != CellState::Unrevealed)
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let symbol = match self.get(row, col) {
                    CellState::Unrevealed => '*',
                    CellState::MarkedMine => '+',
                    CellState::Revealed(count) => (b'0' + count) as char,
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Mutable board interface consumed by the solver.
///
/// Deduction only ever calls the two sink methods; everything it reads
/// comes from the snapshot returned by `view`.
pub trait MineBoard {
    /// Snapshot of the current visible state
    fn view(&self) -> BoardView;

    /// Mark an unrevealed cell as a known mine
    fn mark_mine(&mut self, row: usize, col: usize);

    /// Open a cell, revealing its contents
    fn open(&mut self, row: usize, col: usize);
}
