//! Playable minefield with lazy mine placement

use super::state::{BoardView, CellState, MineBoard};
use anyhow::Result;
use itertools::iproduct;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::fmt;

/// A minefield tracking both the hidden layout and the visible state.
///
/// Mines are placed on the first open so that the opened cell and its
/// whole neighborhood stay clear. Opening a mine freezes the board;
/// nothing can be opened or marked afterwards.
#[derive(Debug, Clone)]
pub struct Minefield {
    rows: usize,
    cols: usize,
    mine_count: usize,
    /// Placement seed, recorded for reproducibility. Absent for boards
    /// built from an explicit layout.
    seed: Option<u64>,
    layout: Vec<bool>,
    counts: Vec<u8>,
    view: BoardView,
    started: bool,
    detonated: bool,
}

impl Minefield {
    /// Create a minefield with randomly placed mines.
    ///
    /// Placement is deferred until the first open. The mine count must
    /// leave the first-open neighborhood free no matter where it lands,
    /// so at least nine cells stay unmined.
    pub fn new(rows: usize, cols: usize, mine_count: usize, seed: Option<u64>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            anyhow::bail!("Minefield dimensions must be positive, got {}x{}", rows, cols);
        }
        if mine_count + 9 > rows * cols {
            anyhow::bail!(
                "{} mines cannot leave a safe first open on a {}x{} board",
                mine_count,
                rows,
                cols
            );
        }

        let seed = seed.unwrap_or_else(rand::random);

        Ok(Self {
            rows,
            cols,
            mine_count,
            seed: Some(seed),
            layout: vec![false; rows * cols],
            counts: vec![0; rows * cols],
            view: BoardView::new(rows, cols),
            started: false,
            detonated: false,
        })
    }

    /// Create a minefield from an explicit mine layout, fully placed
    pub fn from_layout(mines: Vec<Vec<bool>>) -> Result<Self> {
        if mines.is_empty() {
            anyhow::bail!("Mine layout cannot be empty");
        }

        let rows = mines.len();
        let cols = mines[0].len();

        if cols == 0 {
            anyhow::bail!("Mine layout width cannot be zero");
        }
        for (i, row) in mines.iter().enumerate() {
            if row.len() != cols {
                anyhow::bail!("Row {} has length {}, expected {}", i, row.len(), cols);
            }
        }

        let layout: Vec<bool> = mines.into_iter().flatten().collect();
        let mine_count = layout.iter().filter(|&&mined| mined).count();
        let counts = compute_counts(&layout, rows, cols);

        Ok(Self {
            rows,
            cols,
            mine_count,
            seed: None,
            layout,
            counts,
            view: BoardView::new(rows, cols),
            started: true,
            detonated: false,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of mines on (or destined for) the board
    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    /// Placement seed, if the layout is generated rather than given
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Whether a mine has been opened
    pub fn is_detonated(&self) -> bool {
        self.detonated
    }

    /// Whether every cell is revealed or marked
    pub fn is_solved(&self) -> bool {
        self.view.is_solved()
    }

    /// Coordinates of every mine. Empty until mines are placed.
    pub fn mine_positions(&self) -> Vec<(usize, usize)> {
        self.layout
            .iter()
            .enumerate()
            .filter(|(_, &mined)| mined)
            .map(|(position, _)| (position / self.cols, position % self.cols))
            .collect()
    }

    /// Open a cell. The first open places the mines, keeping the opened
    /// cell and its whole neighborhood clear. Opening a mine detonates
    /// the board and freezes it; the cell keeps its unrevealed look since
    /// it has no count to show.
    pub fn open(&mut self, row: usize, col: usize) {
        if self.detonated || row >= self.rows || col >= self.cols {
            return;
        }
        let position = row * self.cols + col;
        if self.view.cells[position] != CellState::Unrevealed {
            return;
        }

        if !self.started {
            self.place_mines(row, col);
            self.started = true;
        }

        if self.layout[position] {
            self.detonated = true;
            return;
        }

        self.view.cells[position] = CellState::Revealed(self.counts[position]);
    }

    /// Mark an unrevealed cell as a known mine. Revealed and already
    /// marked cells are left alone.
    pub fn mark_mine(&mut self, row: usize, col: usize) {
        if self.detonated || row >= self.rows || col >= self.cols {
            return;
        }
        let position = row * self.cols + col;
        if self.view.cells[position] == CellState::Unrevealed {
            self.view.cells[position] = CellState::MarkedMine;
        }
    }

    /// Scatter mines everywhere except the first-open neighborhood
    fn place_mines(&mut self, first_row: usize, first_col: usize) {
        let total = self.rows * self.cols;
        let mut safe = vec![false; total];
        safe[first_row * self.cols + first_col] = true;
        for (row, col) in self.view.neighbors(first_row, first_col) {
            safe[row * self.cols + col] = true;
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let mut placed = 0;
        while placed < self.mine_count {
            let position = rng.random_range(0..total);
            if !safe[position] && !self.layout[position] {
                self.layout[position] = true;
                placed += 1;
            }
        }

        self.counts = compute_counts(&self.layout, self.rows, self.cols);
    }
}

/// Adjacency counts for the whole layout
fn compute_counts(layout: &[bool], rows: usize, cols: usize) -> Vec<u8> {
    (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            (0..cols)
                .into_par_iter()
                .map(move |col| adjacent_mines(layout, rows, cols, row, col))
        })
        .collect()
}

/// Count mines among the Moore neighbors of a cell
fn adjacent_mines(layout: &[bool], rows: usize, cols: usize, row: usize, col: usize) -> u8 {
    iproduct!(-1isize..=1, -1isize..=1)
        .filter(|&(dr, dc)| !(dr == 0 && dc == 0))
        .filter(|&(dr, dc)| {
            let r = row as isize + dr;
            let c = col as isize + dc;
            r >= 0
                && r < rows as isize
                && c >= 0
                && c < cols as isize
                && layout[r as usize * cols + c as usize]
        })
        .count() as u8
}

impl MineBoard for Minefield {
    fn view(&self) -> BoardView {
        self.view.clone()
    }

    fn mark_mine(&mut self, row: usize, col: usize) {
        Minefield::mark_mine(self, row, col);
    }

    fn open(&mut self, row: usize, col: usize) {
        Minefield::open(self, row, col);
    }
}

impl fmt::Display for Minefield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validations() {
        assert!(Minefield::new(0, 5, 1, None).is_err());
        assert!(Minefield::new(5, 0, 1, None).is_err());
        // 3x3 with one mine cannot survive a center first open
        assert!(Minefield::new(3, 3, 1, None).is_err());
        assert!(Minefield::new(4, 3, 3, None).is_ok());
        assert!(Minefield::new(4, 3, 4, None).is_err());
    }

    #[test]
    fn test_from_layout_counts() {
        let mut board = Minefield::from_layout(vec![
            vec![true, false, false],
            vec![false, false, false],
            vec![false, false, true],
        ])
        .unwrap();

        assert_eq!(board.mine_count(), 2);
        assert_eq!(board.seed(), None);
        assert_eq!(board.mine_positions(), vec![(0, 0), (2, 2)]);

        board.open(1, 1);
        assert_eq!(board.view().get(1, 1), CellState::Revealed(2));
        board.open(0, 2);
        assert_eq!(board.view().get(0, 2), CellState::Revealed(0));
        board.open(2, 0);
        assert_eq!(board.view().get(2, 0), CellState::Revealed(0));
        board.open(0, 1);
        assert_eq!(board.view().get(0, 1), CellState::Revealed(1));
    }

    #[test]
    fn test_from_layout_rejects_bad_shapes() {
        assert!(Minefield::from_layout(vec![]).is_err());
        assert!(Minefield::from_layout(vec![vec![]]).is_err());
        assert!(Minefield::from_layout(vec![vec![true, false], vec![true]]).is_err());
    }

    #[test]
    fn test_first_open_neighborhood_is_clear() {
        let mut board = Minefield::new(5, 5, 12, Some(7)).unwrap();
        assert!(board.mine_positions().is_empty());

        board.open(2, 2);

        assert!(!board.is_detonated());
        assert_eq!(board.mine_positions().len(), 12);
        for (row, col) in board.mine_positions() {
            let dr = row.abs_diff(2);
            let dc = col.abs_diff(2);
            assert!(dr > 1 || dc > 1, "mine at ({}, {}) inside safe zone", row, col);
        }
    }

    #[test]
    fn test_counts_match_layout() {
        let mut board = Minefield::new(6, 4, 8, Some(99)).unwrap();
        board.open(0, 0);

        let mines = board.mine_positions();
        for row in 0..6 {
            for col in 0..4 {
                if mines.contains(&(row, col)) {
                    continue;
                }
                let expected = mines
                    .iter()
                    .filter(|&&(mr, mc)| {
                        mr.abs_diff(row) <= 1 && mc.abs_diff(col) <= 1
                    })
                    .count() as u8;
                board.open(row, col);
                if let CellState::Revealed(count) = board.view().get(row, col) {
                    assert_eq!(count, expected, "count mismatch at ({}, {})", row, col);
                }
            }
        }
        assert!(!board.is_detonated());
    }

    #[test]
    fn test_same_seed_same_layout() {
        let mut first = Minefield::new(8, 8, 10, Some(42)).unwrap();
        let mut second = Minefield::new(8, 8, 10, Some(42)).unwrap();
        first.open(3, 3);
        second.open(3, 3);

        assert_eq!(first.mine_positions(), second.mine_positions());
        assert_eq!(first.seed(), Some(42));
    }

    #[test]
    fn test_detonation_freezes_the_board() {
        let mut board = Minefield::from_layout(vec![
            vec![true, false],
            vec![false, false],
        ])
        .unwrap();
        board.open(1, 1);
        let before = board.view();

        board.open(0, 0);

        assert!(board.is_detonated());
        // The mine cell has no count to show
        assert_eq!(board.view(), before);

        board.open(0, 1);
        board.mark_mine(1, 0);
        assert_eq!(board.view(), before);
    }

    #[test]
    fn test_mark_and_open_guards() {
        let mut board = Minefield::from_layout(vec![
            vec![true, false],
            vec![false, false],
        ])
        .unwrap();

        board.open(1, 1);
        let revealed = board.view().get(1, 1);

        // Marking a revealed cell is a no-op
        board.mark_mine(1, 1);
        assert_eq!(board.view().get(1, 1), revealed);

        // Opening a marked cell is a no-op
        board.mark_mine(0, 0);
        board.open(0, 0);
        assert!(!board.is_detonated());
        assert_eq!(board.view().get(0, 0), CellState::MarkedMine);

        // Out-of-bounds calls are ignored
        board.open(5, 5);
        board.mark_mine(2, 0);
    }

    #[test]
    fn test_is_solved() {
        let mut board = Minefield::from_layout(vec![
            vec![true, false],
            vec![false, false],
        ])
        .unwrap();
        assert!(!board.is_solved());

        board.open(0, 1);
        board.open(1, 0);
        board.open(1, 1);
        assert!(!board.is_solved());

        board.mark_mine(0, 0);
        assert!(board.is_solved());
    }

    #[test]
    fn test_zero_mines() {
        let mut board = Minefield::new(4, 4, 0, Some(1)).unwrap();
        board.open(0, 0);
        assert_eq!(board.view().get(0, 0), CellState::Revealed(0));
        assert!(board.mine_positions().is_empty());
    }
}
