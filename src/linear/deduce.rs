//! Certainty extraction from constraint equations

use crate::board::MineBoard;
use crate::linear::equations::Equation;
use crate::linear::index_map::{IndexError, VariableIndex};

/// Apply every certain conclusion the given rows admit to the board.
///
/// A row is conclusive when its right-hand side equals one of the two
/// extremes reachable by 0/1 variable assignments: the sum of its negative
/// coefficients (every negative variable is a mine, every positive one is
/// safe) or the sum of its positive coefficients (the mirror image). Both
/// checks run independently per row. Coefficients and right-hand sides are
/// rounded to the nearest integer first, so reduced rows that drifted off
/// exact integers by less than one half still resolve.
///
/// Rows with fewer than two elements carry no variable and are skipped.
/// `cols` is the column count of the board the index was built from.
pub fn process_equations<B: MineBoard + ?Sized>(
    rows: &[Equation],
    index: &VariableIndex,
    board: &mut B,
    cols: usize,
) -> Result<(), IndexError> {
    for row in rows {
        if row.len() < 2 {
            continue;
        }

        let (coefficients, rhs) = row.split_at(row.len() - 1);
        let rhs = rhs[0].round() as i64;

        let mut min_val = 0i64;
        let mut max_val = 0i64;
        for &coefficient in coefficients {
            let coefficient = coefficient.round() as i64;
            if coefficient < 0 {
                min_val += coefficient;
            } else {
                max_val += coefficient;
            }
        }

        if rhs == min_val {
            // Only reachable when every negative variable is a mine and
            // every positive variable is safe
            apply_assignment(coefficients, index, board, cols, true)?;
        }
        if rhs == max_val {
            apply_assignment(coefficients, index, board, cols, false)?;
        }
    }

    Ok(())
}

/// Resolve every variable of one conclusive row.
///
/// `negatives_are_mines` selects which extreme fired: at the minimum the
/// negative variables are mines, at the maximum the positive ones are.
fn apply_assignment<B: MineBoard + ?Sized>(
    coefficients: &[f64],
    index: &VariableIndex,
    board: &mut B,
    cols: usize,
    negatives_are_mines: bool,
) -> Result<(), IndexError> {
    for (column, &coefficient) in coefficients.iter().enumerate() {
        let coefficient = coefficient.round() as i64;
        if coefficient == 0 {
            continue;
        }

        let position = index.position_of(column)?;
        let (row, col) = (position / cols, position % cols);

        let is_mine = (coefficient < 0) == negatives_are_mines;
        if is_mine {
            board.mark_mine(row, col);
        } else {
            board.open(row, col);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardView;

    /// Test double that records sink calls without any game logic
    struct RecordingBoard {
        view: BoardView,
        marked: Vec<(usize, usize)>,
        opened: Vec<(usize, usize)>,
    }

    impl RecordingBoard {
        fn new(rows: usize, cols: usize) -> Self {
            Self {
                view: BoardView::new(rows, cols),
                marked: Vec::new(),
                opened: Vec::new(),
            }
        }
    }

    impl MineBoard for RecordingBoard {
        fn view(&self) -> BoardView {
            self.view.clone()
        }

        fn mark_mine(&mut self, row: usize, col: usize) {
            self.marked.push((row, col));
        }

        fn open(&mut self, row: usize, col: usize) {
            self.opened.push((row, col));
        }
    }

    fn index_of(pairs: &[(usize, usize)]) -> VariableIndex {
        let mut index = VariableIndex::new();
        for &(position, column) in pairs {
            index.insert(position, column);
        }
        index
    }

    #[test]
    fn test_saturated_row_marks_all() {
        // x0 + x1 + x2 = 3 can only mean three mines
        let index = index_of(&[(0, 0), (1, 1), (2, 2)]);
        let mut board = RecordingBoard::new(1, 3);

        let rows = vec![vec![1.0, 1.0, 1.0, 3.0]];
        process_equations(&rows, &index, &mut board, 3).unwrap();

        assert_eq!(board.marked, vec![(0, 0), (0, 1), (0, 2)]);
        assert!(board.opened.is_empty());
    }

    #[test]
    fn test_zero_row_opens_all() {
        // x0 + x1 = 0 can only mean two safe cells
        let index = index_of(&[(0, 0), (1, 1)]);
        let mut board = RecordingBoard::new(1, 2);

        let rows = vec![vec![1.0, 1.0, 0.0]];
        process_equations(&rows, &index, &mut board, 2).unwrap();

        assert_eq!(board.opened, vec![(0, 0), (0, 1)]);
        assert!(board.marked.is_empty());
    }

    #[test]
    fn test_negative_coefficient_row() {
        // -x0 + x1 = -1 forces x0 mined and x1 safe
        let index = index_of(&[(0, 0), (1, 1)]);
        let mut board = RecordingBoard::new(1, 2);

        let rows = vec![vec![-1.0, 1.0, -1.0]];
        process_equations(&rows, &index, &mut board, 2).unwrap();

        assert_eq!(board.marked, vec![(0, 0)]);
        assert_eq!(board.opened, vec![(0, 1)]);
    }

    #[test]
    fn test_inconclusive_row_touches_nothing() {
        // x0 + x1 = 1 admits two assignments
        let index = index_of(&[(0, 0), (1, 1)]);
        let mut board = RecordingBoard::new(1, 2);

        let rows = vec![vec![1.0, 1.0, 1.0]];
        process_equations(&rows, &index, &mut board, 2).unwrap();

        assert!(board.marked.is_empty());
        assert!(board.opened.is_empty());
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let index = index_of(&[(0, 0)]);
        let mut board = RecordingBoard::new(1, 1);

        let rows = vec![Vec::new(), vec![0.0]];
        process_equations(&rows, &index, &mut board, 1).unwrap();

        assert!(board.marked.is_empty());
        assert!(board.opened.is_empty());
    }

    #[test]
    fn test_drifted_values_round_before_comparison() {
        // Slightly off-integer row still resolves to x0 = 1, x1 = 0
        let index = index_of(&[(0, 0), (1, 1)]);
        let mut board = RecordingBoard::new(1, 2);

        let rows = vec![vec![1.0000000001, -0.9999999999, 0.9999999998]];
        process_equations(&rows, &index, &mut board, 2).unwrap();

        assert_eq!(board.marked, vec![(0, 0)]);
        assert_eq!(board.opened, vec![(0, 1)]);
    }

    #[test]
    fn test_processing_is_idempotent() {
        let index = index_of(&[(0, 0), (1, 1), (2, 2)]);
        let rows = vec![
            vec![1.0, 1.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0, 1.0],
        ];

        let mut first = RecordingBoard::new(1, 3);
        process_equations(&rows, &index, &mut first, 3).unwrap();
        let mut second = RecordingBoard::new(1, 3);
        process_equations(&rows, &index, &mut second, 3).unwrap();
        process_equations(&rows, &index, &mut second, 3).unwrap();

        // Same conclusions, repeated
        assert_eq!(second.marked.len(), 2 * first.marked.len());
        assert_eq!(second.opened.len(), 2 * first.opened.len());
        assert_eq!(&second.marked[..first.marked.len()], &first.marked[..]);
        assert_eq!(&second.opened[..first.opened.len()], &first.opened[..]);
    }

    #[test]
    fn test_untracked_column_is_an_error() {
        // Row references column 1 but only column 0 is mapped
        let index = index_of(&[(0, 0)]);
        let mut board = RecordingBoard::new(1, 2);

        let rows = vec![vec![0.0, 1.0, 1.0]];
        let result = process_equations(&rows, &index, &mut board, 2);

        assert_eq!(result, Err(IndexError::UntrackedColumn(1)));
    }

    #[test]
    fn test_position_translation_uses_column_count() {
        // Position 7 on a 3-wide board is row 2, col 1
        let index = index_of(&[(7, 0)]);
        let mut board = RecordingBoard::new(3, 3);

        let rows = vec![vec![1.0, 1.0]];
        process_equations(&rows, &index, &mut board, 3).unwrap();

        assert_eq!(board.marked, vec![(2, 1)]);
    }
}
