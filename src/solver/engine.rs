//! Single-pass deduction over a mine board

use crate::board::{BoardView, CellState, MineBoard};
use crate::linear::{build_equations, index_frontier, process_equations, row_reduce, IndexError};
use crate::solver::outcome::{SolveOutcome, SolveReport};
use std::time::{Duration, Instant};

const BYPASS_PERIOD: usize = 3;

/// Smallest iteration value that routes a pass through row reduction
pub const REDUCED_PASS_ITERATION: usize = 0;

/// Smallest iteration value that routes a pass around row reduction
pub const RAW_PASS_ITERATION: usize = 2;

/// Whether a pass at this iteration feeds raw equations to deduction
/// instead of reducing them first
pub fn should_bypass_reduction(iteration: usize) -> bool {
    iteration % BYPASS_PERIOD == RAW_PASS_ITERATION
}

/// Run one deduction pass over the board, returning whether it changed.
///
/// `iteration` is a pass counter owned by the caller; every third value,
/// starting at 2, bypasses row reduction so that conclusions reduction
/// would obscure on a drifting system still get a chance to fire. Internal
/// failures never escape, they surface as an unchanged board.
pub fn solve<B: MineBoard + ?Sized>(board: &mut B, iteration: usize) -> bool {
    solve_detailed(board, iteration).progressed()
}

/// Run one deduction pass and report what happened.
///
/// The pass snapshots the board, indexes the frontier, builds the
/// constraint system, reduces it unless bypassed, applies every certain
/// conclusion, and classifies the result by diffing a second snapshot
/// against the first.
pub fn solve_detailed<B: MineBoard + ?Sized>(board: &mut B, iteration: usize) -> SolveReport {
    let start_time = Instant::now();
    let mut report = SolveReport {
        iteration,
        outcome: SolveOutcome::Stalled,
        variables: 0,
        equations: 0,
        used_reduction: false,
        cells_marked: 0,
        cells_opened: 0,
        solve_time: Duration::default(),
    };

    let before = board.view();
    if !shape_is_valid(&before) {
        report.outcome = SolveOutcome::InvalidBoard;
        report.solve_time = start_time.elapsed();
        return report;
    }

    match deduce_pass(board, &before, iteration, &mut report) {
        Ok(had_equations) => {
            let after = board.view();
            let (marked, opened) = diff_views(&before, &after);
            report.cells_marked = marked;
            report.cells_opened = opened;
            report.outcome = if after != before {
                SolveOutcome::Progress
            } else if had_equations {
                SolveOutcome::Stalled
            } else {
                SolveOutcome::NoEquations
            };
        }
        Err(error) => {
            // The board may hold a partial update at this point; the caller
            // only learns that no trustworthy progress was made.
            eprintln!("Warning: deduction pass failed: {}", error);
            report.outcome = SolveOutcome::NumericFailure;
        }
    }

    report.solve_time = start_time.elapsed();
    report
}

/// Index, build, optionally reduce, and deduce. Returns whether any
/// equation reached the deduction stage.
fn deduce_pass<B: MineBoard + ?Sized>(
    board: &mut B,
    view: &BoardView,
    iteration: usize,
    report: &mut SolveReport,
) -> Result<bool, IndexError> {
    let index = index_frontier(view);
    report.variables = index.len();
    if index.is_empty() {
        return Ok(false);
    }

    let equations = build_equations(view, &index)?;
    report.equations = equations.len();
    if equations.is_empty() {
        return Ok(false);
    }

    let rows = if should_bypass_reduction(iteration) {
        equations
    } else {
        report.used_reduction = true;
        row_reduce(equations)
    };

    process_equations(&rows, &index, board, view.cols)?;
    Ok(true)
}

fn shape_is_valid(view: &BoardView) -> bool {
    view.rows > 0 && view.cols > 0 && view.cells.len() == view.rows * view.cols
}

/// Count cells that became marked or revealed between two snapshots
fn diff_views(before: &BoardView, after: &BoardView) -> (usize, usize) {
    let mut marked = 0;
    let mut opened = 0;
    for (old, new) in before.cells.iter().zip(after.cells.iter()) {
        if old == new {
            continue;
        }
        match new {
            CellState::MarkedMine => marked += 1,
            CellState::Revealed(_) => opened += 1,
            CellState::Unrevealed => {}
        }
    }
    (marked, opened)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Minefield;

    /// 2x2 board with two mines on the bottom row and the top-left corner
    /// revealed; its single constraint never resolves
    fn stalling_board() -> Minefield {
        let mut board = Minefield::from_layout(vec![
            vec![false, false],
            vec![true, true],
        ])
        .unwrap();
        board.open(0, 0);
        board
    }

    #[test]
    fn test_bypass_cadence() {
        assert!(!should_bypass_reduction(0));
        assert!(!should_bypass_reduction(1));
        assert!(should_bypass_reduction(2));
        assert!(!should_bypass_reduction(3));
        assert!(!should_bypass_reduction(4));
        assert!(should_bypass_reduction(5));
        assert!(should_bypass_reduction(RAW_PASS_ITERATION));
        assert!(!should_bypass_reduction(REDUCED_PASS_ITERATION));
    }

    #[test]
    fn test_reports_follow_bypass_cadence() {
        let mut board = stalling_board();

        for iteration in 0..6 {
            let report = solve_detailed(&mut board, iteration);
            assert_eq!(report.used_reduction, !should_bypass_reduction(iteration));
            assert_eq!(report.outcome, SolveOutcome::Stalled);
        }
    }

    #[test]
    fn test_stalled_board_is_left_untouched() {
        let mut board = stalling_board();
        let before = board.view();

        for iteration in 0..9 {
            assert!(!solve(&mut board, iteration));
            assert_eq!(board.view(), before);
        }
    }

    #[test]
    fn test_ring_of_ones_marks_center() {
        // Center mine, all eight surrounding hints revealed
        let mut board = Minefield::from_layout(vec![
            vec![false, false, false],
            vec![false, true, false],
            vec![false, false, false],
        ])
        .unwrap();
        for row in 0..3 {
            for col in 0..3 {
                if (row, col) != (1, 1) {
                    board.open(row, col);
                }
            }
        }

        let report = solve_detailed(&mut board, 0);

        assert_eq!(report.outcome, SolveOutcome::Progress);
        assert_eq!(report.variables, 1);
        assert_eq!(report.equations, 8);
        assert_eq!(report.cells_marked, 1);
        assert_eq!(report.cells_opened, 0);
        assert_eq!(board.view().get(1, 1), CellState::MarkedMine);
        assert!(board.is_solved());
    }

    #[test]
    fn test_reduction_finds_subset_deduction() {
        // Bottom hints give {a,b} = 1, {a,b,c} = 1 and {b,c} = 1 over the
        // top row; only elimination across equations resolves them
        fn hinted_board() -> Minefield {
            let mut board = Minefield::from_layout(vec![
                vec![false, true, false],
                vec![false, false, false],
            ])
            .unwrap();
            board.open(1, 0);
            board.open(1, 1);
            board.open(1, 2);
            board
        }

        // The raw pass sees three inconclusive rows
        let mut raw = hinted_board();
        let raw_report = solve_detailed(&mut raw, RAW_PASS_ITERATION);
        assert_eq!(raw_report.outcome, SolveOutcome::Stalled);

        // The reduced pass resolves every variable at once
        let mut reduced = hinted_board();
        let report = solve_detailed(&mut reduced, 0);
        assert_eq!(report.outcome, SolveOutcome::Progress);
        assert_eq!(report.cells_marked, 1);
        assert_eq!(report.cells_opened, 2);
        assert_eq!(reduced.view().get(0, 1), CellState::MarkedMine);
        assert!(reduced.is_solved());
    }

    #[test]
    fn test_untouched_board_has_no_equations() {
        let mut board = Minefield::from_layout(vec![
            vec![false, true],
            vec![false, false],
        ])
        .unwrap();

        let report = solve_detailed(&mut board, 0);
        assert_eq!(report.outcome, SolveOutcome::NoEquations);
        assert_eq!(report.variables, 0);
        assert!(!report.progressed());
    }

    #[test]
    fn test_solved_board_has_no_equations() {
        let mut board = Minefield::from_layout(vec![
            vec![false, true],
            vec![false, false],
        ])
        .unwrap();
        board.open(0, 0);
        board.open(1, 0);
        board.open(1, 1);
        board.mark_mine(0, 1);
        assert!(board.is_solved());

        let report = solve_detailed(&mut board, 0);
        assert_eq!(report.outcome, SolveOutcome::NoEquations);
    }

    #[test]
    fn test_invalid_shape_is_rejected() {
        struct BrokenBoard;

        impl MineBoard for BrokenBoard {
            fn view(&self) -> BoardView {
                // Claims 2x2 but carries three cells
                BoardView {
                    rows: 2,
                    cols: 2,
                    cells: vec![CellState::Unrevealed; 3],
                }
            }
            fn mark_mine(&mut self, _row: usize, _col: usize) {}
            fn open(&mut self, _row: usize, _col: usize) {}
        }

        let mut board = BrokenBoard;
        let report = solve_detailed(&mut board, 0);
        assert_eq!(report.outcome, SolveOutcome::InvalidBoard);
        assert!(!solve(&mut board, 1));
    }

    #[test]
    fn test_empty_board_is_rejected() {
        struct EmptyBoard;

        impl MineBoard for EmptyBoard {
            fn view(&self) -> BoardView {
                BoardView {
                    rows: 0,
                    cols: 0,
                    cells: Vec::new(),
                }
            }
            fn mark_mine(&mut self, _row: usize, _col: usize) {}
            fn open(&mut self, _row: usize, _col: usize) {}
        }

        let report = solve_detailed(&mut EmptyBoard, 0);
        assert_eq!(report.outcome, SolveOutcome::InvalidBoard);
    }
}
