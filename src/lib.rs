//! Minesweeper constraint solver
//!
//! This library deduces provably safe and provably mined cells from the
//! revealed hints of a minesweeper board by building a linear constraint
//! system over the unrevealed frontier and extracting the conclusions the
//! system forces.

pub mod board;
pub mod config;
pub mod linear;
pub mod solver;
pub mod utils;

pub use board::{BoardView, CellState, MineBoard, Minefield};
pub use config::Settings;
pub use solver::{solve, solve_detailed, RunDisposition, RunSummary, SolveOutcome, SolveReport};

use anyhow::Result;
use solver::RunOptions;

/// Build the board a settings block describes, either from its layout
/// file or freshly generated
pub fn board_from_settings(settings: &Settings) -> Result<Minefield> {
    match settings.board.layout_file {
        Some(ref path) => {
            let layout = board::load_layout_from_file(path)?;
            Minefield::from_layout(layout)
        }
        None => Minefield::new(
            settings.board.rows,
            settings.board.cols,
            settings.board.mines,
            settings.board.seed,
        ),
    }
}

/// Main entry point: build a board from settings, make the first open,
/// and run the solver until it can no longer make progress
pub fn run_from_settings(settings: &Settings) -> Result<(Minefield, RunSummary)> {
    let mut board = board_from_settings(settings)?;

    let first = settings.board.first_open;
    if first.row >= board.rows() || first.col >= board.cols() {
        anyhow::bail!(
            "First open ({}, {}) out of bounds for {}x{} board",
            first.row,
            first.col,
            board.rows(),
            board.cols()
        );
    }
    board.open(first.row, first.col);

    let options = RunOptions {
        max_passes: settings.solver.max_passes,
        forced_bypass_retry: settings.solver.forced_bypass_retry,
        keep_trace: settings.output.save_trace,
        verbose: false,
    };
    let summary = solver::run(&mut board, &options);
    Ok((board, summary))
}
