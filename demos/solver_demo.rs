//! Demonstration of the linear deduction pipeline
//!
//! This example walks through the solver stages by hand: building
//! equations from a position, reducing them, and letting the driver
//! play a full board.

use minesweeper_solver::board::{MineBoard, Minefield};
use minesweeper_solver::linear::{build_equations, index_frontier, row_reduce};
use minesweeper_solver::solver::{self, solve_detailed, RunOptions, RAW_PASS_ITERATION};
use minesweeper_solver::utils::BoardFormatter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Minesweeper Linear Solver Demonstration ===\n");

    ring_position()?;
    reduction_comparison()?;
    full_run()?;
    detonation_freeze()?;

    println!("✅ All stages completed");
    Ok(())
}

/// Stage 1: a lone mine ringed by revealed hints
fn ring_position() -> Result<(), Box<dyn std::error::Error>> {
    println!("Stage 1: ring position");

    let mut board = Minefield::from_layout(vec![
        vec![false, false, false],
        vec![false, true, false],
        vec![false, false, false],
    ])?;
    for (row, col) in [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)] {
        board.open(row, col);
    }

    println!("  Position:");
    print_indented(&board.view().to_string());

    let view = board.view();
    let index = index_frontier(&view);
    let equations = build_equations(&view, &index)?;
    println!("  Frontier variables: {}", index.len());
    println!("  Equations: {}", equations.len());

    let report = solve_detailed(&mut board, 0);
    println!("  Pass outcome: {}", report.outcome);
    println!("  Cells marked: {}", report.cells_marked);

    if report.cells_marked != 1 {
        return Err("Expected the center mine to be marked".into());
    }
    println!("  ✅ Center mine identified\n");
    Ok(())
}

/// Stage 2: a position only row reduction can crack
fn reduction_comparison() -> Result<(), Box<dyn std::error::Error>> {
    println!("Stage 2: raw equations vs row reduction");

    // Mine in the top middle, bottom row fully revealed
    let layout = vec![
        vec![false, true, false],
        vec![false, false, false],
    ];
    let mut reduced_board = Minefield::from_layout(layout)?;
    for col in 0..3 {
        reduced_board.open(1, col);
    }
    let mut raw_board = reduced_board.clone();

    println!("  Position:");
    print_indented(&reduced_board.view().to_string());

    let view = reduced_board.view();
    let index = index_frontier(&view);
    let equations = build_equations(&view, &index)?;
    print_matrix("Equations", &equations);
    print_matrix("After reduction", &row_reduce(equations));

    let raw_report = solve_detailed(&mut raw_board, RAW_PASS_ITERATION);
    let reduced_report = solve_detailed(&mut reduced_board, 0);

    println!(
        "  Raw pass:     {} marked, {} opened ({})",
        raw_report.cells_marked, raw_report.cells_opened, raw_report.outcome
    );
    println!(
        "  Reduced pass: {} marked, {} opened ({})",
        reduced_report.cells_marked, reduced_report.cells_opened, reduced_report.outcome
    );

    if reduced_report.cells_marked != 1 || reduced_report.cells_opened != 2 {
        return Err("Expected reduction to resolve the whole frontier".into());
    }
    println!("  ✅ Reduction found what raw equations could not\n");
    Ok(())
}

/// Stage 3: the driver playing a generated board to the end
fn full_run() -> Result<(), Box<dyn std::error::Error>> {
    println!("Stage 3: full run on a seeded 9x9 board");

    let mut board = Minefield::new(9, 9, 10, Some(42))?;
    board.open(4, 4);

    let options = RunOptions {
        max_passes: 64,
        forced_bypass_retry: true,
        keep_trace: true,
        verbose: false,
    };
    let summary = solver::run(&mut board, &options);

    println!("  Disposition: {:?}", summary.disposition);
    println!("  Passes: {}", summary.passes);
    println!(
        "  Cells marked: {}, cells opened: {}",
        summary.cells_marked, summary.cells_opened
    );
    println!("  Final position:");
    print_indented(&BoardFormatter::format_view_compact(&board.view()));
    println!();
    Ok(())
}

/// Stage 4: opening a mine freezes the board
fn detonation_freeze() -> Result<(), Box<dyn std::error::Error>> {
    println!("Stage 4: detonation");

    let mut board = Minefield::from_layout(vec![
        vec![true, false],
        vec![false, false],
    ])?;
    board.open(1, 1);
    board.open(0, 0);

    if !board.is_detonated() {
        return Err("Expected the board to detonate".into());
    }

    println!("  Post-mortem with mine locations:");
    print_indented(&BoardFormatter::format_view_with_mines(
        &board.view(),
        &board.mine_positions(),
    ));

    // Frozen: further moves change nothing
    board.open(0, 1);
    board.mark_mine(1, 0);
    println!("  ✅ Board frozen after detonation\n");
    Ok(())
}

fn print_matrix(label: &str, rows: &[Vec<f64>]) {
    println!("  {}:", label);
    for row in rows {
        let cells: Vec<String> = row.iter().map(|value| format!("{:4.1}", value)).collect();
        println!("    [{}]", cells.join(" "));
    }
}

fn print_indented(text: &str) {
    for line in text.lines() {
        println!("    {}", line);
    }
}
