//! Multi-pass solve loop over a minefield

use crate::board::Minefield;
use crate::solver::engine::{solve_detailed, RAW_PASS_ITERATION, REDUCED_PASS_ITERATION};
use crate::solver::outcome::{RunDisposition, RunSummary, SolveReport};
use std::time::{Duration, Instant};

/// Knobs for a driver run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Hard cap on solve passes, counting forced retries
    pub max_passes: usize,
    /// Whether a fruitless pass earns one immediate retry under the
    /// opposite reduction treatment before the stall becomes final
    pub forced_bypass_retry: bool,
    /// Whether per-pass reports are collected into the summary trace
    pub keep_trace: bool,
    /// Whether each pass prints a progress line
    pub verbose: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            max_passes: 256,
            forced_bypass_retry: true,
            keep_trace: false,
            verbose: false,
        }
    }
}

/// Run deduction passes until the board is solved, a mine goes off, the
/// solver stalls for good, or the pass budget runs out.
///
/// The iteration counter the passes see increases by one per regular
/// pass, which makes every third pass a raw one. A fruitless pass earns
/// one forced retry under the opposite reduction treatment at a fixed
/// iteration value, without advancing the counter; a stall only becomes
/// final after both readings of the same position come up empty.
pub fn run(board: &mut Minefield, options: &RunOptions) -> RunSummary {
    let start_time = Instant::now();
    let mut summary = RunSummary {
        disposition: RunDisposition::Stalled,
        passes: 0,
        cells_marked: 0,
        cells_opened: 0,
        trace: Vec::new(),
        total_time: Duration::default(),
    };
    let mut iteration = 0;

    summary.disposition = loop {
        if board.is_detonated() {
            break RunDisposition::Detonated;
        }
        if board.is_solved() {
            break RunDisposition::Solved;
        }
        if summary.passes >= options.max_passes {
            break RunDisposition::PassLimit;
        }

        let report = solve_detailed(board, iteration);
        iteration += 1;
        let progressed = report.progressed();
        let was_reduced = report.used_reduction;
        record(&mut summary, report, options);

        if progressed {
            continue;
        }

        if options.forced_bypass_retry {
            if summary.passes >= options.max_passes {
                break settle(board, RunDisposition::PassLimit);
            }
            let retry_iteration = if was_reduced {
                RAW_PASS_ITERATION
            } else {
                REDUCED_PASS_ITERATION
            };
            let retry = solve_detailed(board, retry_iteration);
            let retried = retry.progressed();
            record(&mut summary, retry, options);
            if retried {
                continue;
            }
        }

        break settle(board, RunDisposition::Stalled);
    };

    summary.total_time = start_time.elapsed();
    summary
}

/// Prefer a terminal board state over the loop's own reason for stopping.
/// A pass can open a mine without changing the visible board, so the
/// detonation check has to run again on the way out.
fn settle(board: &Minefield, fallback: RunDisposition) -> RunDisposition {
    if board.is_detonated() {
        RunDisposition::Detonated
    } else if board.is_solved() {
        RunDisposition::Solved
    } else {
        fallback
    }
}

fn record(summary: &mut RunSummary, report: SolveReport, options: &RunOptions) {
    summary.passes += 1;
    summary.cells_marked += report.cells_marked;
    summary.cells_opened += report.cells_opened;
    if options.verbose {
        println!(
            "Pass {}: {} ({} marked, {} opened)",
            report.iteration, report.outcome, report.cells_marked, report.cells_opened
        );
    }
    if options.keep_trace {
        summary.trace.push(report);
    }
}
