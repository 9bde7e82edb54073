//! Solve orchestration: the single-pass engine and the multi-pass driver

pub mod driver;
pub mod engine;
pub mod outcome;

pub use driver::{run, RunOptions};
pub use engine::{
    should_bypass_reduction, solve, solve_detailed, RAW_PASS_ITERATION, REDUCED_PASS_ITERATION,
};
pub use outcome::{RunDisposition, RunSummary, SolveOutcome, SolveReport};
