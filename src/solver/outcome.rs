//! Solve pass results and statistics

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Terminal classification of a single solve pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveOutcome {
    /// At least one cell was marked or opened
    Progress,
    /// Equations were processed but none admitted a certain conclusion
    Stalled,
    /// No revealed cell had an unresolved neighbor, so nothing to deduce
    NoEquations,
    /// The board was empty or not rectangular
    InvalidBoard,
    /// An internal indexing or numeric failure was contained
    NumericFailure,
}

impl SolveOutcome {
    /// Whether the pass changed the board
    pub fn progressed(&self) -> bool {
        matches!(self, SolveOutcome::Progress)
    }
}

impl fmt::Display for SolveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SolveOutcome::Progress => "progress",
            SolveOutcome::Stalled => "stalled",
            SolveOutcome::NoEquations => "no equations",
            SolveOutcome::InvalidBoard => "invalid board",
            SolveOutcome::NumericFailure => "numeric failure",
        };
        write!(f, "{}", label)
    }
}

/// Statistics for a single solve pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveReport {
    /// Pass counter supplied by the caller, drives the reduction bypass
    pub iteration: usize,
    pub outcome: SolveOutcome,
    /// Frontier variables tracked this pass
    pub variables: usize,
    /// Constraint equations built this pass
    pub equations: usize,
    /// Whether the equations went through row reduction before deduction
    pub used_reduction: bool,
    pub cells_marked: usize,
    pub cells_opened: usize,
    /// Time taken by this pass
    #[serde(skip)]
    pub solve_time: Duration,
}

impl SolveReport {
    /// Whether the pass changed the board
    pub fn progressed(&self) -> bool {
        self.outcome.progressed()
    }
}

impl fmt::Display for SolveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pass {} ({}):", self.iteration, self.outcome)?;
        writeln!(f, "  Variables: {}", self.variables)?;
        writeln!(f, "  Equations: {}", self.equations)?;
        writeln!(
            f,
            "  Reduction: {}",
            if self.used_reduction { "applied" } else { "bypassed" }
        )?;
        writeln!(f, "  Cells marked: {}", self.cells_marked)?;
        writeln!(f, "  Cells opened: {}", self.cells_opened)?;
        writeln!(f, "  Time: {:.3}ms", self.solve_time.as_secs_f64() * 1000.0)?;
        Ok(())
    }
}

/// Why a solve run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunDisposition {
    /// Every cell is revealed or marked
    Solved,
    /// A mine was opened
    Detonated,
    /// No pass could make further progress, even with the reduction bypass
    Stalled,
    /// The configured pass budget ran out
    PassLimit,
}

/// Summary of a complete solve run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub disposition: RunDisposition,
    pub passes: usize,
    pub cells_marked: usize,
    pub cells_opened: usize,
    /// Per-pass reports in order, kept when tracing is enabled
    pub trace: Vec<SolveReport>,
    #[serde(skip)]
    pub total_time: Duration,
}

impl RunSummary {
    /// Whether the run finished with a fully resolved board
    pub fn solved(&self) -> bool {
        self.disposition == RunDisposition::Solved
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.disposition {
            RunDisposition::Solved => "solved",
            RunDisposition::Detonated => "detonated",
            RunDisposition::Stalled => "stalled",
            RunDisposition::PassLimit => "pass limit reached",
        };
        writeln!(f, "Run Summary:")?;
        writeln!(f, "  Disposition: {}", label)?;
        writeln!(f, "  Passes: {}", self.passes)?;
        writeln!(f, "  Cells marked: {}", self.cells_marked)?;
        writeln!(f, "  Cells opened: {}", self.cells_opened)?;
        writeln!(f, "  Total time: {:.3}s", self.total_time.as_secs_f64())?;
        Ok(())
    }
}
