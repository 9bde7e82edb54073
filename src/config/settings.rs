//! Configuration settings for the minesweeper solver

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub board: BoardConfig,
    pub solver: SolverConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
    pub mines: usize,
    /// Placement seed; omitted means a fresh random layout per run
    pub seed: Option<u64>,
    /// Explicit mine layout file; set, it takes precedence over the
    /// rows/cols/mines/seed generation knobs
    pub layout_file: Option<PathBuf>,
    pub first_open: FirstOpen,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FirstOpen {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    pub max_passes: usize,
    pub forced_bypass_retry: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub output_directory: PathBuf,
    pub save_trace: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board: BoardConfig {
                rows: 9,
                cols: 9,
                mines: 10,
                seed: None,
                layout_file: None,
                first_open: FirstOpen { row: 4, col: 4 },
            },
            solver: SolverConfig {
                max_passes: 256,
                forced_bypass_retry: true,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                output_directory: PathBuf::from("output/runs"),
                save_trace: false,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.solver.max_passes == 0 {
            anyhow::bail!("Maximum passes must be positive");
        }

        if let Some(ref layout_file) = self.board.layout_file {
            if !layout_file.exists() {
                anyhow::bail!("Layout file does not exist: {}", layout_file.display());
            }
            // Board shape comes from the file, the generation knobs are unused
            return Ok(());
        }

        if self.board.rows == 0 || self.board.cols == 0 {
            anyhow::bail!(
                "Board dimensions must be positive, got {}x{}",
                self.board.rows,
                self.board.cols
            );
        }
        if self.board.mines + 9 > self.board.rows * self.board.cols {
            anyhow::bail!(
                "{} mines cannot leave a safe first open on a {}x{} board",
                self.board.mines,
                self.board.rows,
                self.board.cols
            );
        }
        if self.board.first_open.row >= self.board.rows
            || self.board.first_open.col >= self.board.cols
        {
            anyhow::bail!(
                "First open ({}, {}) out of bounds for {}x{} board",
                self.board.first_open.row,
                self.board.first_open.col,
                self.board.rows,
                self.board.cols
            );
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(rows) = cli_overrides.rows {
            self.board.rows = rows;
        }
        if let Some(cols) = cli_overrides.cols {
            self.board.cols = cols;
        }
        if let Some(mines) = cli_overrides.mines {
            self.board.mines = mines;
        }
        if let Some(seed) = cli_overrides.seed {
            self.board.seed = Some(seed);
        }
        if let Some(ref layout_file) = cli_overrides.layout_file {
            self.board.layout_file = Some(layout_file.clone());
        }
        if let Some(max_passes) = cli_overrides.max_passes {
            self.solver.max_passes = max_passes;
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub mines: Option<usize>,
    pub seed: Option<u64>,
    pub layout_file: Option<PathBuf>,
    pub max_passes: Option<usize>,
    pub output_dir: Option<PathBuf>,
}
