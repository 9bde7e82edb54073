//! Configuration management for the minesweeper solver

pub mod settings;

pub use settings::{
    BoardConfig, CliOverrides, FirstOpen, OutputConfig, OutputFormat, Settings, SolverConfig,
};
