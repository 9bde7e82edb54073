//! File I/O for board snapshots and mine layouts

use super::state::{BoardView, CellState};
use anyhow::{Context, Result};
use std::path::Path;

/// Load a board snapshot from a text file.
/// Format: one row per line, digits for revealed counts, '*' for
/// unrevealed cells and '+' for marked mines
pub fn load_view_from_file<P: AsRef<Path>>(path: P) -> Result<BoardView> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read board file: {}", path.as_ref().display()))?;

    parse_view(&content)
        .with_context(|| format!("Failed to parse board from file: {}", path.as_ref().display()))
}

/// Parse a board snapshot from its string representation
pub fn parse_view(content: &str) -> Result<BoardView> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Board file is empty or contains no valid rows");
    }

    let cols = lines[0].len();
    let mut cells = Vec::with_capacity(lines.len());

    for (row_idx, line) in lines.iter().enumerate() {
        if line.len() != cols {
            anyhow::bail!(
                "Row {} has length {}, expected {} (all rows must have the same length)",
                row_idx,
                line.len(),
                cols
            );
        }

        let mut row = Vec::with_capacity(cols);
        for (col_idx, ch) in line.chars().enumerate() {
            let state = match ch {
                '*' => CellState::Unrevealed,
                '+' => CellState::MarkedMine,
                '0'..='8' => CellState::Revealed(ch as u8 - b'0'),
                _ => anyhow::bail!(
                    "Invalid character '{}' at position ({}, {}). Expected a digit, '*' or '+'",
                    ch,
                    row_idx,
                    col_idx
                ),
            };
            row.push(state);
        }
        cells.push(row);
    }

    BoardView::from_rows(cells)
}

/// Save a board snapshot to a text file
pub fn save_view_to_file<P: AsRef<Path>>(view: &BoardView, path: P) -> Result<()> {
    let content = view.to_string();

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write board to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Load a mine layout from a text file.
/// Format: one row per line, '1' for mines and '0' for clear cells
pub fn load_layout_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<bool>>> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read layout file: {}", path.as_ref().display()))?;

    parse_layout(&content)
        .with_context(|| format!("Failed to parse layout from file: {}", path.as_ref().display()))
}

/// Parse a mine layout from its string representation
pub fn parse_layout(content: &str) -> Result<Vec<Vec<bool>>> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Layout file is empty or contains no valid rows");
    }

    let cols = lines[0].len();
    let mut rows = Vec::with_capacity(lines.len());

    for (row_idx, line) in lines.iter().enumerate() {
        if line.len() != cols {
            anyhow::bail!(
                "Row {} has length {}, expected {} (all rows must have the same length)",
                row_idx,
                line.len(),
                cols
            );
        }

        let mut row = Vec::with_capacity(cols);
        for (col_idx, ch) in line.chars().enumerate() {
            match ch {
                '0' => row.push(false),
                '1' => row.push(true),
                _ => anyhow::bail!(
                    "Invalid character '{}' at position ({}, {}). Only '0' and '1' are allowed",
                    ch,
                    row_idx,
                    col_idx
                ),
            }
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Save a mine layout to a text file
pub fn save_layout_to_file<P: AsRef<Path>>(layout: &[Vec<bool>], path: P) -> Result<()> {
    let mut content = String::new();
    for row in layout {
        for &mined in row {
            content.push(if mined { '1' } else { '0' });
        }
        content.push('\n');
    }

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write layout to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Create example board and layout files for the setup command
pub fn create_example_states<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    // Center mine with its full ring of hints revealed
    let ring_content = "111\n1*1\n111\n";
    std::fs::write(dir.join("ring.txt"), ring_content)
        .context("Failed to write ring.txt")?;

    // Opening position on a corner-mine board
    let corner_content = "***\n***\n**0\n";
    std::fs::write(dir.join("corner_opening.txt"), corner_content)
        .context("Failed to write corner_opening.txt")?;

    // A position no certain deduction can crack
    let stalled_content = "2*\n**\n";
    std::fs::write(dir.join("stalled.txt"), stalled_content)
        .context("Failed to write stalled.txt")?;

    // Layout behind the corner opening board
    let corner_layout = "100\n000\n000\n";
    std::fs::write(dir.join("corner.layout.txt"), corner_layout)
        .context("Failed to write corner.layout.txt")?;

    Ok(())
}
