//! Display and output formatting utilities

use crate::board::{BoardView, CellState};

/// Format board snapshots for console output
pub struct BoardFormatter;

impl BoardFormatter {
    /// Symbol for one cell: digits for hints with '.' standing in for
    /// zero, '*' unrevealed, '+' marked
    fn cell_symbol(state: CellState) -> char {
        match state {
            CellState::Unrevealed => '*',
            CellState::MarkedMine => '+',
            CellState::Revealed(0) => '.',
            CellState::Revealed(count) => (b'0' + count) as char,
        }
    }

    /// Format a snapshot in compact form
    pub fn format_view_compact(view: &BoardView) -> String {
        let mut output = String::new();
        for row in 0..view.rows {
            for col in 0..view.cols {
                output.push(Self::cell_symbol(view.get(row, col)));
            }
            output.push('\n');
        }
        output
    }

    /// Format a snapshot with row and column coordinates
    pub fn format_view_with_coords(view: &BoardView) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for col in 0..view.cols {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        // Rows with row numbers
        for row in 0..view.rows {
            output.push_str(&format!("{:2} ", row));
            for col in 0..view.cols {
                output.push(' ');
                output.push(Self::cell_symbol(view.get(row, col)));
            }
            output.push('\n');
        }

        output
    }

    /// Format a snapshot with the mine layout overlaid: unmarked mines
    /// show as 'X', everything else as usual. Used for the post-mortem
    /// after a detonation.
    pub fn format_view_with_mines(view: &BoardView, mines: &[(usize, usize)]) -> String {
        let mut output = String::new();
        for row in 0..view.rows {
            for col in 0..view.cols {
                let state = view.get(row, col);
                if mines.contains(&(row, col)) && state != CellState::MarkedMine {
                    output.push('X');
                } else {
                    output.push(Self::cell_symbol(state));
                }
            }
            output.push('\n');
        }
        output
    }
}

const RESET: &str = "\x1b[0m";

/// ANSI coloring for status lines, honoring NO_COLOR and dumb terminals
pub struct ColorOutput;

impl ColorOutput {
    /// Wrap text in a color escape unless the terminal opted out
    pub fn colored(text: &str, color: Color) -> String {
        if color_enabled() {
            format!("{}{}{}", color.escape(), text, RESET)
        } else {
            text.to_string()
        }
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

fn color_enabled() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    match std::env::var("TERM") {
        Ok(term) => term != "dumb",
        Err(_) => true,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn escape(self) -> &'static str {
        match self {
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Yellow => "\x1b[33m",
            Color::Blue => "\x1b[34m",
        }
    }
}
