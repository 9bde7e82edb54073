//! Bidirectional mapping between board positions and equation columns

use std::collections::HashMap;
use thiserror::Error;

/// Lookup failures for the position/column bijection
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IndexError {
    #[error("Position {0} is not tracked by the variable index")]
    UntrackedPosition(usize),
    #[error("Column {0} is not tracked by the variable index")]
    UntrackedColumn(usize),
}

/// Bijection between flattened board positions and dense equation columns.
///
/// Positions are `row * cols + col` on the board the index was built from;
/// columns are the coefficient slots of the equation matrix. Every pairing
/// is exclusive in both directions.
#[derive(Debug, Clone, Default)]
pub struct VariableIndex {
    position_to_column: HashMap<usize, usize>,
    column_to_position: HashMap<usize, usize>,
}

impl VariableIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pairing, evicting any prior pairing of either key.
    ///
    /// Afterwards `position` maps to `column` and back, and whatever either
    /// of them was previously paired with is no longer tracked.
    pub fn insert(&mut self, position: usize, column: usize) {
        if let Some(old_column) = self.position_to_column.remove(&position) {
            self.column_to_position.remove(&old_column);
        }
        if let Some(old_position) = self.column_to_position.remove(&column) {
            self.position_to_column.remove(&old_position);
        }
        self.position_to_column.insert(position, column);
        self.column_to_position.insert(column, position);
    }

    /// Remove a pairing by position, doing nothing if it is absent
    pub fn remove(&mut self, position: usize) {
        if let Some(column) = self.position_to_column.remove(&position) {
            self.column_to_position.remove(&column);
        }
    }

    /// Number of tracked pairings
    pub fn len(&self) -> usize {
        self.position_to_column.len()
    }

    /// Whether no pairing is tracked
    pub fn is_empty(&self) -> bool {
        self.position_to_column.is_empty()
    }

    /// Whether a position is tracked
    pub fn contains_position(&self, position: usize) -> bool {
        self.position_to_column.contains_key(&position)
    }

    /// Column assigned to a position
    pub fn column_of(&self, position: usize) -> Result<usize, IndexError> {
        self.position_to_column
            .get(&position)
            .copied()
            .ok_or(IndexError::UntrackedPosition(position))
    }

    /// Position assigned to a column
    pub fn position_of(&self, column: usize) -> Result<usize, IndexError> {
        self.column_to_position
            .get(&column)
            .copied()
            .ok_or(IndexError::UntrackedColumn(column))
    }

    /// All tracked positions, in no particular order
    pub fn positions(&self) -> Vec<usize> {
        self.position_to_column.keys().copied().collect()
    }
}
