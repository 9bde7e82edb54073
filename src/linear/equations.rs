//! Constraint equation construction from board snapshots

use crate::board::{BoardView, CellState};
use crate::linear::index_map::{IndexError, VariableIndex};

/// One linear constraint: a coefficient per tracked column, then the
/// right-hand side as the final element
pub type Equation = Vec<f64>;

/// Assign a dense column to every unrevealed neighbor of a revealed cell.
///
/// Cells are scanned in row-major order and columns are handed out in
/// discovery order, so the same snapshot always produces the same index.
/// Marked mines are never tracked; they are resolved, not variables.
pub fn index_frontier(view: &BoardView) -> VariableIndex {
    let mut index = VariableIndex::new();
    let mut next_column = 0;

    for row in 0..view.rows {
        for col in 0..view.cols {
            if !view.get(row, col).is_revealed() {
                continue;
            }
            for (nr, nc) in view.neighbors(row, col) {
                if view.get(nr, nc) == CellState::Unrevealed {
                    let position = view.index(nr, nc);
                    if !index.contains_position(position) {
                        index.insert(position, next_column);
                        next_column += 1;
                    }
                }
            }
        }
    }

    index
}

/// Build one equation per revealed cell that touches at least one tracked
/// variable.
///
/// Each marked-mine neighbor lowers the cell's count by one before it
/// becomes the right-hand side; each tracked neighbor contributes a unit
/// coefficient. The right-hand side may go negative on an inconsistent
/// board; no consistency check happens here.
pub fn build_equations(
    view: &BoardView,
    index: &VariableIndex,
) -> Result<Vec<Equation>, IndexError> {
    let width = index.len() + 1;
    let mut equations = Vec::new();

    for row in 0..view.rows {
        for col in 0..view.cols {
            let count = match view.get(row, col) {
                CellState::Revealed(count) => count,
                _ => continue,
            };

            let mut equation = vec![0.0; width];
            let mut rhs = count as f64;
            let mut tracked = 0;

            for (nr, nc) in view.neighbors(row, col) {
                match view.get(nr, nc) {
                    CellState::MarkedMine => rhs -= 1.0,
                    CellState::Unrevealed => {
                        let position = view.index(nr, nc);
                        if index.contains_position(position) {
                            equation[index.column_of(position)?] = 1.0;
                            tracked += 1;
                        }
                    }
                    CellState::Revealed(_) => {}
                }
            }

            if tracked > 0 {
                equation[width - 1] = rhs;
                equations.push(equation);
            }
        }
    }

    Ok(equations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_from_codes(codes: Vec<Vec<i8>>) -> BoardView {
        let cells = codes
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|code| CellState::from_code(code).unwrap())
                    .collect()
            })
            .collect();
        BoardView::from_rows(cells).unwrap()
    }

    #[test]
    fn test_frontier_discovery_order() {
        // Revealed 1 at the center, everything else unrevealed
        let view = view_from_codes(vec![
            vec![-1, -1, -1],
            vec![-1, 1, -1],
            vec![-1, -1, -1],
        ]);
        let index = index_frontier(&view);

        assert_eq!(index.len(), 8);
        // Neighbors of (1,1) in row-major offset order
        assert_eq!(index.column_of(view.index(0, 0)).unwrap(), 0);
        assert_eq!(index.column_of(view.index(0, 1)).unwrap(), 1);
        assert_eq!(index.column_of(view.index(0, 2)).unwrap(), 2);
        assert_eq!(index.column_of(view.index(1, 0)).unwrap(), 3);
        assert_eq!(index.column_of(view.index(1, 2)).unwrap(), 4);
        assert_eq!(index.column_of(view.index(2, 0)).unwrap(), 5);
        assert_eq!(index.column_of(view.index(2, 1)).unwrap(), 6);
        assert_eq!(index.column_of(view.index(2, 2)).unwrap(), 7);
    }

    #[test]
    fn test_frontier_skips_resolved_cells() {
        let view = view_from_codes(vec![
            vec![1, -2, -1],
            vec![0, 2, -1],
        ]);
        let index = index_frontier(&view);

        // Only the two unrevealed cells are variables
        assert_eq!(index.len(), 2);
        assert!(index.contains_position(view.index(0, 2)));
        assert!(index.contains_position(view.index(1, 2)));
        assert!(!index.contains_position(view.index(0, 1)));
    }

    #[test]
    fn test_frontier_ignores_isolated_unrevealed() {
        // The far column is unrevealed but touches no revealed cell
        let view = view_from_codes(vec![
            vec![0, -1, -1],
            vec![0, -1, -1],
        ]);
        let index = index_frontier(&view);

        assert_eq!(index.len(), 2);
        assert!(index.contains_position(view.index(0, 1)));
        assert!(index.contains_position(view.index(1, 1)));
        assert!(!index.contains_position(view.index(0, 2)));
    }

    #[test]
    fn test_single_equation() {
        let view = view_from_codes(vec![
            vec![-1, -1],
            vec![1, -1],
        ]);
        let index = index_frontier(&view);
        let equations = build_equations(&view, &index).unwrap();

        assert_eq!(equations.len(), 1);
        let equation = &equations[0];
        assert_eq!(equation.len(), index.len() + 1);
        // All three unrevealed neighbors carry coefficient 1
        assert_eq!(equation.iter().take(index.len()).sum::<f64>(), 3.0);
        assert_eq!(*equation.last().unwrap(), 1.0);
    }

    #[test]
    fn test_marked_neighbor_lowers_rhs() {
        let view = view_from_codes(vec![
            vec![-2, -1],
            vec![2, -1],
        ]);
        let index = index_frontier(&view);
        let equations = build_equations(&view, &index).unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(equations.len(), 1);
        assert_eq!(*equations[0].last().unwrap(), 1.0);
    }

    #[test]
    fn test_fully_resolved_cell_emits_nothing() {
        // The 1 cell only touches a marked mine, so it has no variables
        let view = view_from_codes(vec![
            vec![1, -2, 2, -1],
        ]);
        let index = index_frontier(&view);
        let equations = build_equations(&view, &index).unwrap();

        assert_eq!(index.len(), 1);
        assert_eq!(equations.len(), 1);
        assert_eq!(*equations[0].last().unwrap(), 1.0);
    }

    #[test]
    fn test_rhs_may_go_negative() {
        // Over-marked neighborhood: count 0 with a marked neighbor
        let view = view_from_codes(vec![
            vec![0, -2],
            vec![-1, -1],
        ]);
        let index = index_frontier(&view);
        let equations = build_equations(&view, &index).unwrap();

        assert_eq!(equations.len(), 1);
        assert_eq!(*equations[0].last().unwrap(), -1.0);
    }

    #[test]
    fn test_no_revealed_cells_no_equations() {
        let view = view_from_codes(vec![
            vec![-1, -1],
            vec![-1, -2],
        ]);
        let index = index_frontier(&view);
        let equations = build_equations(&view, &index).unwrap();

        assert!(index.is_empty());
        assert!(equations.is_empty());
    }
}
