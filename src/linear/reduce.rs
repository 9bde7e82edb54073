//! Gauss-Jordan reduction to reduced row-echelon form

/// Numeric tolerance sized for this solver's matrices.
///
/// Currently unapplied: pivot selection compares against zero exactly, so
/// any nonzero value is accepted as a pivot no matter how small. With unit
/// coefficients and at most eight variables per constraint, eliminations
/// stay on dyadic rationals and exact comparison is sufficient. Switching
/// the pivot test to this threshold would change which columns pivot on
/// near-degenerate systems.
pub const PIVOT_TOLERANCE: f64 = 1e-10;

/// Reduce a matrix to reduced row-echelon form.
///
/// The final column of each row is the right-hand side: it participates in
/// every row operation but is never selected as a pivot. When no pivot can
/// be found in the remaining coefficient columns the matrix is returned as
/// reduced so far. Rows must all have the same length.
pub fn row_reduce(mut matrix: Vec<Vec<f64>>) -> Vec<Vec<f64>> {
    let row_count = matrix.len();
    if row_count == 0 {
        return matrix;
    }
    let column_count = matrix[0].len();
    if column_count < 2 {
        return matrix;
    }
    let pivot_columns = column_count - 1;

    let mut lead = 0;
    for r in 0..row_count {
        if lead >= pivot_columns {
            return matrix;
        }

        // Find a row at or below r with a nonzero entry in the lead column,
        // advancing the lead column whenever the search comes up empty
        let mut i = r;
        while matrix[i][lead] == 0.0 {
            i += 1;
            if i == row_count {
                i = r;
                lead += 1;
                if lead == pivot_columns {
                    return matrix;
                }
            }
        }
        matrix.swap(i, r);

        // Normalize the pivot row
        let pivot = matrix[r][lead];
        for value in matrix[r].iter_mut() {
            *value /= pivot;
        }

        // Eliminate the lead column from every other row
        for j in 0..row_count {
            if j == r {
                continue;
            }
            let factor = matrix[j][lead];
            if factor != 0.0 {
                for c in 0..column_count {
                    matrix[j][c] -= factor * matrix[r][c];
                }
            }
        }

        lead += 1;
    }

    matrix
}
