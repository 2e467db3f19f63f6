//! Column scatter/gather workspaces for merging sparse columns.
//!
//! A [`Workspace`] holds one slot per row. Scattering column `j` writes each
//! stored entry into its row slot and tags it with a mark; reading a slot
//! only succeeds when its tag equals the current mark. Using `j + 1` as the
//! mark for column `j` makes entries of earlier columns stale without ever
//! clearing the workspace.

use numa_value::{SparseMatrix, Value};

/// Generation-marked dense scratch column.
#[derive(Clone, Debug)]
pub struct Workspace {
    marks: Vec<usize>,
    values: Vec<Value>,
}

impl Workspace {
    /// Workspace for columns of `rows` entries. Every slot starts unmarked.
    pub fn new(rows: usize) -> Self {
        Workspace {
            marks: vec![0; rows],
            values: vec![Value::Number(0.0); rows],
        }
    }

    /// Mark used for column `j`.
    #[inline]
    pub const fn mark_for(j: usize) -> usize {
        j + 1
    }

    /// Write the stored entries of column `j` of `matrix` under `mark`.
    pub fn scatter(&mut self, matrix: &SparseMatrix, j: usize, mark: usize) {
        for (i, value) in matrix.column_entries(j) {
            self.marks[i] = mark;
            self.values[i] = value.clone();
        }
    }

    /// Value written to row `i` under `mark`, if any.
    #[inline]
    pub fn get(&self, i: usize, mark: usize) -> Option<&Value> {
        (self.marks[i] == mark).then(|| &self.values[i])
    }
}

/// Sorted union of the stored rows of column `j` in `a` and `b`, written to
/// `rows` (cleared first).
pub fn union_rows(a: &SparseMatrix, b: &SparseMatrix, j: usize, rows: &mut Vec<usize>) {
    rows.clear();
    let mut left = a.column_entries(j).map(|(i, _)| i).peekable();
    let mut right = b.column_entries(j).map(|(i, _)| i).peekable();
    loop {
        let next = match (left.peek(), right.peek()) {
            (Some(&x), Some(&y)) if x == y => {
                left.next();
                right.next();
                x
            }
            (Some(&x), Some(&y)) if x < y => {
                left.next();
                x
            }
            (Some(_), Some(&y)) => {
                right.next();
                y
            }
            (Some(&x), None) => {
                left.next();
                x
            }
            (None, Some(&y)) => {
                right.next();
                y
            }
            (None, None) => break,
        };
        rows.push(next);
    }
}

#[cfg(test)]
mod tests;
