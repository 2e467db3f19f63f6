use numa_value::{DenseMatrix, MathResult, Matrix, SparseMatrix, Value};

use crate::combine::{Combiner, ScalarOp};
use crate::scatter::{union_rows, Workspace};

use super::sparse_result;

/// Merge two sparse operands of the same size column by column.
///
/// When `op(0, 0)` is zero only the union of both patterns is visited and
/// the result is sparse; otherwise every position is visited and the
/// result is dense.
pub(super) fn combine(op: ScalarOp<'_>, a: &SparseMatrix, b: &SparseMatrix) -> MathResult {
    let combiner = Combiner::new(op, a.datatype(), b.datatype());
    let (rows, columns) = (a.rows(), a.columns());
    let mut wa = Workspace::new(rows);
    let mut wb = Workspace::new(rows);

    if combiner.preserves_zero() {
        let mut values = Vec::new();
        let mut index = Vec::new();
        let mut ptr = Vec::with_capacity(columns + 1);
        let mut union = Vec::new();
        for j in 0..columns {
            let mark = Workspace::mark_for(j);
            wa.scatter(a, j, mark);
            wb.scatter(b, j, mark);
            union_rows(a, b, j, &mut union);
            ptr.push(values.len());
            for &i in &union {
                let x = wa.get(i, mark).unwrap_or(combiner.zero_left());
                let y = wb.get(i, mark).unwrap_or(combiner.zero_right());
                let result = combiner.apply(x, y)?;
                if !result.is_zero() {
                    values.push(result);
                    index.push(i);
                }
            }
        }
        ptr.push(values.len());
        return sparse_result(values, index, ptr, [rows, columns], &combiner);
    }

    let mut data = vec![Value::Number(0.0); rows * columns];
    for j in 0..columns {
        let mark = Workspace::mark_for(j);
        wa.scatter(a, j, mark);
        wb.scatter(b, j, mark);
        for i in 0..rows {
            let x = wa.get(i, mark).unwrap_or(combiner.zero_left());
            let y = wb.get(i, mark).unwrap_or(combiner.zero_right());
            data[i * columns + j] = combiner.apply(x, y)?;
        }
    }
    DenseMatrix::new(data, vec![rows, columns]).map(Value::dense)
}
