use numa_value::{DenseMatrix, MathResult, Matrix, SparseMatrix, Value};

use crate::combine::{Combiner, ScalarOp};
use crate::scatter::Workspace;

/// Dense operand against sparse operand of the same size.
///
/// Absent sparse entries combine as the sparse side's zero. The result is
/// sparse when every position absent from `sparse` produced zero, dense
/// otherwise. With `reversed` the sparse operand is the left one.
pub(super) fn combine(
    op: ScalarOp<'_>,
    dense: &DenseMatrix,
    sparse: &SparseMatrix,
    reversed: bool,
) -> MathResult {
    let combiner = if reversed {
        Combiner::new(op, sparse.datatype(), dense.datatype())
    } else {
        Combiner::new(op, dense.datatype(), sparse.datatype())
    };
    let zero = if reversed {
        combiner.zero_left()
    } else {
        combiner.zero_right()
    };

    let (rows, columns) = (sparse.rows(), sparse.columns());
    let mut data = vec![Value::Number(0.0); rows * columns];
    let mut workspace = Workspace::new(rows);
    let mut fills_absent = false;
    for j in 0..columns {
        let mark = Workspace::mark_for(j);
        workspace.scatter(sparse, j, mark);
        for i in 0..rows {
            let offset = i * columns + j;
            let stored = workspace.get(i, mark);
            let s = stored.unwrap_or(zero);
            let d = &dense.data()[offset];
            let result = if reversed {
                combiner.apply(s, d)?
            } else {
                combiner.apply(d, s)?
            };
            if stored.is_none() && !result.is_zero() {
                fills_absent = true;
            }
            data[offset] = result;
        }
    }

    let result = DenseMatrix::new(data, vec![rows, columns])?;
    if fills_absent {
        Ok(Value::dense(result))
    } else {
        result.to_sparse().map(Value::sparse)
    }
}
