use numa_value::{DenseMatrix, MathResult, Matrix};

use crate::combine::{Combiner, ScalarOp};

/// Lockstep over linear positions; sizes are already validated.
pub(super) fn combine(op: ScalarOp<'_>, a: &DenseMatrix, b: &DenseMatrix) -> MathResult<DenseMatrix> {
    let combiner = Combiner::new(op, a.datatype(), b.datatype());
    let data = a
        .data()
        .iter()
        .zip(b.data())
        .map(|(x, y)| combiner.apply(x, y))
        .collect::<MathResult<Vec<_>>>()?;
    DenseMatrix::new(data, a.size().to_vec())
}
