//! Elementwise strategies, one per storage pair.

mod dense_dense;
mod dense_sparse;
mod matrix_scalar;
mod sparse_sparse;

use numa_value::matrix::validate_same_size;
use numa_value::{ElementKind, MathResult, Matrix, SparseMatrix, Value};

use crate::combine::{Combiner, ScalarOp};

/// Apply `op` to every aligned pair of elements of `a` and `b`.
///
/// Two matrices must have equal rank and extents; a mismatch reports the
/// left size as actual and the right size as expected. A scalar operand is
/// broadcast. Two scalars are passed to `op` directly. Operands are never
/// modified.
#[tracing::instrument(
    level = "trace",
    skip(op, a, b),
    fields(op = op.name(), left = a.type_name(), right = b.type_name())
)]
pub fn elementwise(op: ScalarOp<'_>, a: &Value, b: &Value) -> MathResult {
    match (a, b) {
        (Value::Dense(x), Value::Dense(y)) => {
            validate_same_size(x.size(), y.size())?;
            tracing::trace!(strategy = "dense_dense");
            dense_dense::combine(op, x, y).map(Value::dense)
        }
        (Value::Dense(x), Value::Sparse(y)) => {
            validate_same_size(x.size(), y.size())?;
            tracing::trace!(strategy = "dense_sparse");
            dense_sparse::combine(op, x, y, false)
        }
        (Value::Sparse(x), Value::Dense(y)) => {
            validate_same_size(x.size(), y.size())?;
            tracing::trace!(strategy = "dense_sparse", reversed = true);
            dense_sparse::combine(op, y, x, true)
        }
        (Value::Sparse(x), Value::Sparse(y)) => {
            validate_same_size(x.size(), y.size())?;
            tracing::trace!(strategy = "sparse_sparse");
            sparse_sparse::combine(op, x, y)
        }
        (matrix, scalar) if matrix.is_matrix() => {
            tracing::trace!(strategy = "matrix_scalar");
            matrix_scalar::combine(op, matrix, scalar, false)
        }
        (scalar, matrix) if matrix.is_matrix() => {
            tracing::trace!(strategy = "matrix_scalar", reversed = true);
            matrix_scalar::combine(op, matrix, scalar, true)
        }
        (x, y) => op.call(x, y),
    }
}

/// Sparse result. When no entry survived, the declared datatype is the kind
/// of `op(0, 0)`, falling back to the homogenized kind.
fn sparse_result(
    values: Vec<Value>,
    index: Vec<usize>,
    ptr: Vec<usize>,
    size: [usize; 2],
    combiner: &Combiner<'_>,
) -> MathResult {
    let matrix = SparseMatrix::from_parts(values, index, ptr, size)?;
    Ok(Value::sparse(declare_if_empty(matrix, combiner)))
}

fn declare_if_empty(matrix: SparseMatrix, combiner: &Combiner<'_>) -> SparseMatrix {
    if matrix.nnz() > 0 {
        return matrix;
    }
    let kind = combiner
        .zero_result()
        .map(|zero| zero.kind())
        .or_else(|| combiner.kind());
    matrix.with_datatype(kind.map_or(ElementKind::Mixed, ElementKind::Uniform))
}

#[cfg(test)]
mod tests;
