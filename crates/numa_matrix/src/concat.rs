//! Joining matrices and building matrices from vectors.

use numa_value::{
    dimension_mismatch, index_out_of_bounds, invalid_matrix, rank_mismatch, type_mismatch,
    DenseMatrix, MathResult, Matrix, Value,
};

/// Concatenate matrices along `dim` (zero based, default the last axis).
///
/// Every operand must have the same rank and agree on every other axis.
/// The result is dense.
pub fn concat(operands: &[Value], dim: Option<usize>) -> MathResult<DenseMatrix> {
    let matrices = operands
        .iter()
        .map(dense_copy)
        .collect::<MathResult<Vec<_>>>()?;
    let Some(first) = matrices.first() else {
        return Err(invalid_matrix("at least one matrix is required"));
    };
    let rank = first.rank();
    let dim = dim.unwrap_or(rank - 1);
    if dim >= rank {
        return Err(index_out_of_bounds(dim, rank));
    }

    let mut size = first.size().to_vec();
    for matrix in &matrices[1..] {
        if matrix.rank() != rank {
            return Err(rank_mismatch(matrix.rank(), rank));
        }
        let agrees = matrix
            .size()
            .iter()
            .zip(first.size())
            .enumerate()
            .all(|(axis, (a, b))| axis == dim || a == b);
        if !agrees {
            return Err(dimension_mismatch(matrix.size(), first.size()));
        }
        size[dim] += matrix.size()[dim];
    }

    // Row-major blocks: `outer` slabs, each the concatenation of one
    // `extent * inner` block per operand.
    let outer: usize = size[..dim].iter().product();
    let inner: usize = size[dim + 1..].iter().product();
    let mut data = Vec::with_capacity(size.iter().product());
    for o in 0..outer {
        for matrix in &matrices {
            let block = matrix.size()[dim] * inner;
            data.extend_from_slice(&matrix.data()[o * block..(o + 1) * block]);
        }
    }
    DenseMatrix::new(data, size)
}

/// Matrix whose rows are the given vectors.
///
/// A vector is a 1-D matrix, a `1 x n` row or an `n x 1` column; all must
/// have the same length.
pub fn matrix_from_rows(vectors: &[Value]) -> MathResult<DenseMatrix> {
    let rows = vector_elements(vectors)?;
    DenseMatrix::from_rows(rows)
}

/// Matrix whose columns are the given vectors.
pub fn matrix_from_columns(vectors: &[Value]) -> MathResult<DenseMatrix> {
    matrix_from_rows(vectors)?.transpose()
}

fn vector_elements(vectors: &[Value]) -> MathResult<Vec<Vec<Value>>> {
    let Some(first) = vectors.first() else {
        return Err(invalid_matrix("at least one vector is required"));
    };
    let expected = vector_length(first)?;
    vectors
        .iter()
        .map(|vector| {
            let len = vector_length(vector)?;
            if len != expected {
                return Err(dimension_mismatch(&[len], &[expected]));
            }
            Ok(dense_copy(vector)?.into_data())
        })
        .collect()
}

fn vector_length(value: &Value) -> MathResult<usize> {
    let matrix = value
        .as_matrix()
        .ok_or_else(|| type_mismatch("vector", value.type_name()))?;
    match *matrix.size() {
        [n] | [1, n] | [n, 1] => Ok(n),
        [_, _] => Err(type_mismatch("vector", "matrix")),
        _ => Err(rank_mismatch(matrix.rank(), 2)),
    }
}

fn dense_copy(value: &Value) -> MathResult<DenseMatrix> {
    match value {
        Value::Dense(m) => Ok((**m).clone()),
        Value::Sparse(m) => Ok(m.to_dense()),
        other => Err(type_mismatch("Matrix", other.type_name())),
    }
}
