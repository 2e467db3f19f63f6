//! Right-hand side validation for linear solvers.

use numa_value::{
    dimension_mismatch, rank_mismatch, type_mismatch, DenseMatrix, MathResult, Matrix, Value,
};

/// Validate `m` as a square system matrix and return `b` as a dense
/// `n x 1` column.
///
/// `b` may be a 1-D vector of length `n` or an `n x 1` matrix of either
/// storage.
pub fn to_column_vector(m: &Value, b: &Value) -> MathResult<DenseMatrix> {
    let system = m
        .as_matrix()
        .ok_or_else(|| type_mismatch("Matrix", m.type_name()))?;
    let &[rows, columns] = system.size() else {
        return Err(rank_mismatch(system.rank(), 2));
    };
    if rows != columns {
        return Err(dimension_mismatch(system.size(), &[rows, rows]));
    }

    let column = match b {
        Value::Dense(v) => match *v.size() {
            [n] if n == rows => v.reshape(&[rows, 1])?,
            [n, 1] if n == rows => (**v).clone(),
            _ => return Err(dimension_mismatch(v.size(), &[rows, 1])),
        },
        Value::Sparse(v) if v.size() == [rows, 1].as_slice() => v.to_dense(),
        Value::Sparse(v) => return Err(dimension_mismatch(v.size(), &[rows, 1])),
        other => return Err(type_mismatch("vector", other.type_name())),
    };
    Ok(column)
}
