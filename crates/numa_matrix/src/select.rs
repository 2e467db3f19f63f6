//! Row, column and subset selection.

use numa_value::{
    index_out_of_bounds, not_indexable, rank_mismatch, type_mismatch, Index, IndexDim,
    MathResult, Matrix, Value,
};

/// How an object is accessed.
#[derive(Clone, Copy, Debug)]
pub enum Selector<'a> {
    /// Positional subset.
    Index(&'a Index),
    /// Named property.
    Property(&'a str),
}

/// Row `i` of a two-dimensional matrix, as a `1 x n` matrix of the same
/// storage.
pub fn row(value: &Value, i: usize) -> MathResult {
    let matrix = two_dimensional(value)?;
    let [rows, columns] = [matrix.size()[0], matrix.size()[1]];
    if i >= rows {
        return Err(index_out_of_bounds(i, rows));
    }
    matrix.subset(&Index::new(vec![
        IndexDim::Scalar(i),
        IndexDim::range(0, columns),
    ])?)
}

/// Column `j` of a two-dimensional matrix, as an `m x 1` matrix of the same
/// storage.
pub fn column(value: &Value, j: usize) -> MathResult {
    let matrix = two_dimensional(value)?;
    let [rows, columns] = [matrix.size()[0], matrix.size()[1]];
    if j >= columns {
        return Err(index_out_of_bounds(j, columns));
    }
    matrix.subset(&Index::new(vec![
        IndexDim::range(0, rows),
        IndexDim::Scalar(j),
    ])?)
}

fn two_dimensional(value: &Value) -> MathResult<&dyn Matrix> {
    let matrix = value
        .as_matrix()
        .ok_or_else(|| type_mismatch("Matrix", value.type_name()))?;
    if matrix.rank() != 2 {
        return Err(rank_mismatch(matrix.rank(), 2));
    }
    Ok(matrix)
}

/// Read `object` through `selector`.
///
/// Matrices take an index; text takes a one-dimensional index and yields
/// the selected characters. Nothing here has named properties.
pub fn access(object: &Value, selector: Selector<'_>) -> MathResult {
    match (object, selector) {
        (Value::Dense(m), Selector::Index(index)) => m.subset(index),
        (Value::Sparse(m), Selector::Index(index)) => m.subset(index),
        (Value::Text(text), Selector::Index(index)) => {
            let chars: Vec<char> = text.chars().collect();
            index.validate(&[chars.len()])?;
            Ok(Value::text(
                index.dims()[0]
                    .positions()
                    .into_iter()
                    .map(|i| chars[i])
                    .collect::<String>(),
            ))
        }
        (Value::Dense(_) | Value::Sparse(_) | Value::Text(_), Selector::Property(_)) => {
            Err(type_mismatch("Index", "property name"))
        }
        (other, _) => Err(not_indexable(other.type_name())),
    }
}
