use numa_value::{rank_relation, type_mismatch, DenseMatrix, MathResult, Matrix, Relation, Value};

use crate::combine::{Combiner, ScalarOp};

/// Kronecker product of two matrices of rank at most 2. Vectors count as
/// `1 x n`. Element products are `multiply` applied to each pair.
pub fn kron(multiply: ScalarOp<'_>, a: &Value, b: &Value) -> MathResult<DenseMatrix> {
    let (a, b) = (as_grid(a)?, as_grid(b)?);
    let ([ra, ca], [rb, cb]) = (grid_size(&a), grid_size(&b));
    let combiner = Combiner::new(multiply, a.datatype(), b.datatype());

    let (rows, columns) = (ra * rb, ca * cb);
    let mut data = Vec::with_capacity(rows * columns);
    for ia in 0..ra {
        for ib in 0..rb {
            for ja in 0..ca {
                let x = &a.data()[ia * ca + ja];
                for jb in 0..cb {
                    data.push(combiner.apply(x, &b.data()[ib * cb + jb])?);
                }
            }
        }
    }
    DenseMatrix::new(data, vec![rows, columns])
}

fn as_grid(value: &Value) -> MathResult<DenseMatrix> {
    let dense = match value {
        Value::Dense(m) => (**m).clone(),
        Value::Sparse(m) => m.to_dense(),
        other => return Err(type_mismatch("Matrix", other.type_name())),
    };
    match *dense.size() {
        [n] => dense.reshape(&[1, n]),
        [_, _] => Ok(dense),
        _ => Err(rank_relation(dense.rank(), 2, Relation::Greater)),
    }
}

fn grid_size(m: &DenseMatrix) -> [usize; 2] {
    [m.size()[0], m.size()[1]]
}
