use numa_value::{MathResult, Matrix, Value};

use crate::combine::{Combiner, ScalarOp};

use super::declare_if_empty;

/// Broadcast `scalar` against every element of `matrix`. With `reversed`
/// the scalar is the left operand.
pub(super) fn combine(op: ScalarOp<'_>, matrix: &Value, scalar: &Value, reversed: bool) -> MathResult {
    let datatype = matrix
        .as_matrix()
        .map(|m| m.datatype())
        .unwrap_or_default();
    let combiner = if reversed {
        Combiner::scalar_with(op, scalar, datatype)
    } else {
        Combiner::with_scalar(op, datatype, scalar)
    };
    let apply = |x: &Value| {
        if reversed {
            combiner.apply(scalar, x)
        } else {
            combiner.apply(x, scalar)
        }
    };

    match matrix {
        Value::Dense(m) => m.map(|x, _| apply(x)).map(Value::dense),
        Value::Sparse(m) => {
            let zero = if reversed {
                combiner.zero_right()
            } else {
                combiner.zero_left()
            };
            let keeps_pattern = apply(zero).is_ok_and(|probe| probe.is_zero());
            tracing::trace!(keeps_pattern, "sparse broadcast");
            if keeps_pattern {
                let mapped = m.map_stored(|x, _, _| apply(x))?;
                Ok(Value::sparse(declare_if_empty(mapped, &combiner)))
            } else {
                m.to_dense().map(|x, _| apply(x)).map(Value::dense)
            }
        }
        other => apply(other),
    }
}
