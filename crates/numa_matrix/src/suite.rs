//! Matrix signatures that route a function's matrix arguments through the
//! elementwise algorithms.
//!
//! A binary function registers its scalar signatures plus
//! [`binary_signatures`]; the matrix implementations call back into the
//! same function through the [`Callee`] handle for every element pair.

use std::slice;

use numa_dispatch::{Callee, Dispatcher, Signature};
use numa_value::{wrong_arg_count, MathResult, Matrix, Value};

use crate::algorithms::elementwise;
use crate::combine::ScalarOp;

/// Storage pairs handled by the elementwise algorithms.
pub const BINARY_PATTERNS: [&str; 6] = [
    "DenseMatrix, DenseMatrix",
    "DenseMatrix, SparseMatrix",
    "SparseMatrix, DenseMatrix",
    "SparseMatrix, SparseMatrix",
    "Matrix, any",
    "any, Matrix",
];

/// Signatures applying the running function elementwise.
pub fn binary_signatures() -> MathResult<Vec<Signature>> {
    BINARY_PATTERNS
        .into_iter()
        .map(|text| Signature::parse(text, apply_elementwise))
        .collect()
}

/// Signatures mapping the running function over every element.
pub fn unary_signatures() -> MathResult<Vec<Signature>> {
    ["DenseMatrix", "SparseMatrix"]
        .into_iter()
        .map(|text| Signature::parse(text, map_elements))
        .collect()
}

/// Register `scalar` under `name`, followed by the binary matrix signatures.
pub fn register_binary(
    dispatcher: &mut Dispatcher,
    name: &str,
    scalar: Vec<Signature>,
) -> MathResult<()> {
    dispatcher.register(name, scalar)?;
    dispatcher.register(name, binary_signatures()?)
}

/// Register `scalar` under `name`, followed by the unary matrix signatures.
pub fn register_unary(
    dispatcher: &mut Dispatcher,
    name: &str,
    scalar: Vec<Signature>,
) -> MathResult<()> {
    dispatcher.register(name, scalar)?;
    dispatcher.register(name, unary_signatures()?)
}

fn apply_elementwise(callee: &Callee<'_>, args: &[Value]) -> MathResult {
    let [a, b] = args else {
        return Err(wrong_arg_count(callee.name(), args.len(), 2, Some(2)));
    };
    elementwise(ScalarOp::from_callee(callee), a, b)
}

/// Sparse operands keep their pattern when `f(0)` is zero and are
/// densified otherwise.
fn map_elements(callee: &Callee<'_>, args: &[Value]) -> MathResult {
    let [value] = args else {
        return Err(wrong_arg_count(callee.name(), args.len(), 1, Some(1)));
    };
    let apply = |x: &Value| callee.call_self(slice::from_ref(x));
    match value {
        Value::Dense(m) => m.map(|x, _| apply(x)).map(Value::dense),
        Value::Sparse(m) => {
            let keeps_pattern = apply(&m.zero()).is_ok_and(|probe| probe.is_zero());
            if keeps_pattern {
                m.map_stored(|x, _, _| apply(x)).map(Value::sparse)
            } else {
                m.to_dense().map(|x, _| apply(x)).map(Value::dense)
            }
        }
        scalar => apply(scalar),
    }
}

#[cfg(test)]
mod tests;
