#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

//! Small dispatcher and matrix builders shared by the unit tests.

use numa_dispatch::{Dispatcher, Signature};
use numa_value::{type_mismatch, DenseMatrix, MathResult, Value};

use crate::combine::ScalarOp;
use crate::suite::{register_binary, register_unary};

fn numbers(args: &[Value], f: impl Fn(f64, f64) -> f64) -> MathResult {
    match args {
        [Value::Number(a), Value::Number(b)] => Ok(Value::number(f(*a, *b))),
        _ => Err(type_mismatch("number, number", "other")),
    }
}

fn bigints(args: &[Value]) -> (&numa_value::BigInt, &numa_value::BigInt) {
    (args[0].as_bigint().unwrap(), args[1].as_bigint().unwrap())
}

/// `add`, `subtract`, `multiply`, `divide` and `equal` on numbers (the
/// first three also on bigints), `negate` unary; all with matrix
/// signatures.
pub(crate) fn dispatcher() -> Dispatcher {
    let mut d = Dispatcher::default();
    register_binary(
        &mut d,
        "add",
        vec![
            Signature::parse("number, number", |_, a| numbers(a, |x, y| x + y)).unwrap(),
            Signature::parse("bigint, bigint", |_, a| {
                let (x, y) = bigints(a);
                Ok(Value::bigint(x + y))
            })
            .unwrap(),
        ],
    )
    .unwrap();
    register_binary(
        &mut d,
        "subtract",
        vec![
            Signature::parse("number, number", |_, a| numbers(a, |x, y| x - y)).unwrap(),
            Signature::parse("bigint, bigint", |_, a| {
                let (x, y) = bigints(a);
                Ok(Value::bigint(x - y))
            })
            .unwrap(),
        ],
    )
    .unwrap();
    register_binary(
        &mut d,
        "multiply",
        vec![
            Signature::parse("number, number", |_, a| numbers(a, |x, y| x * y)).unwrap(),
            Signature::parse("bigint, bigint", |_, a| {
                let (x, y) = bigints(a);
                Ok(Value::bigint(x * y))
            })
            .unwrap(),
        ],
    )
    .unwrap();
    register_binary(
        &mut d,
        "divide",
        vec![Signature::parse("number, number", |_, a| numbers(a, |x, y| x / y)).unwrap()],
    )
    .unwrap();
    register_binary(
        &mut d,
        "equal",
        vec![Signature::parse("number, number", |_, a: &[Value]| {
            Ok(Value::Boolean(a[0] == a[1]))
        })
        .unwrap()],
    )
    .unwrap();
    register_unary(
        &mut d,
        "negate",
        vec![Signature::parse("number", |_, a: &[Value]| {
            Ok(Value::number(-a[0].as_number().unwrap()))
        })
        .unwrap()],
    )
    .unwrap();
    register_unary(
        &mut d,
        "increment",
        vec![Signature::parse("number", |_, a: &[Value]| {
            Ok(Value::number(a[0].as_number().unwrap() + 1.0))
        })
        .unwrap()],
    )
    .unwrap();
    d
}

pub(crate) fn op<'d>(d: &'d Dispatcher, name: &'d str) -> ScalarOp<'d> {
    ScalarOp::new(d, name).unwrap()
}

pub(crate) fn num(x: f64) -> Value {
    Value::number(x)
}

pub(crate) fn grid(rows: &[&[f64]]) -> DenseMatrix {
    DenseMatrix::from_rows(
        rows.iter()
            .map(|row| row.iter().copied().map(num).collect())
            .collect(),
    )
    .unwrap()
}

pub(crate) fn dense(rows: &[&[f64]]) -> Value {
    Value::dense(grid(rows))
}

pub(crate) fn sparse(rows: &[&[f64]]) -> Value {
    Value::sparse(grid(rows).to_sparse().unwrap())
}

pub(crate) fn vector(values: &[f64]) -> Value {
    Value::dense(DenseMatrix::from_vec(values.iter().copied().map(num).collect()).unwrap())
}
