#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use numa_value::{Kind, MathErrorKind};
use pretty_assertions::assert_eq;

use super::*;

fn dispatcher() -> Dispatcher {
    let mut d = Dispatcher::default();
    register(&mut d).unwrap();
    d
}

fn num(d: &Dispatcher, name: &str, x: f64, y: f64) -> f64 {
    d.invoke(name, &[Value::number(x), Value::number(y)])
        .unwrap()
        .as_number()
        .unwrap()
}

fn big(d: &Dispatcher, name: &str, x: i64, y: i64) -> Value {
    d.invoke(name, &[Value::bigint(x), Value::bigint(y)]).unwrap()
}

fn grid(rows: &[&[f64]]) -> DenseMatrix {
    DenseMatrix::from_rows(
        rows.iter()
            .map(|row| row.iter().copied().map(Value::number).collect())
            .collect(),
    )
    .unwrap()
}

#[test]
fn test_to_int32() {
    assert_eq!(to_int32(5.0), 5);
    assert_eq!(to_int32(-1.0), -1);
    assert_eq!(to_int32(4_294_967_296.0), 0);
    assert_eq!(to_int32(2_147_483_648.0), i32::MIN);
}

#[test]
fn test_number_ops() {
    let d = dispatcher();
    assert_eq!(num(&d, "bitAnd", 12.0, 10.0), 8.0);
    assert_eq!(num(&d, "bitOr", 12.0, 10.0), 14.0);
    assert_eq!(num(&d, "bitXor", 12.0, 10.0), 6.0);
    assert_eq!(num(&d, "bitAnd", -1.0, 255.0), 255.0);
    assert_eq!(num(&d, "leftShift", 1.0, 3.0), 8.0);
    assert_eq!(num(&d, "leftShift", 1.0, 33.0), 2.0);
    assert_eq!(num(&d, "leftShift", 1.0, 31.0), -2_147_483_648.0);
    assert_eq!(num(&d, "rightArithShift", -16.0, 2.0), -4.0);
    assert_eq!(num(&d, "rightLogShift", -1.0, 28.0), 15.0);
    assert_eq!(num(&d, "rightLogShift", -1.0, 0.0), 4_294_967_295.0);
}

#[test]
fn test_number_ops_require_integers() {
    let d = dispatcher();
    let err = d
        .invoke("bitOr", &[Value::number(1.5), Value::number(1.0)])
        .unwrap_err();
    assert_eq!(
        err.kind,
        MathErrorKind::NotAnInteger {
            function: "bitOr".to_string()
        }
    );
}

#[test]
fn test_bigint_ops() {
    let d = dispatcher();
    assert_eq!(big(&d, "bitAnd", 12, 10), Value::bigint(8));
    assert_eq!(big(&d, "bitOr", -8, 3), Value::bigint(-5));
    assert_eq!(big(&d, "bitXor", 12, 10), Value::bigint(6));
    assert_eq!(big(&d, "leftShift", 1, 40), Value::bigint(1_i64 << 40));
    assert_eq!(big(&d, "leftShift", 16, -2), Value::bigint(4));
    assert_eq!(big(&d, "rightArithShift", -16, 2), Value::bigint(-4));
    assert_eq!(big(&d, "rightArithShift", 1, -4), Value::bigint(16));
}

#[test]
fn test_shift_by_zero_returns_matrix() {
    let d = dispatcher();
    let m = Value::sparse(grid(&[&[0.0, 8.0], &[4.0, 0.0]]).to_sparse().unwrap());
    let result = d
        .invoke("rightArithShift", &[m.clone(), Value::number(0.0)])
        .unwrap();
    assert_eq!(result, m);

    let result = d
        .invoke("rightArithShift", &[m, Value::number(2.0)])
        .unwrap();
    assert_eq!(result.as_sparse().unwrap().to_dense(), grid(&[&[0.0, 2.0], &[1.0, 0.0]]));
}

#[test]
fn test_zero_shifted_by_matrix() {
    let d = dispatcher();
    let m = Value::dense(grid(&[&[1.0, 2.0, 3.0]]));
    let result = d
        .invoke("rightArithShift", &[Value::number(0.0), m.clone()])
        .unwrap();
    assert_eq!(result, Value::dense(grid(&[&[0.0, 0.0, 0.0]])));

    let s = Value::sparse(grid(&[&[1.0, 0.0], &[0.0, 2.0]]).to_sparse().unwrap());
    let result = d
        .invoke("rightArithShift", &[Value::bigint(0), s])
        .unwrap();
    let sparse = result.as_sparse().unwrap();
    assert_eq!(sparse.nnz(), 0);
    assert_eq!(sparse.size(), &[2, 2]);
    assert_eq!(sparse.datatype(), numa_value::ElementKind::Uniform(Kind::BigInt));

    let result = d
        .invoke("rightArithShift", &[Value::number(64.0), m])
        .unwrap();
    assert_eq!(result, Value::dense(grid(&[&[32.0, 16.0, 8.0]])));
}
