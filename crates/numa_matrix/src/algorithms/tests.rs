#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use numa_value::{DenseMatrix, Extent, Kind, MathErrorKind, Relation};
use pretty_assertions::assert_eq;

use super::*;
use crate::test_support::{dense, dispatcher, grid, num, op, sparse, vector};

fn stored(value: &Value) -> usize {
    value.as_sparse().expect("sparse result").nnz()
}

// === Dense x dense ===

#[test]
fn test_dense_dense_lockstep() {
    let d = dispatcher();
    let result = elementwise(
        op(&d, "subtract"),
        &dense(&[&[1.0, 2.0], &[3.0, 4.0]]),
        &dense(&[&[5.0, 6.0], &[7.0, 8.0]]),
    )
    .unwrap();
    assert_eq!(result, dense(&[&[-4.0, -4.0], &[-4.0, -4.0]]));
}

#[test]
fn test_size_mismatch_reports_left_then_right() {
    let d = dispatcher();
    let a = dense(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
    let b = dense(&[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]]);
    let err = elementwise(op(&d, "add"), &a, &b).unwrap_err();
    assert_eq!(
        err.kind,
        MathErrorKind::DimensionMismatch {
            actual: Extent::Size(vec![2, 3]),
            expected: Extent::Size(vec![3, 2]),
            relation: Relation::NotEqual,
        }
    );
    assert_eq!(err.message, "dimension mismatch ([2, 3] != [3, 2])");

    // The sparse-left pair reports in the caller's order too.
    let a = sparse(&[&[1.0, 0.0, 3.0], &[0.0, 5.0, 0.0]]);
    let err = elementwise(op(&d, "add"), &a, &b).unwrap_err();
    assert_eq!(err.message, "dimension mismatch ([2, 3] != [3, 2])");
}

#[test]
fn test_rank_mismatch_reports_ranks() {
    let d = dispatcher();
    let err = elementwise(op(&d, "add"), &vector(&[1.0, 2.0]), &dense(&[&[1.0, 2.0]]))
        .unwrap_err();
    assert_eq!(
        err.kind,
        MathErrorKind::DimensionMismatch {
            actual: Extent::Rank(1),
            expected: Extent::Rank(2),
            relation: Relation::NotEqual,
        }
    );
}

// === Sparse x sparse ===

#[test]
fn test_sparse_sparse_zero_preserving_stays_sparse() {
    let d = dispatcher();
    let a = sparse(&[&[1.0, 0.0, 0.0], &[0.0, 0.0, 2.0], &[0.0, 0.0, 0.0]]);
    let b = sparse(&[&[0.0, 0.0, 0.0], &[0.0, 0.0, -2.0], &[3.0, 0.0, 0.0]]);
    let result = elementwise(op(&d, "add"), &a, &b).unwrap();
    assert_eq!(
        result,
        sparse(&[&[1.0, 0.0, 0.0], &[0.0, 0.0, 0.0], &[3.0, 0.0, 0.0]])
    );
    // The cancelled entry is not stored.
    assert_eq!(stored(&result), 2);
}

#[test]
fn test_sparse_sparse_densifies_when_zero_is_not_preserved() {
    let d = dispatcher();
    let a = sparse(&[&[1.0, 0.0], &[0.0, 2.0]]);
    let b = sparse(&[&[1.0, 0.0], &[0.0, 3.0]]);
    let result = elementwise(op(&d, "equal"), &a, &b).unwrap();
    let expected = DenseMatrix::from_rows(vec![
        vec![Value::Boolean(true), Value::Boolean(true)],
        vec![Value::Boolean(true), Value::Boolean(false)],
    ])
    .unwrap();
    assert_eq!(result, Value::dense(expected));
}

#[test]
fn test_sparse_sparse_meets_at_common_kind() {
    let d = dispatcher();
    let ints = DenseMatrix::from_rows(vec![
        vec![Value::bigint(2), Value::bigint(0)],
        vec![Value::bigint(0), Value::bigint(0)],
    ])
    .unwrap();
    let ints = Value::sparse(ints.to_sparse().unwrap());
    let result = elementwise(op(&d, "add"), &ints, &sparse(&[&[0.5, 0.0], &[0.0, 1.0]])).unwrap();
    assert_eq!(result, sparse(&[&[2.5, 0.0], &[0.0, 1.0]]));
    assert_eq!(stored(&result), 2);
}

#[test]
fn test_sparse_sparse_divide_visits_every_position() {
    let d = dispatcher();
    let a = sparse(&[&[4.0, 0.0]]);
    let b = sparse(&[&[2.0, 0.0]]);
    let result = elementwise(op(&d, "divide"), &a, &b).unwrap();
    let data = result.as_dense().expect("dense result").data().to_vec();
    assert_eq!(data[0], num(2.0));
    assert!(data[1].as_number().unwrap().is_nan());
}

// === Dense x sparse ===

#[test]
fn test_dense_sparse_multiply_is_sparse() {
    let d = dispatcher();
    let result = elementwise(
        op(&d, "multiply"),
        &dense(&[&[1.0, 2.0], &[3.0, 4.0]]),
        &sparse(&[&[0.0, 5.0], &[0.0, 0.0]]),
    )
    .unwrap();
    assert_eq!(result, sparse(&[&[0.0, 10.0], &[0.0, 0.0]]));
}

#[test]
fn test_dense_sparse_result_checked_on_instance() {
    let d = dispatcher();
    // A non-zero dense entry where the sparse side is absent forces dense.
    let result = elementwise(
        op(&d, "add"),
        &dense(&[&[1.0, 0.0], &[0.0, 0.0]]),
        &sparse(&[&[0.0, 0.0], &[0.0, 7.0]]),
    )
    .unwrap();
    assert_eq!(result, dense(&[&[1.0, 0.0], &[0.0, 7.0]]));

    // Zeros everywhere the sparse side is absent keep the result sparse.
    let result = elementwise(
        op(&d, "add"),
        &dense(&[&[0.0, 1.0], &[0.0, 0.0]]),
        &sparse(&[&[0.0, 2.0], &[0.0, 0.0]]),
    )
    .unwrap();
    assert_eq!(result, sparse(&[&[0.0, 3.0], &[0.0, 0.0]]));
}

#[test]
fn test_sparse_dense_keeps_operand_order() {
    let d = dispatcher();
    let s = sparse(&[&[0.0, 5.0], &[1.0, 0.0]]);
    let s_dense = dense(&[&[0.0, 5.0], &[1.0, 0.0]]);
    let m = dense(&[&[2.0, 2.0], &[2.0, 2.0]]);
    let via_sparse = elementwise(op(&d, "subtract"), &s, &m).unwrap();
    let via_dense = elementwise(op(&d, "subtract"), &s_dense, &m).unwrap();
    assert_eq!(via_sparse, via_dense);
    assert_eq!(via_dense, dense(&[&[-2.0, 3.0], &[-1.0, -2.0]]));
}

// === Matrix x scalar ===

#[test]
fn test_sparse_times_zero_keeps_empty_pattern() {
    let d = dispatcher();
    let s = sparse(&[&[0.0, 0.0, 0.0], &[0.0, 5.0, 0.0], &[0.0, 0.0, 0.0]]);
    let result = elementwise(op(&d, "multiply"), &s, &num(0.0)).unwrap();
    let m = result.as_sparse().expect("sparse result");
    assert_eq!(m.nnz(), 0);
    assert_eq!(m.size(), &[3, 3]);
    assert_eq!(m.datatype(), ElementKind::Uniform(Kind::Number));
}

#[test]
fn test_sparse_plus_scalar_densifies() {
    let d = dispatcher();
    let s = sparse(&[&[0.0, 0.0], &[0.0, 5.0]]);
    let result = elementwise(op(&d, "add"), &s, &num(1.0)).unwrap();
    assert_eq!(result, dense(&[&[1.0, 1.0], &[1.0, 6.0]]));
}

#[test]
fn test_scalar_on_the_left() {
    let d = dispatcher();
    let result = elementwise(op(&d, "subtract"), &num(10.0), &dense(&[&[1.0, 2.0]])).unwrap();
    assert_eq!(result, dense(&[&[9.0, 8.0]]));

    let result = elementwise(op(&d, "subtract"), &num(0.0), &sparse(&[&[0.0, 4.0]])).unwrap();
    assert_eq!(result, sparse(&[&[0.0, -4.0]]));
}

#[test]
fn test_scalars_pass_through() {
    let d = dispatcher();
    assert_eq!(
        elementwise(op(&d, "add"), &num(1.0), &num(2.0)).unwrap(),
        num(3.0)
    );
}

// === Homogenization ===

#[test]
fn test_uniform_datatypes_meet_at_common_kind() {
    let d = dispatcher();
    let ints = Value::dense(
        DenseMatrix::from_rows(vec![vec![Value::bigint(1), Value::bigint(2)]]).unwrap(),
    );
    let result = elementwise(op(&d, "add"), &ints, &dense(&[&[0.5, 0.5]])).unwrap();
    assert_eq!(result, dense(&[&[1.5, 2.5]]));

    let sum = elementwise(op(&d, "add"), &ints, &ints).unwrap();
    let expected =
        DenseMatrix::from_rows(vec![vec![Value::bigint(2), Value::bigint(4)]]).unwrap();
    assert_eq!(sum, Value::dense(expected));
}

#[test]
fn test_mixed_datatype_dispatches_per_pair() {
    let d = dispatcher();
    let mixed =
        Value::dense(DenseMatrix::from_vec(vec![Value::bigint(3), num(0.5)]).unwrap());
    let ints =
        Value::dense(DenseMatrix::from_vec(vec![Value::bigint(1), Value::bigint(1)]).unwrap());
    let result = elementwise(op(&d, "add"), &mixed, &ints).unwrap();
    let data = result.as_dense().unwrap().data().to_vec();
    assert_eq!(data, vec![Value::bigint(4), num(1.5)]);
}

#[test]
fn test_first_element_error_aborts() {
    let d = dispatcher();
    let complex = Value::dense(DenseMatrix::from_vec(vec![Value::complex(1.0, 1.0)]).unwrap());
    let err = elementwise(op(&d, "add"), &complex, &vector(&[1.0])).unwrap_err();
    assert!(
        matches!(err.kind, MathErrorKind::NoMatchingSignature { .. }),
        "{err}"
    );
}

#[test]
fn test_operands_are_not_modified() {
    let d = dispatcher();
    let a = grid(&[&[1.0, 2.0]]);
    let before = a.clone();
    let _ = elementwise(op(&d, "add"), &Value::dense(a.clone()), &num(1.0)).unwrap();
    assert_eq!(a, before);
}
