#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use numa_value::{Kind, MathErrorKind};
use pretty_assertions::assert_eq;

use super::*;
use crate::test_support::{dense, dispatcher, num, sparse};

#[test]
fn test_binary_signatures_cover_storage_pairs() {
    let signatures = binary_signatures().unwrap();
    let texts: Vec<String> = signatures.iter().map(ToString::to_string).collect();
    assert_eq!(
        texts,
        vec![
            "DenseMatrix, DenseMatrix",
            "DenseMatrix, SparseMatrix",
            "SparseMatrix, DenseMatrix",
            "SparseMatrix, SparseMatrix",
            "DenseMatrix | SparseMatrix, any",
            "any, DenseMatrix | SparseMatrix",
        ]
    );
}

#[test]
fn test_matrix_call_reenters_scalar_signature() {
    let d = dispatcher();
    let result = d
        .invoke(
            "add",
            &[dense(&[&[1.0, 2.0]]), sparse(&[&[0.0, 3.0]])],
        )
        .unwrap();
    assert_eq!(result, dense(&[&[1.0, 5.0]]));
}

#[test]
fn test_matrix_scalar_uses_broadcast_signature() {
    let d = dispatcher();
    let bound = d.find("add", &[Kind::DenseMatrix, Kind::Number]).unwrap();
    // Two scalar signatures come first, then the six matrix ones.
    assert_eq!(bound.index(), 6);
    assert_eq!(
        d.invoke("add", &[dense(&[&[1.0, 2.0]]), num(1.0)]).unwrap(),
        dense(&[&[2.0, 3.0]])
    );
}

#[test]
fn test_unary_keeps_pattern_when_zero_maps_to_zero() {
    let d = dispatcher();
    let result = d.invoke("negate", &[sparse(&[&[0.0, 5.0]])]).unwrap();
    assert_eq!(result, sparse(&[&[0.0, -5.0]]));
}

#[test]
fn test_unary_densifies_otherwise() {
    let d = dispatcher();
    let result = d.invoke("increment", &[sparse(&[&[0.0, 5.0]])]).unwrap();
    assert_eq!(result, dense(&[&[1.0, 6.0]]));
    let result = d.invoke("increment", &[dense(&[&[1.0], &[2.0]])]).unwrap();
    assert_eq!(result, dense(&[&[2.0], &[3.0]]));
}

#[test]
fn test_registering_matrix_signatures_twice_fails() {
    let mut d = Dispatcher::default();
    register_binary(&mut d, "f", Vec::new()).unwrap();
    let err = register_binary(&mut d, "f", Vec::new()).unwrap_err();
    assert!(
        matches!(err.kind, MathErrorKind::DuplicateSignature { .. }),
        "{err}"
    );
}
