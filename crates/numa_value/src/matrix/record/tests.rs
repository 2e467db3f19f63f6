#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;

use super::*;
use crate::kind::Kind;

fn sparse_record(format: Storage, ptr: Vec<usize>) -> Vec<u8> {
    let record = SparseRecord {
        format,
        size: [3, 2],
        datatype: ElementKind::Uniform(Kind::Number),
        values: Cow::Owned(vec![Value::number(1.0), Value::number(2.0)]),
        index: Cow::Owned(vec![0, 1]),
        ptr: Cow::Owned(ptr),
    };
    bincode::serialize(&record).unwrap()
}

#[test]
fn test_dense_round_trip() {
    let m = DenseMatrix::from_rows(vec![
        vec![Value::number(1.0), Value::bigint(2)],
        vec![Value::number(3.0), Value::number(4.0)],
    ])
    .unwrap();
    let bytes = bincode::serialize(&m).unwrap();
    let back: DenseMatrix = bincode::deserialize(&bytes).unwrap();
    assert_eq!(back, m);
}

#[test]
fn test_empty_sparse_keeps_declared_kind() {
    let m = SparseMatrix::zeros(2, 3, Some(Kind::Fraction));
    let bytes = bincode::serialize(&m).unwrap();
    let back: SparseMatrix = bincode::deserialize(&bytes).unwrap();
    assert_eq!(back.datatype(), ElementKind::Uniform(Kind::Fraction));
    assert_eq!(back, m);
}

#[test]
fn test_well_formed_sparse_record() {
    let bytes = sparse_record(Storage::Sparse, vec![0, 1, 2]);
    let back: SparseMatrix = bincode::deserialize(&bytes).unwrap();
    assert_eq!(back.nnz(), 2);
    assert_eq!(back.get(&[1, 1]).unwrap(), Value::number(2.0));
}

#[test]
fn test_malformed_pointer_is_rejected() {
    let bytes = sparse_record(Storage::Sparse, vec![0, 5, 2]);
    let err = bincode::deserialize::<SparseMatrix>(&bytes).unwrap_err();
    assert!(err.to_string().contains("non-decreasing"), "{err}");
}

#[test]
fn test_format_tag_is_checked() {
    let bytes = sparse_record(Storage::Dense, vec![0, 1, 2]);
    let err = bincode::deserialize::<SparseMatrix>(&bytes).unwrap_err();
    assert!(
        err.to_string().contains("expected a sparse matrix record, got dense"),
        "{err}"
    );
}
