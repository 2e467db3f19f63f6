#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;

use super::*;
use crate::test_support::{grid, num};

fn sample() -> SparseMatrix {
    grid(&[&[1.0, 0.0, 0.0], &[0.0, 0.0, 4.0], &[2.0, 3.0, 0.0]])
        .to_sparse()
        .unwrap()
}

#[test]
fn test_scatter_marks_column_rows() {
    let m = sample();
    let mut w = Workspace::new(3);
    let mark = Workspace::mark_for(0);
    w.scatter(&m, 0, mark);
    assert_eq!(w.get(0, mark), Some(&num(1.0)));
    assert_eq!(w.get(1, mark), None);
    assert_eq!(w.get(2, mark), Some(&num(2.0)));
}

#[test]
fn test_next_mark_invalidates_previous_column() {
    let m = sample();
    let mut w = Workspace::new(3);
    w.scatter(&m, 0, Workspace::mark_for(0));
    let mark = Workspace::mark_for(1);
    w.scatter(&m, 1, mark);
    // Row 0 still holds column 0's value, but under a stale mark.
    assert_eq!(w.get(0, mark), None);
    assert_eq!(w.get(2, mark), Some(&num(3.0)));
}

#[test]
fn test_fresh_workspace_is_unmarked() {
    let w = Workspace::new(2);
    assert_eq!(w.get(0, Workspace::mark_for(0)), None);
}

#[test]
fn test_union_rows_sorted_without_duplicates() {
    let a = sample();
    let b = grid(&[&[0.0, 5.0, 0.0], &[6.0, 0.0, 7.0], &[8.0, 0.0, 0.0]])
        .to_sparse()
        .unwrap();
    let mut rows = vec![99];
    union_rows(&a, &b, 0, &mut rows);
    assert_eq!(rows, vec![0, 1, 2]);
    union_rows(&a, &b, 1, &mut rows);
    assert_eq!(rows, vec![0, 2]);
    union_rows(&a, &b, 2, &mut rows);
    assert_eq!(rows, vec![1]);
}
