//! End-to-end tests through `MathContext`.
//!
//! These exercise dispatch, conversion, the matrix algorithm suite and the
//! standard functions together.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use numa::{
    DenseMatrix, Extent, Kind, MathContext, MathErrorKind, Matrix, Relation, Signature,
    SparseMatrix, Value,
};
fn grid(rows: &[&[f64]]) -> DenseMatrix {
    DenseMatrix::from_rows(
        rows.iter()
            .map(|row| row.iter().copied().map(Value::number).collect())
            .collect(),
    )
    .unwrap()
}

fn dense(rows: &[&[f64]]) -> Value {
    Value::dense(grid(rows))
}

fn sparse(rows: &[&[f64]]) -> Value {
    Value::sparse(grid(rows).to_sparse().unwrap())
}

// Dispatch

mod dispatch {
    use pretty_assertions::assert_eq;

    use super::*;

    fn context_with_foo() -> MathContext {
        let one = Signature::parse("number", |_, _| Ok(Value::text("one"))).unwrap();
        let two = Signature::parse("number, number", |_, _| Ok(Value::text("two"))).unwrap();
        MathContext::builder()
            .function("foo", vec![one, two])
            .build()
            .unwrap()
    }

    #[test]
    fn exact_match_runs_without_conversion() {
        let ctx = context_with_foo();
        let bound = ctx.find("foo", &[Kind::Number, Kind::Number]).unwrap();
        assert!(bound.is_exact());
        assert_eq!(bound.cost(), 0);
        assert_eq!(
            ctx.invoke("foo", &[Value::number(1.0)]).unwrap(),
            Value::text("one")
        );
    }

    #[test]
    fn arity_error_reports_accepted_range() {
        let ctx = context_with_foo();
        let err = ctx
            .invoke(
                "foo",
                &[Value::number(1.0), Value::number(2.0), Value::number(3.0)],
            )
            .unwrap_err();
        assert!(err.is_arity_error());
        assert_eq!(
            err.kind,
            MathErrorKind::ArityMismatch {
                function: "foo".to_string(),
                count: 3,
                min: 1,
                max: Some(2),
            }
        );
    }

    #[test]
    fn resolution_is_stable() {
        let ctx = MathContext::new().unwrap();
        let kinds = [Kind::BigInt, Kind::Fraction];
        let first = ctx.find("add", &kinds).unwrap();
        let second = ctx.find("add", &kinds).unwrap();
        assert_eq!(first.index(), second.index());
        assert_eq!(first.signature().to_string(), second.signature().to_string());
    }

    #[test]
    fn mixed_kinds_resolve_to_common_signature() {
        let ctx = MathContext::new().unwrap();
        let sum = ctx
            .invoke("add", &[Value::bigint(1), Value::ratio(1, 2).unwrap()])
            .unwrap();
        assert_eq!(sum, Value::ratio(3, 2).unwrap());
    }

    #[test]
    fn no_matching_signature_lists_candidates() {
        let ctx = MathContext::new().unwrap();
        let err = ctx
            .invoke("bitAnd", &[Value::complex(1.0, 0.0), Value::number(1.0)])
            .unwrap_err();
        let MathErrorKind::NoMatchingSignature {
            function, kinds, ..
        } = &err.kind
        else {
            panic!("expected a dispatch error, got {err}");
        };
        assert_eq!(function, "bitAnd");
        assert_eq!(kinds.as_slice(), &[Kind::Complex, Kind::Number]);
    }

    #[test]
    fn unknown_function() {
        let ctx = MathContext::new().unwrap();
        let err = ctx.invoke("nope", &[]).unwrap_err();
        assert_eq!(err.message, "undefined function: nope");
    }
}

// Matrix suite

mod matrices {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn dense_subtract() {
        let ctx = MathContext::new().unwrap();
        let result = ctx
            .invoke(
                "subtract",
                &[
                    dense(&[&[1.0, 2.0], &[3.0, 4.0]]),
                    dense(&[&[5.0, 6.0], &[7.0, 8.0]]),
                ],
            )
            .unwrap();
        assert_eq!(result, dense(&[&[-4.0, -4.0], &[-4.0, -4.0]]));
    }

    #[test]
    fn sparse_times_zero_stores_nothing() {
        let ctx = MathContext::new().unwrap();
        let s = sparse(&[&[0.0, 0.0, 0.0], &[0.0, 5.0, 0.0], &[0.0, 0.0, 0.0]]);
        let result = ctx
            .invoke("dotMultiply", &[s, Value::number(0.0)])
            .unwrap();
        let result = result.as_sparse().unwrap();
        assert_eq!(result.size(), &[3, 3]);
        assert_eq!(result.nnz(), 0);
    }

    #[test]
    fn mismatched_sizes() {
        let ctx = MathContext::new().unwrap();
        let a = dense(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        let b = sparse(&[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]]);
        let err = ctx.invoke("add", &[a, b]).unwrap_err();
        assert_eq!(
            err.kind,
            MathErrorKind::DimensionMismatch {
                actual: Extent::Size(vec![2, 3]),
                expected: Extent::Size(vec![3, 2]),
                relation: Relation::NotEqual,
            }
        );
    }

    #[test]
    fn dense_and_sparse_agree() {
        let ctx = MathContext::new().unwrap();
        let s = sparse(&[&[0.0, 1.0], &[2.0, 0.0]]);
        let d = dense(&[&[3.0, 0.0], &[4.0, 5.0]]);
        let mixed = ctx.invoke("add", &[s.clone(), d.clone()]).unwrap();
        let plain = ctx
            .invoke(
                "add",
                &[Value::dense(s.as_sparse().unwrap().to_dense()), d],
            )
            .unwrap();
        assert_eq!(mixed.size(), plain.size());
        let mixed = match mixed {
            Value::Sparse(m) => m.to_dense(),
            Value::Dense(m) => (*m).clone(),
            other => panic!("expected a matrix, got {other:?}"),
        };
        assert_eq!(Value::dense(mixed), plain);
    }

    #[test]
    fn sparse_comparison_densifies() {
        let ctx = MathContext::new().unwrap();
        let a = sparse(&[&[0.0, 1.0], &[0.0, 0.0]]);
        let b = sparse(&[&[0.0, 1.0], &[2.0, 0.0]]);
        let result = ctx.invoke("equal", &[a, b]).unwrap();
        assert_eq!(
            result,
            Value::dense(
                DenseMatrix::from_rows(vec![
                    vec![Value::Boolean(true), Value::Boolean(true)],
                    vec![Value::Boolean(false), Value::Boolean(true)],
                ])
                .unwrap()
            )
        );
    }

    #[test]
    fn mixed_element_kinds_convert_per_pair() {
        let ctx = MathContext::new().unwrap();
        let ints = Value::dense(
            DenseMatrix::from_vec(vec![Value::bigint(1), Value::bigint(2)]).unwrap(),
        );
        let result = ctx.invoke("add", &[ints, Value::number(0.5)]).unwrap();
        assert_eq!(
            result,
            Value::dense(DenseMatrix::from_vec(vec![Value::number(1.5), Value::number(2.5)]).unwrap())
        );
    }

    #[test]
    fn empty_sparse_keeps_declared_kind() {
        let ctx = MathContext::new().unwrap();
        let z = Value::sparse(SparseMatrix::zeros(2, 2, Some(Kind::BigInt)));
        let result = ctx.invoke("add", &[z.clone(), z]).unwrap();
        let result = result.as_sparse().unwrap();
        assert_eq!(result.nnz(), 0);
        assert_eq!(result.zero(), Value::bigint(0));
    }

    #[test]
    fn unary_functions_map_over_matrices() {
        let ctx = MathContext::new().unwrap();
        let result = ctx
            .invoke("abs", &[sparse(&[&[0.0, -2.0], &[3.0, 0.0]])])
            .unwrap();
        let result = result.as_sparse().unwrap();
        assert_eq!(result.nnz(), 2);
        assert_eq!(result.to_dense(), grid(&[&[0.0, 2.0], &[3.0, 0.0]]));
    }
}

// Standard functions

mod functions {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn bigint_arithmetic_is_exact() {
        let ctx = MathContext::new().unwrap();
        let big = Value::bigint(1_i64 << 62);
        let result = ctx.invoke("dotMultiply", &[big.clone(), big]).unwrap();
        assert_eq!(result.to_string(), "21267647932558653966460912964485513216");
    }

    #[test]
    fn kron_of_identity() {
        let ctx = MathContext::new().unwrap();
        let result = ctx
            .invoke(
                "kron",
                &[dense(&[&[1.0, 0.0], &[0.0, 1.0]]), dense(&[&[1.0, 2.0]])],
            )
            .unwrap();
        assert_eq!(
            result,
            dense(&[&[1.0, 2.0, 0.0, 0.0], &[0.0, 0.0, 1.0, 2.0]])
        );
    }

    #[test]
    fn numeric_then_compare() {
        let ctx = MathContext::new().unwrap();
        let x = ctx
            .invoke("numeric", &[Value::text("0.1"), Value::text("Fraction")])
            .unwrap();
        assert_eq!(x, Value::ratio(1, 10).unwrap());
        let smaller = ctx.invoke("smaller", &[x, Value::ratio(1, 5).unwrap()]).unwrap();
        assert_eq!(smaller, Value::Boolean(true));
    }
}
