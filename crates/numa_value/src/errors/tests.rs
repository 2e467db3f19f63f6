use super::*;

#[test]
fn test_dimension_mismatch_message() {
    let err = dimension_mismatch(&[2, 3], &[3, 2]);
    assert_eq!(err.message, "dimension mismatch ([2, 3] != [3, 2])");
    assert!(err.is_dimension_error());
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
fn test_rank_mismatch_message() {
    assert_eq!(rank_mismatch(1, 2).to_string(), "dimension mismatch (1 != 2)");
    assert_eq!(
        rank_relation(3, 2, Relation::Greater).to_string(),
        "dimension mismatch (3 > 2)"
    );
}

#[test]
fn test_arity_message_variants() {
    assert_eq!(
        wrong_arg_count("foo", 3, 1, Some(2)).message,
        "wrong number of arguments in function foo (3 provided, 1-2 expected)"
    );
    assert_eq!(
        wrong_arg_count("neg", 2, 1, Some(1)).message,
        "wrong number of arguments in function neg (2 provided, 1 expected)"
    );
    assert_eq!(
        wrong_arg_count("concat", 0, 1, None).message,
        "wrong number of arguments in function concat (0 provided, 1 or more expected)"
    );
    assert!(wrong_arg_count("foo", 3, 1, Some(2)).is_arity_error());
}

#[test]
fn test_index_out_of_range_messages() {
    assert_eq!(
        index_out_of_range(-1, 0, Some(3)).message,
        "index out of range (-1 < 0)"
    );
    assert_eq!(
        index_out_of_bounds(5, 3).message,
        "index out of range (5 > 2)"
    );
    assert_eq!(
        index_out_of_range(2, 0, None).message,
        "index out of range (2)"
    );
}

#[test]
fn test_no_matching_signature_lists_kinds_and_signatures() {
    let err = no_matching_signature(
        "add",
        &[Kind::Number, Kind::Text],
        vec!["number, number".into(), "BigNumber, BigNumber".into()],
    );
    assert_eq!(
        err.message,
        "unexpected type of argument in function add (number, string); \
         expected one of: number, number; BigNumber, BigNumber"
    );
}

#[test]
fn test_custom_error_keeps_message() {
    let err = MathError::new("boom");
    assert_eq!(err.to_string(), "boom");
    assert_eq!(
        err.kind,
        MathErrorKind::Custom {
            message: "boom".into()
        }
    );
}
