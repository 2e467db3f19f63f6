use numa_value::{ConversionTable, Kind};

use super::*;

#[test]
fn test_parse_single_union_and_any() {
    assert_eq!(TypePattern::parse("number"), Some(TypePattern::Exact(Kind::Number)));
    assert_eq!(
        TypePattern::parse(" BigNumber | number "),
        Some(TypePattern::union([Kind::Number, Kind::BigNumber]))
    );
    assert_eq!(TypePattern::parse("any"), Some(TypePattern::Any));
    assert_eq!(TypePattern::parse("float"), None);
}

#[test]
fn test_matrix_alias_expands() {
    let pattern = TypePattern::parse("Matrix").unwrap_or(TypePattern::Any);
    assert!(pattern.matches(Kind::DenseMatrix));
    assert!(pattern.matches(Kind::SparseMatrix));
    assert!(!pattern.matches(Kind::Number));
    assert_eq!(pattern.to_string(), "DenseMatrix | SparseMatrix");
}

#[test]
fn test_union_order_is_normalized() {
    assert_eq!(
        TypePattern::union([Kind::Complex, Kind::Number, Kind::Complex]),
        TypePattern::union([Kind::Number, Kind::Complex])
    );
    assert_eq!(TypePattern::union([Kind::Text]), TypePattern::Exact(Kind::Text));
}

#[test]
fn test_conversion_cost_picks_cheapest_member() {
    let table = ConversionTable::standard();
    let pattern = TypePattern::union([Kind::BigNumber, Kind::Complex]);
    assert_eq!(
        pattern.conversion_cost(Kind::Number, &table),
        Some((1, Kind::BigNumber))
    );
    assert_eq!(
        pattern.conversion_cost(Kind::Complex, &table),
        Some((0, Kind::Complex))
    );
    assert_eq!(
        TypePattern::Exact(Kind::Number).conversion_cost(Kind::Complex, &table),
        None
    );
    assert_eq!(
        TypePattern::Any.conversion_cost(Kind::Text, &table),
        Some((0, Kind::Text))
    );
}

#[test]
fn test_specificity_order() {
    assert!(
        TypePattern::Exact(Kind::Number).specificity()
            < TypePattern::union([Kind::Number, Kind::BigInt]).specificity()
    );
    assert!(TypePattern::union([Kind::Number, Kind::BigInt]).specificity() < TypePattern::Any.specificity());
}

#[test]
fn test_param_display() {
    assert_eq!(Param::exact(Kind::Number).to_string(), "number");
    assert_eq!(Param::rest(TypePattern::Any).to_string(), "...any");
}
