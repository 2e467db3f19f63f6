#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use numa_value::{BigDecimal, MathErrorKind};
use pretty_assertions::assert_eq;

use super::*;

fn dispatcher() -> Dispatcher {
    let mut d = Dispatcher::default();
    register(&mut d).unwrap();
    d
}

fn numeric_as(d: &Dispatcher, value: Value, target: &str) -> MathResult {
    d.invoke("numeric", &[value, Value::text(target)])
}

fn decimal(text: &str) -> Value {
    Value::big_number(text.parse::<BigDecimal>().unwrap())
}

#[test]
fn test_default_target_is_number() {
    let d = dispatcher();
    assert_eq!(d.invoke("numeric", &[Value::text("2.5")]).unwrap(), Value::number(2.5));
    assert_eq!(d.invoke("numeric", &[Value::bigint(7)]).unwrap(), Value::number(7.0));
}

#[test]
fn test_narrowing_to_number() {
    let d = dispatcher();
    assert_eq!(numeric_as(&d, decimal("1.25"), "number").unwrap(), Value::number(1.25));
    assert_eq!(
        numeric_as(&d, Value::ratio(3, 4).unwrap(), "number").unwrap(),
        Value::number(0.75)
    );
}

#[test]
fn test_to_bigint() {
    let d = dispatcher();
    assert_eq!(numeric_as(&d, Value::number(42.0), "bigint").unwrap(), Value::bigint(42));
    assert_eq!(numeric_as(&d, decimal("12.000"), "bigint").unwrap(), Value::bigint(12));
    assert_eq!(
        numeric_as(&d, Value::ratio(10, 2).unwrap(), "bigint").unwrap(),
        Value::bigint(5)
    );
    assert_eq!(numeric_as(&d, Value::text("-9"), "bigint").unwrap(), Value::bigint(-9));

    for value in [Value::number(1.5), decimal("0.1"), Value::ratio(1, 3).unwrap()] {
        let err = numeric_as(&d, value, "bigint").unwrap_err();
        assert!(matches!(
            err.kind,
            MathErrorKind::ConversionFailed { to: Kind::BigInt, .. }
        ));
    }
}

#[test]
fn test_to_fraction() {
    let d = dispatcher();
    assert_eq!(
        numeric_as(&d, decimal("0.125"), "Fraction").unwrap(),
        Value::ratio(1, 8).unwrap()
    );
    assert_eq!(
        numeric_as(&d, decimal("1.5e3"), "Fraction").unwrap(),
        Value::ratio(1500, 1).unwrap()
    );
    assert_eq!(
        numeric_as(&d, Value::number(0.5), "Fraction").unwrap(),
        Value::ratio(1, 2).unwrap()
    );
    assert_eq!(
        numeric_as(&d, Value::bigint(3), "Fraction").unwrap(),
        Value::ratio(3, 1).unwrap()
    );
}

#[test]
fn test_to_big_number() {
    let d = dispatcher();
    assert_eq!(numeric_as(&d, Value::number(0.5), "BigNumber").unwrap(), decimal("0.5"));
    assert_eq!(numeric_as(&d, Value::text("1e3"), "BigNumber").unwrap(), decimal("1000"));
}

#[test]
fn test_same_kind_is_identity() {
    let d = dispatcher();
    let value = Value::ratio(2, 3).unwrap();
    assert_eq!(numeric_as(&d, value.clone(), "Fraction").unwrap(), value);
}

#[test]
fn test_rejects_unsupported_kinds() {
    let d = dispatcher();
    let err = numeric_as(&d, Value::complex(1.0, 1.0), "number").unwrap_err();
    assert_eq!(
        err.kind,
        MathErrorKind::TypeMismatch {
            expected: INPUTS.to_string(),
            got: "Complex".to_string(),
        }
    );
    let err = numeric_as(&d, Value::number(1.0), "Complex").unwrap_err();
    assert_eq!(
        err.kind,
        MathErrorKind::TypeMismatch {
            expected: TARGETS.to_string(),
            got: "Complex".to_string(),
        }
    );
}
