//! `numeric(value, kind)`: explicit conversion between the numeric kinds.
//!
//! Unlike implicit conversions this also narrows: `BigNumber` and
//! `Fraction` values convert to `number` and to `bigint` (when integral).

use numa_dispatch::{Callee, Dispatcher, Signature};
use numa_value::{
    conversion_failed, decimal_to_fraction, type_mismatch, BigInt, ConversionTable, Kind,
    MathError, MathResult, Value,
};
use num_traits::{FromPrimitive, ToPrimitive};

use super::{is_integer, unexpected_args};

const INPUTS: &str = "string, number, BigNumber, bigint or Fraction";
const TARGETS: &str = "number, BigNumber, bigint or Fraction";

pub(super) fn register(dispatcher: &mut Dispatcher) -> MathResult<()> {
    dispatcher.register(
        "numeric",
        vec![
            Signature::parse("any, string", numeric)?,
            Signature::parse("any", numeric)?,
        ],
    )
}

fn numeric(callee: &Callee<'_>, args: &[Value]) -> MathResult {
    let (value, target) = match args {
        [value] => (value, Kind::Number),
        [value, Value::Text(name)] => (value, target_kind(name)?),
        _ => return Err(unexpected_args(callee, args)),
    };
    if !matches!(
        value.kind(),
        Kind::Text | Kind::Number | Kind::BigNumber | Kind::BigInt | Kind::Fraction
    ) {
        return Err(type_mismatch(INPUTS, value.type_name()));
    }
    convert(callee.conversions(), value, target)
}

fn target_kind(name: &str) -> MathResult<Kind> {
    match Kind::from_name(name) {
        Some(kind @ (Kind::Number | Kind::BigNumber | Kind::BigInt | Kind::Fraction)) => Ok(kind),
        _ => Err(type_mismatch(TARGETS, name)),
    }
}

fn convert(table: &ConversionTable, value: &Value, target: Kind) -> MathResult {
    let from = value.kind();
    let narrowed = match (value, target) {
        (Value::BigNumber(d), Kind::Number) => d.to_f64().map(Value::number),
        (Value::BigInt(n), Kind::Number) => n.to_f64().map(Value::number),
        (Value::Fraction(q), Kind::Number) => q.to_f64().map(Value::number),

        (Value::Number(x), Kind::BigInt) => {
            if !is_integer(*x) {
                return Err(not_integral(from));
            }
            BigInt::from_f64(*x).map(Value::bigint)
        }
        (Value::BigNumber(d), Kind::BigInt) => {
            if !d.is_integer() {
                return Err(not_integral(from));
            }
            Some(Value::bigint(d.with_scale(0).as_bigint_and_exponent().0))
        }
        (Value::Fraction(q), Kind::BigInt) => {
            if !q.is_integer() {
                return Err(not_integral(from));
            }
            Some(Value::bigint(q.to_integer()))
        }

        (Value::BigNumber(d), Kind::Fraction) => Some(Value::fraction(decimal_to_fraction(d))),

        _ => return table.convert(value, target),
    };
    narrowed.ok_or_else(|| conversion_failed(from, target, "value out of range"))
}

#[cold]
fn not_integral(from: Kind) -> MathError {
    conversion_failed(from, Kind::BigInt, "value is not an integer")
}

#[cfg(test)]
mod tests;
