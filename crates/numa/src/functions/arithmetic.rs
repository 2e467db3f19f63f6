//! Arithmetic functions.

use numa_dispatch::{Dispatcher, Signature};
use numa_matrix::suite::{register_binary, register_unary};
use numa_value::{division_by_zero, BigInt, MathResult, Value};
use num_traits::{Signed, Zero};

use super::{
    on_bigints, on_complex, on_decimals, on_fractions, on_numbers, require_integers,
    unexpected_args,
};

/// Scalar kinds accepted by the unary functions.
const NUMERIC: &str = "number | BigNumber | bigint | Fraction | Complex";

pub(super) fn register(dispatcher: &mut Dispatcher) -> MathResult<()> {
    register_binary(
        dispatcher,
        "add",
        vec![
            on_numbers(|x, y| Ok(x + y))?,
            on_decimals(|x, y| Ok(x + y))?,
            on_bigints(|x, y| Ok(x + y))?,
            on_fractions(|x, y| Ok(x + y))?,
            on_complex(|x, y| Ok(x + y))?,
        ],
    )?;
    register_binary(
        dispatcher,
        "subtract",
        vec![
            on_numbers(|x, y| Ok(x - y))?,
            on_decimals(|x, y| Ok(x - y))?,
            on_bigints(|x, y| Ok(x - y))?,
            on_fractions(|x, y| Ok(x - y))?,
            on_complex(|x, y| Ok(x - y))?,
        ],
    )?;
    register_binary(
        dispatcher,
        "dotMultiply",
        vec![
            on_numbers(|x, y| Ok(x * y))?,
            on_decimals(|x, y| Ok(x * y))?,
            on_bigints(|x, y| Ok(x * y))?,
            on_fractions(|x, y| Ok(x * y))?,
            on_complex(|x, y| Ok(x * y))?,
        ],
    )?;
    register_binary(
        dispatcher,
        "dotDivide",
        vec![
            on_numbers(|x, y| Ok(x / y))?,
            on_decimals(|x, y| {
                if y.is_zero() {
                    Err(division_by_zero())
                } else {
                    Ok(x / y)
                }
            })?,
            on_bigints(|x, y| {
                if y.is_zero() {
                    Err(division_by_zero())
                } else {
                    Ok(x / y)
                }
            })?,
            on_fractions(|x, y| {
                if y.is_zero() {
                    Err(division_by_zero())
                } else {
                    Ok(x / y)
                }
            })?,
            on_complex(|x, y| Ok(x / y))?,
        ],
    )?;

    register_unary(dispatcher, "unaryMinus", vec![unary(negate)?])?;
    register_unary(dispatcher, "abs", vec![unary(absolute)?])?;

    register_binary(
        dispatcher,
        "gcd",
        vec![
            on_numbers(gcd_number)?,
            on_bigints(|x, y| Ok(gcd_bigint(x, y)))?,
        ],
    )?;
    register_binary(
        dispatcher,
        "lcm",
        vec![
            on_numbers(lcm_number)?,
            on_bigints(|x, y| Ok(lcm_bigint(x, y)))?,
        ],
    )?;
    register_binary(
        dispatcher,
        "mod",
        vec![
            on_numbers(|x, y| Ok(if y == 0.0 { x } else { floor_mod(x, y) }))?,
            on_bigints(|x, y| Ok(mod_bigint(x, y)))?,
        ],
    )?;
    Ok(())
}

fn unary(f: fn(&Value) -> Option<Value>) -> MathResult<Signature> {
    Signature::parse(NUMERIC, move |callee, args| match args {
        [x] => f(x).ok_or_else(|| unexpected_args(callee, args)),
        _ => Err(unexpected_args(callee, args)),
    })
}

fn negate(x: &Value) -> Option<Value> {
    Some(match x {
        Value::Number(v) => Value::number(-v),
        Value::BigNumber(d) => Value::big_number(-(**d).clone()),
        Value::BigInt(n) => Value::bigint(-&**n),
        Value::Fraction(q) => Value::fraction(-(**q).clone()),
        Value::Complex(z) => Value::Complex(-z),
        _ => return None,
    })
}

/// Magnitude; the absolute value of a complex number is its norm.
fn absolute(x: &Value) -> Option<Value> {
    Some(match x {
        Value::Number(v) => Value::number(v.abs()),
        Value::BigNumber(d) => Value::big_number(d.abs()),
        Value::BigInt(n) => Value::bigint(n.abs()),
        Value::Fraction(q) => Value::fraction(q.abs()),
        Value::Complex(z) => Value::number(z.norm()),
        _ => return None,
    })
}

/// `x - y * floor(x / y)`: the result takes the sign of `y`.
#[inline]
fn floor_mod(x: f64, y: f64) -> f64 {
    x - y * (x / y).floor()
}

fn gcd_number(a: f64, b: f64) -> MathResult<f64> {
    require_integers("gcd", a, b)?;
    let (mut a, mut b) = (a, b);
    while b != 0.0 {
        let r = floor_mod(a, b);
        a = b;
        b = r;
    }
    Ok(a.abs())
}

fn lcm_number(a: f64, b: f64) -> MathResult<f64> {
    require_integers("lcm", a, b)?;
    if a == 0.0 || b == 0.0 {
        return Ok(0.0);
    }
    let gcd = gcd_number(a, b)?;
    Ok((a * b).abs() / gcd)
}

fn gcd_bigint(a: &BigInt, b: &BigInt) -> BigInt {
    let (mut a, mut b) = (a.abs(), b.abs());
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

fn lcm_bigint(a: &BigInt, b: &BigInt) -> BigInt {
    if a.is_zero() || b.is_zero() {
        return BigInt::zero();
    }
    (a * b).abs() / gcd_bigint(a, b)
}

fn mod_bigint(x: &BigInt, y: &BigInt) -> BigInt {
    if y.is_zero() {
        return x.clone();
    }
    let r = x % y;
    if !r.is_zero() && r.is_negative() != y.is_negative() {
        r + y
    } else {
        r
    }
}
