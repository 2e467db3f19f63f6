//! Relational functions: `equal`, `smaller` and `larger`.
//!
//! `number` operands compare with the tolerances of the [`MathConfig`] the
//! context was built with; arbitrary precision kinds and booleans compare
//! exactly. Complex numbers have no ordering.

use numa_dispatch::{Dispatcher, Signature};
use numa_matrix::suite::register_binary;
use numa_value::{type_mismatch, MathError, MathResult, Value};

use super::{
    on_bigints, on_booleans, on_complex, on_decimals, on_fractions, on_numbers, unexpected_args,
};
use crate::config::MathConfig;

/// Whether `a` and `b` are equal within a relative and an absolute
/// tolerance.
///
/// NaN is never equal to anything. Infinities are only equal to
/// themselves.
///
/// ```text
/// |a - b| <= max(rel_tol * max(|a|, |b|), abs_tol)
/// ```
pub fn nearly_equal(a: f64, b: f64, rel_tol: f64, abs_tol: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return false;
    }
    if !a.is_finite() || !b.is_finite() {
        return a == b;
    }
    if a == b {
        return true;
    }
    (a - b).abs() <= f64::max(rel_tol * f64::max(a.abs(), b.abs()), abs_tol)
}

pub(super) fn register(dispatcher: &mut Dispatcher, config: &MathConfig) -> MathResult<()> {
    let MathConfig {
        rel_tol, abs_tol, ..
    } = *config;
    let close = move |x: f64, y: f64| nearly_equal(x, y, rel_tol, abs_tol);

    register_binary(
        dispatcher,
        "equal",
        vec![
            on_numbers(move |x, y| Ok(close(x, y)))?,
            on_decimals(|x, y| Ok(x == y))?,
            on_bigints(|x, y| Ok(x == y))?,
            on_fractions(|x, y| Ok(x == y))?,
            on_complex(move |x, y| Ok(close(x.re, y.re) && close(x.im, y.im)))?,
            on_booleans(|x, y| Ok(x == y))?,
            equal_text()?,
        ],
    )?;
    register_binary(
        dispatcher,
        "smaller",
        vec![
            on_numbers(move |x, y| Ok(x < y && !close(x, y)))?,
            on_decimals(|x, y| Ok(x < y))?,
            on_bigints(|x, y| Ok(x < y))?,
            on_fractions(|x, y| Ok(x < y))?,
            on_complex(|_, _| Err::<bool, _>(unordered()))?,
            on_booleans(|x, y| Ok(!x & y))?,
        ],
    )?;
    register_binary(
        dispatcher,
        "larger",
        vec![
            on_numbers(move |x, y| Ok(x > y && !close(x, y)))?,
            on_decimals(|x, y| Ok(x > y))?,
            on_bigints(|x, y| Ok(x > y))?,
            on_fractions(|x, y| Ok(x > y))?,
            on_complex(|_, _| Err::<bool, _>(unordered()))?,
            on_booleans(|x, y| Ok(x & !y))?,
        ],
    )?;
    Ok(())
}

fn equal_text() -> MathResult<Signature> {
    Signature::parse("string, string", |callee, args| match args {
        [Value::Text(x), Value::Text(y)] => Ok(Value::Boolean(x.as_str() == y.as_str())),
        _ => Err(unexpected_args(callee, args)),
    })
}

#[cold]
fn unordered() -> MathError {
    type_mismatch("number, BigNumber, bigint, Fraction or boolean", "Complex")
}
