//! The standard function set.
//!
//! Each submodule registers one family. Binary functions register their
//! scalar signatures through `numa_matrix::suite::register_binary`, which
//! appends the matrix signatures; unary ones use `register_unary`.

mod arithmetic;
mod bitwise;
mod matrix;
mod numeric;
mod relational;

use numa_dispatch::{Callee, Dispatcher, Signature};
use numa_value::{
    index_out_of_range, not_an_integer, type_mismatch, BigDecimal, BigInt, BigRational,
    Complex64, MathError, MathResult, Value,
};
use num_traits::ToPrimitive;

use crate::config::MathConfig;

pub use relational::nearly_equal;

/// Register every standard function.
pub(crate) fn register_all(dispatcher: &mut Dispatcher, config: &MathConfig) -> MathResult<()> {
    arithmetic::register(dispatcher)?;
    bitwise::register(dispatcher)?;
    relational::register(dispatcher, config)?;
    numeric::register(dispatcher)?;
    matrix::register(dispatcher, config)?;
    tracing::debug!(
        functions = dispatcher.function_names().len(),
        "registered standard functions"
    );
    Ok(())
}

// Signature builders: one scalar kind pair, a plain function over payloads.

pub(crate) fn on_numbers<R, F>(f: F) -> MathResult<Signature>
where
    R: Into<Value>,
    F: Fn(f64, f64) -> MathResult<R> + Send + Sync + 'static,
{
    Signature::parse("number, number", move |callee, args| {
        match args {
            [Value::Number(x), Value::Number(y)] => f(*x, *y).map(Into::into),
            _ => Err(unexpected_args(callee, args)),
        }
    })
}

pub(crate) fn on_bigints<R, F>(f: F) -> MathResult<Signature>
where
    R: Into<Value>,
    F: Fn(&BigInt, &BigInt) -> MathResult<R> + Send + Sync + 'static,
{
    Signature::parse("bigint, bigint", move |callee, args| {
        match args {
            [Value::BigInt(x), Value::BigInt(y)] => f(&**x, &**y).map(Into::into),
            _ => Err(unexpected_args(callee, args)),
        }
    })
}

pub(crate) fn on_fractions<R, F>(f: F) -> MathResult<Signature>
where
    R: Into<Value>,
    F: Fn(&BigRational, &BigRational) -> MathResult<R> + Send + Sync + 'static,
{
    Signature::parse("Fraction, Fraction", move |callee, args| {
        match args {
            [Value::Fraction(x), Value::Fraction(y)] => f(&**x, &**y).map(Into::into),
            _ => Err(unexpected_args(callee, args)),
        }
    })
}

pub(crate) fn on_decimals<R, F>(f: F) -> MathResult<Signature>
where
    R: Into<Value>,
    F: Fn(&BigDecimal, &BigDecimal) -> MathResult<R> + Send + Sync + 'static,
{
    Signature::parse("BigNumber, BigNumber", move |callee, args| {
        match args {
            [Value::BigNumber(x), Value::BigNumber(y)] => f(&**x, &**y).map(Into::into),
            _ => Err(unexpected_args(callee, args)),
        }
    })
}

pub(crate) fn on_complex<R, F>(f: F) -> MathResult<Signature>
where
    R: Into<Value>,
    F: Fn(Complex64, Complex64) -> MathResult<R> + Send + Sync + 'static,
{
    Signature::parse("Complex, Complex", move |callee, args| {
        match args {
            [Value::Complex(x), Value::Complex(y)] => f(*x, *y).map(Into::into),
            _ => Err(unexpected_args(callee, args)),
        }
    })
}

pub(crate) fn on_booleans<R, F>(f: F) -> MathResult<Signature>
where
    R: Into<Value>,
    F: Fn(bool, bool) -> MathResult<R> + Send + Sync + 'static,
{
    Signature::parse("boolean, boolean", move |callee, args| {
        match args {
            [Value::Boolean(x), Value::Boolean(y)] => f(*x, *y).map(Into::into),
            _ => Err(unexpected_args(callee, args)),
        }
    })
}

#[cold]
fn unexpected_args(callee: &Callee<'_>, args: &[Value]) -> MathError {
    let got = args
        .iter()
        .map(Value::type_name)
        .collect::<Vec<_>>()
        .join(", ");
    type_mismatch(&format!("arguments of {}", callee.name()), &got)
}

// Argument coercion

/// Whether `x` is a finite whole number.
#[inline]
pub(crate) fn is_integer(x: f64) -> bool {
    x.is_finite() && x.fract() == 0.0
}

/// Require integer operands for `function`.
pub(crate) fn require_integers(function: &str, x: f64, y: f64) -> MathResult<()> {
    if is_integer(x) && is_integer(y) {
        Ok(())
    } else {
        Err(not_an_integer(function))
    }
}

/// A non-negative integer argument used as a position or dimension.
pub(crate) fn index_arg(function: &str, value: &Value) -> MathResult<usize> {
    match value {
        Value::Number(x) if is_integer(*x) => {
            if *x < 0.0 {
                Err(index_out_of_range(*x as i64, 0, None))
            } else {
                Ok(*x as usize)
            }
        }
        Value::BigInt(n) => n
            .to_usize()
            .ok_or_else(|| index_out_of_range(n.to_i64().unwrap_or(i64::MIN), 0, None)),
        _ => Err(not_an_integer(function)),
    }
}
