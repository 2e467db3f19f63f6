//! Bitwise functions.
//!
//! `number` operands must be integers and are truncated to 32 bits, shift
//! amounts to their low five bits. `bigint` operands keep full precision.

use numa_dispatch::{Callee, Dispatcher, Signature};
use numa_matrix::suite::register_binary;
use numa_matrix::{elementwise, ScalarOp};
use numa_value::{
    index_out_of_range, BigInt, DenseMatrix, MathResult, Matrix, SparseMatrix, Value,
};
use num_traits::{Signed, ToPrimitive};

use super::{on_bigints, on_numbers, require_integers, unexpected_args};

pub(super) fn register(dispatcher: &mut Dispatcher) -> MathResult<()> {
    register_binary(
        dispatcher,
        "bitAnd",
        vec![
            on_numbers(|x, y| int32_op("bitAnd", x, y, |a, b| a & b))?,
            on_bigints(|x, y| Ok(x & y))?,
        ],
    )?;
    register_binary(
        dispatcher,
        "bitOr",
        vec![
            on_numbers(|x, y| int32_op("bitOr", x, y, |a, b| a | b))?,
            on_bigints(|x, y| Ok(x | y))?,
        ],
    )?;
    register_binary(
        dispatcher,
        "bitXor",
        vec![
            on_numbers(|x, y| int32_op("bitXor", x, y, |a, b| a ^ b))?,
            on_bigints(|x, y| Ok(x ^ y))?,
        ],
    )?;
    register_binary(
        dispatcher,
        "leftShift",
        vec![
            on_numbers(|x, y| {
                int32_op("leftShift", x, y, |a, b| a.wrapping_shl(shift_amount(b)))
            })?,
            on_bigints(|x, y| shift_bigint(x, y, Direction::Left))?,
        ],
    )?;

    let mut right_arith = vec![
        on_numbers(|x, y| {
            int32_op("rightArithShift", x, y, |a, b| a.wrapping_shr(shift_amount(b)))
        })?,
        on_bigints(|x, y| shift_bigint(x, y, Direction::Right))?,
    ];
    right_arith.push(Signature::parse("Matrix, number | bigint", shift_matrix)?);
    right_arith.push(Signature::parse("number | bigint, Matrix", shift_by_matrix)?);
    register_binary(dispatcher, "rightArithShift", right_arith)?;

    register_binary(
        dispatcher,
        "rightLogShift",
        vec![on_numbers(|x, y| {
            require_integers("rightLogShift", x, y)?;
            let shifted = (to_int32(x) as u32).wrapping_shr(shift_amount(to_int32(y)));
            Ok(f64::from(shifted))
        })?],
    )?;
    Ok(())
}

/// Two's complement truncation of an integral `f64` to 32 bits.
#[inline]
fn to_int32(x: f64) -> i32 {
    x.rem_euclid(4_294_967_296.0) as u32 as i32
}

#[inline]
fn shift_amount(b: i32) -> u32 {
    (b as u32) & 31
}

fn int32_op(function: &str, x: f64, y: f64, op: impl Fn(i32, i32) -> i32) -> MathResult<f64> {
    require_integers(function, x, y)?;
    Ok(f64::from(op(to_int32(x), to_int32(y))))
}

#[derive(Clone, Copy)]
enum Direction {
    Left,
    Right,
}

/// Shift `x` by `y` bits; a negative amount shifts the other way.
fn shift_bigint(x: &BigInt, y: &BigInt, direction: Direction) -> MathResult<BigInt> {
    let amount = y
        .abs()
        .to_usize()
        .ok_or_else(|| index_out_of_range(y.to_i64().unwrap_or(i64::MAX), 0, None))?;
    let left = matches!(direction, Direction::Left) != y.is_negative();
    Ok(if left { x << amount } else { x >> amount })
}

/// `M >> 0` is `M`.
fn shift_matrix(callee: &Callee<'_>, args: &[Value]) -> MathResult {
    let [matrix, amount] = args else {
        return Err(unexpected_args(callee, args));
    };
    if amount.is_zero() {
        return Ok(matrix.clone());
    }
    elementwise(ScalarOp::from_callee(callee), matrix, amount)
}

/// `0 >> M` is a zero matrix of `M`'s size and storage.
fn shift_by_matrix(callee: &Callee<'_>, args: &[Value]) -> MathResult {
    let [value, matrix] = args else {
        return Err(unexpected_args(callee, args));
    };
    if !value.is_zero() {
        return elementwise(ScalarOp::from_callee(callee), value, matrix);
    }
    match matrix {
        Value::Dense(m) => Ok(Value::dense(DenseMatrix::filled(m.size(), value)?)),
        Value::Sparse(m) => Ok(Value::sparse(SparseMatrix::zeros(
            m.rows(),
            m.columns(),
            Some(value.kind()),
        ))),
        _ => Err(unexpected_args(callee, args)),
    }
}

#[cfg(test)]
mod tests;
