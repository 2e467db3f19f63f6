#![allow(
    clippy::result_large_err,
    reason = "MathError carries structured fields; boxing would add indirection on every error path"
)]
//! Numa Dispatch - runtime multiple dispatch over value kinds.
//!
//! A [`Dispatcher`] maps function names to [`TypedFunction`]s. Each function
//! holds [`Signature`]s (parameter patterns plus an implementation). A call
//! resolves the argument kind tuple to one signature:
//!
//! 1. Argument count outside every signature's arity: arity error.
//! 2. Exact matches win; the most specific (exact kind, then union, then
//!    `any`; fixed arity before variadic) and then the first registered.
//! 3. Otherwise the lowest total conversion cost wins, first registered on
//!    ties.
//! 4. Nothing reachable: dispatch error listing the accepted signatures.
//!
//! Resolutions are cached per kind tuple. Implementations receive a
//! [`Callee`] to re-enter the dispatcher for the same or another function.

mod callee;
mod dispatcher;
mod function;
mod pattern;
mod signature;
mod stack;

pub use callee::Callee;
pub use dispatcher::{BoundSignature, Dispatcher};
pub use function::{KindKey, Resolution, TypedFunction};
pub use pattern::{Param, TypePattern};
pub use signature::{Implementation, Signature};
