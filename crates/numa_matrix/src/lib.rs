#![allow(
    clippy::result_large_err,
    reason = "MathError carries structured fields; boxing would add indirection on every error path"
)]
//! Numa Matrix - elementwise algorithms over dense and sparse matrices.
//!
//! [`elementwise`] applies a dispatched binary scalar operation across two
//! operands, picking a strategy by storage pair:
//!
//! | left   | right  | strategy                                          |
//! |--------|--------|---------------------------------------------------|
//! | dense  | dense  | lockstep over linear positions                    |
//! | dense  | sparse | combine with implicit zeros, sparse if possible   |
//! | sparse | sparse | column merge; sparse when `op(0, 0)` is zero      |
//! | matrix | scalar | map; sparse keeps its pattern when `op(0, s)` is 0 |
//!
//! When both operands have a uniform datatype the operation is resolved
//! once for their common kind and reused for every element.
//!
//! The [`suite`] module turns these strategies into dispatcher signatures,
//! and the remaining modules hold matrix construction and selection helpers.

mod algorithms;
mod combine;
mod concat;
mod product;
mod scatter;
mod select;
mod solve;
pub mod suite;

pub use algorithms::elementwise;
pub use combine::{Combiner, ScalarOp};
pub use concat::{concat, matrix_from_columns, matrix_from_rows};
pub use product::kron;
pub use scatter::{union_rows, Workspace};
pub use select::{access, column, row, Selector};
pub use solve::to_column_vector;

#[cfg(test)]
mod test_support;
