#![allow(
    clippy::result_large_err,
    reason = "MathError carries structured fields; boxing would add indirection on every error path"
)]
//! Numa Value - runtime values and numeric kinds for the numa dispatch core.
//!
//! This crate provides:
//! - The closed set of value kinds (`Kind`, `ElementKind`)
//! - Runtime values (`Value`, `Heap`)
//! - Structured errors (`MathError`, `MathErrorKind`, `MathResult`)
//! - The implicit conversion registry (`ConversionTable`)
//! - Dense and sparse matrix storage (`DenseMatrix`, `SparseMatrix`, `Index`)
//!
//! # Value Types
//!
//! Heap payloads are reference counted and only built through the `Value::`
//! factory methods, so cloning a value never copies a matrix.

mod conversion;
mod errors;
mod kind;
pub mod matrix;
mod value;

pub use conversion::{
    decimal_to_fraction, standard_rules, ConversionRule, ConversionTable, ConvertFn,
    MAX_SAFE_INTEGER,
};
pub use errors::{Extent, MathError, MathErrorKind, MathResult, Relation};
pub use kind::{ElementKind, Kind};
pub use matrix::{DenseMatrix, Index, IndexDim, Matrix, SparseMatrix, Storage};
pub use value::{Heap, Value};

// Re-export error constructors for use by other crates
pub use errors::{
    // Arithmetic errors
    conversion_failed,
    // Shape and index errors
    dimension_mismatch,
    division_by_zero,
    // Dispatch errors
    duplicate_signature,
    index_out_of_bounds,
    index_out_of_range,
    invalid_matrix,
    invalid_signature,
    no_matching_signature,
    not_an_integer,
    // Type errors
    not_indexable,
    rank_mismatch,
    rank_relation,
    registration_closed,
    type_mismatch,
    unknown_function,
    wrong_arg_count,
};

// Numeric payload types, re-exported so dependents share one version.
pub use bigdecimal::BigDecimal;
pub use num_bigint::BigInt;
pub use num_complex::Complex64;
pub use num_rational::BigRational;
