#![allow(
    clippy::result_large_err,
    reason = "MathError carries structured fields; boxing would add indirection on every error path"
)]
//! Numa - typed multiple dispatch over scalars, dense and sparse matrices.
//!
//! A [`MathContext`] owns a [`Dispatcher`] with the standard functions
//! registered and the [`MathConfig`] they were built with:
//!
//! ```text
//! let ctx = MathContext::new()?;
//! let diff = ctx.invoke("subtract", &[a, b])?;
//! ```
//!
//! Every binary function accepts any mix of scalars, dense and sparse
//! matrices; matrix arguments go through the elementwise algorithms of
//! `numa_matrix`, which call back into the same function per element.

mod config;
mod context;
mod functions;

use std::sync::Once;

pub use config::MathConfig;
pub use context::{ContextBuilder, MathContext};
pub use functions::nearly_equal;

pub use numa_dispatch::{
    BoundSignature, Callee, Dispatcher, Implementation, Param, Signature, TypePattern,
};
pub use numa_matrix::{
    access, column, concat, elementwise, kron, matrix_from_columns, matrix_from_rows, row,
    to_column_vector, Combiner, ScalarOp, Selector,
};
pub use numa_value::{
    BigDecimal, BigInt, BigRational, Complex64, ConversionRule, ConversionTable, DenseMatrix,
    ElementKind, Extent, Index, IndexDim, Kind, MathError, MathErrorKind, MathResult, Matrix,
    Relation, SparseMatrix, Storage, Value,
};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=numa_dispatch=debug` or `RUST_LOG=numa_matrix=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
