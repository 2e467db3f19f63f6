//! Context configuration.

use numa_value::{Kind, MathError, MathResult, Storage};

/// Settings the standard functions are built with.
///
/// Copied into every implementation that reads it, so a context never
/// changes configuration after it is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MathConfig {
    /// Relative tolerance for comparing `number` values. Must be positive.
    pub rel_tol: f64,
    /// Absolute tolerance for comparing `number` values. Must be at least 0.
    pub abs_tol: f64,
    /// Storage of matrices created by `matrix` and `zeros`.
    pub matrix: Storage,
    /// Kind of the elements `zeros` fills matrices with.
    pub number: Kind,
}

impl Default for MathConfig {
    fn default() -> Self {
        MathConfig {
            rel_tol: 1e-12,
            abs_tol: 1e-15,
            matrix: Storage::Dense,
            number: Kind::Number,
        }
    }
}

impl MathConfig {
    /// Check the tolerances and the default number kind.
    pub fn validate(&self) -> MathResult<()> {
        if !(self.rel_tol > 0.0 && self.rel_tol.is_finite()) {
            return Err(MathError::new(format!(
                "relative tolerance must be a positive number, got {}",
                self.rel_tol
            )));
        }
        if !(self.abs_tol >= 0.0 && self.abs_tol.is_finite()) {
            return Err(MathError::new(format!(
                "absolute tolerance must be at least 0, got {}",
                self.abs_tol
            )));
        }
        if !matches!(
            self.number,
            Kind::Number | Kind::BigNumber | Kind::BigInt | Kind::Fraction
        ) {
            return Err(MathError::new(format!(
                "number kind must be number, BigNumber, bigint or Fraction, got {}",
                self.number
            )));
        }
        Ok(())
    }
}
