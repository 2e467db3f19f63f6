//! Runtime values.
//!
//! `Value` is the tagged union the dispatcher operates on. Heap payloads
//! (big numbers, text, matrices) go through `Heap<T>` and can only be built
//! with the factory methods below, so clones stay cheap.

mod heap;

use std::fmt;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_complex::Complex64;
use num_rational::BigRational;
use num_traits::Zero;

pub use heap::Heap;

use crate::kind::Kind;
use crate::matrix::{DenseMatrix, Matrix, SparseMatrix};

/// A runtime value: one scalar of a supported kind, or a matrix.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    // Inline scalars
    Boolean(bool),
    Number(f64),
    Complex(Complex64),

    // Heap scalars
    BigInt(Heap<BigInt>),
    Fraction(Heap<BigRational>),
    BigNumber(Heap<BigDecimal>),
    Text(Heap<String>),

    // Matrices
    Dense(Heap<DenseMatrix>),
    Sparse(Heap<SparseMatrix>),
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    #[inline]
    pub fn number(x: f64) -> Self {
        Value::Number(x)
    }

    #[inline]
    pub fn complex(re: f64, im: f64) -> Self {
        Value::Complex(Complex64::new(re, im))
    }

    #[inline]
    pub fn bigint(n: impl Into<BigInt>) -> Self {
        Value::BigInt(Heap::new(n.into()))
    }

    #[inline]
    pub fn fraction(q: BigRational) -> Self {
        Value::Fraction(Heap::new(q))
    }

    /// Fraction `numer / denom`, reduced. `denom` must be non-zero.
    pub fn ratio(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Option<Self> {
        let denom = denom.into();
        if denom.is_zero() {
            return None;
        }
        Some(Value::fraction(BigRational::new(numer.into(), denom)))
    }

    #[inline]
    pub fn big_number(d: BigDecimal) -> Self {
        Value::BigNumber(Heap::new(d))
    }

    #[inline]
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(Heap::new(s.into()))
    }

    #[inline]
    pub fn dense(matrix: DenseMatrix) -> Self {
        Value::Dense(Heap::new(matrix))
    }

    #[inline]
    pub fn sparse(matrix: SparseMatrix) -> Self {
        Value::Sparse(Heap::new(matrix))
    }

    /// The zero of a scalar kind; `None` for text and matrices.
    pub fn zero_of(kind: Kind) -> Option<Self> {
        match kind {
            Kind::Boolean => Some(Value::Boolean(false)),
            Kind::Number => Some(Value::Number(0.0)),
            Kind::BigInt => Some(Value::bigint(BigInt::zero())),
            Kind::Fraction => Some(Value::fraction(BigRational::zero())),
            Kind::BigNumber => Some(Value::big_number(BigDecimal::zero())),
            Kind::Complex => Some(Value::complex(0.0, 0.0)),
            Kind::Text | Kind::DenseMatrix | Kind::SparseMatrix => None,
        }
    }
}

// Inspection

impl Value {
    /// Runtime kind tag.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Boolean(_) => Kind::Boolean,
            Value::Number(_) => Kind::Number,
            Value::Complex(_) => Kind::Complex,
            Value::BigInt(_) => Kind::BigInt,
            Value::Fraction(_) => Kind::Fraction,
            Value::BigNumber(_) => Kind::BigNumber,
            Value::Text(_) => Kind::Text,
            Value::Dense(_) => Kind::DenseMatrix,
            Value::Sparse(_) => Kind::SparseMatrix,
        }
    }

    /// Kind name for error messages.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Whether this value equals the neutral element of its kind.
    ///
    /// Text and matrices are never zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Boolean(b) => !b,
            Value::Number(x) => *x == 0.0,
            Value::Complex(z) => z.is_zero(),
            Value::BigInt(n) => n.is_zero(),
            Value::Fraction(q) => q.is_zero(),
            Value::BigNumber(d) => d.is_zero(),
            Value::Text(_) | Value::Dense(_) | Value::Sparse(_) => false,
        }
    }

    #[inline]
    pub fn is_matrix(&self) -> bool {
        matches!(self, Value::Dense(_) | Value::Sparse(_))
    }

    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(x) => Some(*x),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bigint(&self) -> Option<&BigInt> {
        match self {
            Value::BigInt(n) => Some(n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_dense(&self) -> Option<&DenseMatrix> {
        match self {
            Value::Dense(m) => Some(m),
            _ => None,
        }
    }

    #[inline]
    pub fn as_sparse(&self) -> Option<&SparseMatrix> {
        match self {
            Value::Sparse(m) => Some(m),
            _ => None,
        }
    }

    /// Size of a matrix value; scalars have an empty size.
    pub fn size(&self) -> Vec<usize> {
        match self {
            Value::Dense(m) => m.size().to_vec(),
            Value::Sparse(m) => m.size().to_vec(),
            _ => Vec::new(),
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Number(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::bigint(n)
    }
}

impl From<BigRational> for Value {
    fn from(q: BigRational) -> Self {
        Value::fraction(q)
    }
}

impl From<BigDecimal> for Value {
    fn from(d: BigDecimal) -> Self {
        Value::big_number(d)
    }
}

impl From<Complex64> for Value {
    fn from(z: Complex64) -> Self {
        Value::Complex(z)
    }
}

impl From<DenseMatrix> for Value {
    fn from(m: DenseMatrix) -> Self {
        Value::dense(m)
    }
}

impl From<SparseMatrix> for Value {
    fn from(m: SparseMatrix) -> Self {
        Value::sparse(m)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Number(x) => write!(f, "{x}"),
            Value::Complex(z) => {
                if z.im < 0.0 {
                    write!(f, "{} - {}i", z.re, -z.im)
                } else {
                    write!(f, "{} + {}i", z.re, z.im)
                }
            }
            Value::BigInt(n) => write!(f, "{n}"),
            Value::Fraction(q) => write!(f, "{q}"),
            Value::BigNumber(d) => write!(f, "{d}"),
            Value::Text(s) => write!(f, "\"{}\"", s.as_str()),
            Value::Dense(m) => write!(f, "{}", **m),
            Value::Sparse(m) => write!(f, "{}", **m),
        }
    }
}
