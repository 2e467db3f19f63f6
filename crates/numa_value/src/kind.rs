//! Value kinds: the closed set of runtime type tags the dispatcher keys on.

use std::fmt;

/// Runtime type tag of a [`Value`](crate::Value).
///
/// The set is fixed. Dispatch tables, the conversion registry and the
/// resolution cache all index by `Kind`, so adding a variant means touching
/// [`Kind::ALL`] and the conversion table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Kind {
    /// `true` / `false`; zero is `false`.
    Boolean,
    /// Native `f64`.
    Number,
    /// Arbitrary precision integer.
    BigInt,
    /// Arbitrary precision rational.
    Fraction,
    /// Arbitrary precision decimal.
    BigNumber,
    /// Complex number with `f64` parts.
    Complex,
    /// Text.
    Text,
    /// Row-major dense matrix of any rank.
    DenseMatrix,
    /// Two-dimensional compressed-sparse-column matrix.
    SparseMatrix,
}

impl Kind {
    /// Every kind, in table order.
    pub const ALL: [Kind; 9] = [
        Kind::Boolean,
        Kind::Number,
        Kind::BigInt,
        Kind::Fraction,
        Kind::BigNumber,
        Kind::Complex,
        Kind::Text,
        Kind::DenseMatrix,
        Kind::SparseMatrix,
    ];

    /// Number of kinds.
    pub const COUNT: usize = Self::ALL.len();

    /// Position of this kind in [`Kind::ALL`], used to index dense tables.
    #[inline]
    pub const fn slot(self) -> usize {
        self as usize
    }

    /// Name used in signatures and error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Boolean => "boolean",
            Kind::Number => "number",
            Kind::BigInt => "bigint",
            Kind::Fraction => "Fraction",
            Kind::BigNumber => "BigNumber",
            Kind::Complex => "Complex",
            Kind::Text => "string",
            Kind::DenseMatrix => "DenseMatrix",
            Kind::SparseMatrix => "SparseMatrix",
        }
    }

    /// Parse a signature name back into a kind.
    pub fn from_name(name: &str) -> Option<Kind> {
        Kind::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Whether values of this kind are matrices.
    #[inline]
    pub const fn is_matrix(self) -> bool {
        matches!(self, Kind::DenseMatrix | Kind::SparseMatrix)
    }

    /// Whether values of this kind take part in arithmetic.
    #[inline]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Kind::Number | Kind::BigInt | Kind::Fraction | Kind::BigNumber | Kind::Complex
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Element datatype of a matrix: one uniform kind, or mixed.
///
/// Empty matrices are `Mixed` unless a datatype was declared at
/// construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementKind {
    Uniform(Kind),
    #[default]
    Mixed,
}

impl ElementKind {
    /// Infer the datatype of a sequence of element kinds.
    pub fn infer(mut kinds: impl Iterator<Item = Kind>) -> Self {
        let Some(first) = kinds.next() else {
            return ElementKind::Mixed;
        };
        if kinds.all(|kind| kind == first) {
            ElementKind::Uniform(first)
        } else {
            ElementKind::Mixed
        }
    }

    /// The uniform kind, if any.
    #[inline]
    pub fn uniform(self) -> Option<Kind> {
        match self {
            ElementKind::Uniform(kind) => Some(kind),
            ElementKind::Mixed => None,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Uniform(kind) => write!(f, "{kind}"),
            ElementKind::Mixed => f.write_str("mixed"),
        }
    }
}
