//! Error types for dispatch and matrix operations.
//!
//! # Structured Error Categories
//!
//! Every error carries a [`MathErrorKind`] with the structured fields of the
//! failure (shapes, counts, kinds) so a presentation layer can localize the
//! message without parsing text. The factory functions in this module are
//! the public API; they fill both `kind` and `message`.

use std::fmt;

use crate::kind::Kind;
use crate::value::Value;

/// Result of a dispatched operation.
pub type MathResult<T = Value> = Result<T, MathError>;

/// One side of a dimension comparison: a full size or only a rank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Extent {
    /// Number of dimensions.
    Rank(usize),
    /// Size per dimension.
    Size(Vec<usize>),
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extent::Rank(rank) => write!(f, "{rank}"),
            Extent::Size(size) => {
                f.write_str("[")?;
                for (i, extent) in size.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{extent}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Relation that was violated between an actual and an expected extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Relation {
    #[default]
    NotEqual,
    Less,
    Greater,
}

impl Relation {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Relation::NotEqual => "!=",
            Relation::Less => "<",
            Relation::Greater => ">",
        }
    }
}

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MathErrorKind {
    // Dispatch
    NoMatchingSignature {
        function: String,
        kinds: Vec<Kind>,
        signatures: Vec<String>,
    },
    ArityMismatch {
        function: String,
        count: usize,
        min: usize,
        /// `None` when a variadic signature accepts any larger count.
        max: Option<usize>,
    },
    UnknownFunction {
        name: String,
    },
    DuplicateSignature {
        function: String,
        signature: String,
    },
    RegistrationClosed {
        function: String,
    },
    InvalidSignature {
        text: String,
        reason: String,
    },

    // Shape and index
    DimensionMismatch {
        actual: Extent,
        expected: Extent,
        relation: Relation,
    },
    IndexOutOfRange {
        index: i64,
        min: i64,
        max: Option<i64>,
    },
    InvalidMatrix {
        reason: String,
    },

    // Type
    TypeMismatch {
        expected: String,
        got: String,
    },
    NotIndexable {
        type_name: String,
    },
    ConversionFailed {
        from: Kind,
        to: Kind,
        reason: String,
    },

    // Arithmetic
    DivisionByZero,
    NotAnInteger {
        function: String,
    },

    /// Errors without a structured category.
    Custom {
        message: String,
    },
}

impl fmt::Display for MathErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMatchingSignature {
                function,
                kinds,
                signatures,
            } => {
                write!(f, "unexpected type of argument in function {function} (")?;
                write_joined(f, kinds.iter(), ", ")?;
                f.write_str("); expected one of: ")?;
                write_joined(f, signatures.iter(), "; ")
            }
            Self::ArityMismatch {
                function,
                count,
                min,
                max,
            } => {
                write!(
                    f,
                    "wrong number of arguments in function {function} ({count} provided, "
                )?;
                match max {
                    Some(max) if max == min => write!(f, "{min} expected)"),
                    Some(max) => write!(f, "{min}-{max} expected)"),
                    None => write!(f, "{min} or more expected)"),
                }
            }
            Self::UnknownFunction { name } => write!(f, "undefined function: {name}"),
            Self::DuplicateSignature {
                function,
                signature,
            } => write!(f, "signature ({signature}) registered twice for {function}"),
            Self::RegistrationClosed { function } => write!(
                f,
                "cannot add signatures to {function}: calls have already been resolved"
            ),
            Self::InvalidSignature { text, reason } => {
                write!(f, "invalid signature \"{text}\": {reason}")
            }
            Self::DimensionMismatch {
                actual,
                expected,
                relation,
            } => write!(
                f,
                "dimension mismatch ({actual} {} {expected})",
                relation.as_symbol()
            ),
            Self::IndexOutOfRange { index, min, max } => {
                if index < min {
                    write!(f, "index out of range ({index} < {min})")
                } else if let Some(max) = max.filter(|max| index >= max) {
                    write!(f, "index out of range ({index} > {})", max - 1)
                } else {
                    write!(f, "index out of range ({index})")
                }
            }
            Self::InvalidMatrix { reason } => write!(f, "invalid matrix: {reason}"),
            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::NotIndexable { type_name } => {
                write!(f, "cannot apply a numeric index to {type_name}")
            }
            Self::ConversionFailed { from, to, reason } => {
                write!(f, "cannot convert {from} to {to}: {reason}")
            }
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::NotAnInteger { function } => {
                write!(f, "integers expected in function {function}")
            }
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
    separator: &str,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Error raised by the dispatch engine, the conversion registry or the
/// matrix algorithms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MathError {
    /// Structured error category.
    pub kind: MathErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory-built
    /// errors.
    pub message: String,
}

impl MathError {
    /// Create an uncategorized error.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: MathErrorKind::Custom {
                message: message.clone(),
            },
            message,
        }
    }

    fn from_kind(kind: MathErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }

    /// Whether this is a shape mismatch.
    #[inline]
    pub fn is_dimension_error(&self) -> bool {
        matches!(self.kind, MathErrorKind::DimensionMismatch { .. })
    }

    /// Whether this is an argument count mismatch.
    #[inline]
    pub fn is_arity_error(&self) -> bool {
        matches!(self.kind, MathErrorKind::ArityMismatch { .. })
    }
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for MathError {}

// Dispatch errors

/// No signature of `function` accepts the given kinds.
#[cold]
pub fn no_matching_signature(function: &str, kinds: &[Kind], signatures: Vec<String>) -> MathError {
    MathError::from_kind(MathErrorKind::NoMatchingSignature {
        function: function.to_string(),
        kinds: kinds.to_vec(),
        signatures,
    })
}

/// Argument count outside every signature's arity range.
#[cold]
pub fn wrong_arg_count(function: &str, count: usize, min: usize, max: Option<usize>) -> MathError {
    MathError::from_kind(MathErrorKind::ArityMismatch {
        function: function.to_string(),
        count,
        min,
        max,
    })
}

#[cold]
pub fn unknown_function(name: &str) -> MathError {
    MathError::from_kind(MathErrorKind::UnknownFunction {
        name: name.to_string(),
    })
}

#[cold]
pub fn duplicate_signature(function: &str, signature: &str) -> MathError {
    MathError::from_kind(MathErrorKind::DuplicateSignature {
        function: function.to_string(),
        signature: signature.to_string(),
    })
}

#[cold]
pub fn registration_closed(function: &str) -> MathError {
    MathError::from_kind(MathErrorKind::RegistrationClosed {
        function: function.to_string(),
    })
}

#[cold]
pub fn invalid_signature(text: &str, reason: impl Into<String>) -> MathError {
    MathError::from_kind(MathErrorKind::InvalidSignature {
        text: text.to_string(),
        reason: reason.into(),
    })
}

// Shape and index errors

/// Sizes differ; reported as `actual != expected`.
#[cold]
pub fn dimension_mismatch(actual: &[usize], expected: &[usize]) -> MathError {
    MathError::from_kind(MathErrorKind::DimensionMismatch {
        actual: Extent::Size(actual.to_vec()),
        expected: Extent::Size(expected.to_vec()),
        relation: Relation::NotEqual,
    })
}

/// Ranks differ.
#[cold]
pub fn rank_mismatch(actual: usize, expected: usize) -> MathError {
    rank_relation(actual, expected, Relation::NotEqual)
}

/// A rank violates `relation` against the expected rank.
#[cold]
pub fn rank_relation(actual: usize, expected: usize, relation: Relation) -> MathError {
    MathError::from_kind(MathErrorKind::DimensionMismatch {
        actual: Extent::Rank(actual),
        expected: Extent::Rank(expected),
        relation,
    })
}

/// Index outside `[min, max)`.
#[cold]
pub fn index_out_of_range(index: i64, min: i64, max: Option<i64>) -> MathError {
    MathError::from_kind(MathErrorKind::IndexOutOfRange { index, min, max })
}

/// Index outside `[0, len)`.
#[cold]
pub fn index_out_of_bounds(index: usize, len: usize) -> MathError {
    index_out_of_range(index as i64, 0, Some(len as i64))
}

#[cold]
pub fn invalid_matrix(reason: impl Into<String>) -> MathError {
    MathError::from_kind(MathErrorKind::InvalidMatrix {
        reason: reason.into(),
    })
}

// Type errors

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> MathError {
    MathError::from_kind(MathErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

#[cold]
pub fn not_indexable(type_name: &str) -> MathError {
    MathError::from_kind(MathErrorKind::NotIndexable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn conversion_failed(from: Kind, to: Kind, reason: impl Into<String>) -> MathError {
    MathError::from_kind(MathErrorKind::ConversionFailed {
        from,
        to,
        reason: reason.into(),
    })
}

// Arithmetic errors

#[cold]
pub fn division_by_zero() -> MathError {
    MathError::from_kind(MathErrorKind::DivisionByZero)
}

#[cold]
pub fn not_an_integer(function: &str) -> MathError {
    MathError::from_kind(MathErrorKind::NotAnInteger {
        function: function.to_string(),
    })
}

#[cfg(test)]
mod tests;
