//! Matrix storage.
//!
//! Two concrete representations share the [`Matrix`] capability set:
//!
//! - [`DenseMatrix`]: row-major elements of any rank.
//! - [`SparseMatrix`]: two-dimensional compressed sparse column storage.
//!
//! Elements are always scalars. Operations that produce new matrices infer
//! the result datatype from the produced elements.

mod dense;
mod index;
#[cfg(feature = "serde")]
mod record;
mod sparse;

use std::fmt;

use smallvec::SmallVec;

pub use dense::DenseMatrix;
pub use index::{Index, IndexDim};
pub use sparse::SparseMatrix;

use crate::errors::{dimension_mismatch, rank_mismatch, type_mismatch, MathResult};
use crate::kind::ElementKind;
use crate::value::Value;

/// Multi-dimensional position.
pub type Position = SmallVec<[usize; 4]>;

/// Storage format of a matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Storage {
    #[default]
    Dense,
    Sparse,
}

impl Storage {
    pub const fn name(self) -> &'static str {
        match self {
            Storage::Dense => "dense",
            Storage::Sparse => "sparse",
        }
    }
}

impl fmt::Display for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Capabilities shared by dense and sparse matrices.
pub trait Matrix {
    fn storage(&self) -> Storage;

    /// Extent per dimension.
    fn size(&self) -> &[usize];

    /// Element datatype.
    fn datatype(&self) -> ElementKind;

    #[inline]
    fn rank(&self) -> usize {
        self.size().len()
    }

    /// Element at `position`.
    fn get(&self, position: &[usize]) -> MathResult;

    /// Replace the element at `position`.
    fn set(&mut self, position: &[usize], value: Value) -> MathResult<()>;

    /// Extract a subset. A scalar index yields the element itself; any other
    /// index yields a matrix of the same storage sized like the index.
    fn subset(&self, index: &Index) -> MathResult;

    /// Assign `replacement` (a scalar broadcast, or a matrix matching the
    /// index size) to the selected positions.
    fn subset_assign(&mut self, index: &Index, replacement: &Value) -> MathResult<()>;

    /// Apply `f` to every position, producing a matrix of the same storage.
    fn map<F>(&self, f: F) -> MathResult<Self>
    where
        Self: Sized,
        F: FnMut(&Value, &[usize]) -> MathResult;
}

impl Value {
    /// Matrix view of a dense or sparse value.
    pub fn as_matrix(&self) -> Option<&dyn Matrix> {
        match self {
            Value::Dense(m) => Some(&**m),
            Value::Sparse(m) => Some(&**m),
            _ => None,
        }
    }
}

// Shape helpers

/// Require equal rank and equal extents; reports `a != b`.
pub fn validate_same_size(a: &[usize], b: &[usize]) -> MathResult<()> {
    if a.len() != b.len() {
        return Err(rank_mismatch(a.len(), b.len()));
    }
    if a != b {
        return Err(dimension_mismatch(a, b));
    }
    Ok(())
}

/// Size with every extent of 1 removed.
pub fn squeeze(size: &[usize]) -> Vec<usize> {
    size.iter().copied().filter(|&n| n != 1).collect()
}

/// Number of elements of a size.
#[inline]
pub fn element_count(size: &[usize]) -> usize {
    size.iter().product()
}

/// Row-major position of linear offset `offset`.
pub fn position_of(size: &[usize], mut offset: usize) -> Position {
    let mut position: Position = SmallVec::from_elem(0, size.len());
    for (slot, &extent) in position.iter_mut().zip(size).rev() {
        if extent > 0 {
            *slot = offset % extent;
            offset /= extent;
        }
    }
    position
}

/// Linear row-major offset of `position`; the caller validates bounds.
pub fn offset_of(size: &[usize], position: &[usize]) -> usize {
    position
        .iter()
        .zip(size)
        .fold(0, |acc, (&i, &extent)| acc * extent + i)
}

/// Reject nested matrices.
pub(crate) fn require_scalar(value: &Value) -> MathResult<()> {
    if value.is_matrix() {
        return Err(type_mismatch("scalar element", value.type_name()));
    }
    Ok(())
}

/// Elements of `replacement` in row-major order, broadcast to `count`
/// positions when it is a scalar. A matrix replacement must match `size`
/// once extents of 1 are ignored.
pub(crate) fn replacement_values(
    replacement: &Value,
    size: &[usize],
) -> MathResult<Vec<Value>> {
    let count = element_count(size);
    match replacement {
        Value::Dense(m) => {
            if squeeze(m.size()) != squeeze(size) {
                return Err(dimension_mismatch(m.size(), size));
            }
            Ok(m.data().to_vec())
        }
        Value::Sparse(m) => {
            if squeeze(m.size()) != squeeze(size) {
                return Err(dimension_mismatch(m.size(), size));
            }
            Ok(m.to_dense().into_data())
        }
        scalar => Ok(vec![scalar.clone(); count]),
    }
}

/// Every position of `size`, in row-major order.
pub(crate) fn positions(size: &[usize]) -> impl Iterator<Item = Position> + '_ {
    (0..element_count(size)).map(move |offset| position_of(size, offset))
}
