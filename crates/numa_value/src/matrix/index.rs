//! Per-dimension selections for subset extraction and assignment.

use std::fmt;

use smallvec::SmallVec;

use crate::errors::{index_out_of_bounds, invalid_matrix, rank_mismatch, MathResult};

/// Selection along one dimension.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IndexDim {
    /// A single coordinate.
    Scalar(usize),
    /// `start..end` (exclusive) stepping by `step`.
    Range { start: usize, end: usize, step: usize },
    /// Explicit coordinates, in selection order.
    Set(Vec<usize>),
}

impl IndexDim {
    /// Range with step 1.
    pub const fn range(start: usize, end: usize) -> Self {
        IndexDim::Range {
            start,
            end,
            step: 1,
        }
    }

    /// Number of selected coordinates.
    pub fn len(&self) -> usize {
        match self {
            IndexDim::Scalar(_) => 1,
            IndexDim::Range { start, end, step } => {
                if end <= start || *step == 0 {
                    0
                } else {
                    (end - start).div_ceil(*step)
                }
            }
            IndexDim::Set(coords) => coords.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Selected coordinates, in selection order.
    pub fn positions(&self) -> Vec<usize> {
        match self {
            IndexDim::Scalar(i) => vec![*i],
            IndexDim::Range { start, end, step } => {
                if *step == 0 {
                    Vec::new()
                } else {
                    (*start..*end).step_by(*step).collect()
                }
            }
            IndexDim::Set(coords) => coords.clone(),
        }
    }

    /// Largest selected coordinate.
    pub fn max(&self) -> Option<usize> {
        match self {
            IndexDim::Scalar(i) => Some(*i),
            IndexDim::Range { .. } => self.positions().last().copied(),
            IndexDim::Set(coords) => coords.iter().copied().max(),
        }
    }
}

impl fmt::Display for IndexDim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexDim::Scalar(i) => write!(f, "{i}"),
            IndexDim::Range { start, end, step: 1 } => write!(f, "{start}:{end}"),
            IndexDim::Range { start, end, step } => write!(f, "{start}:{step}:{end}"),
            IndexDim::Set(coords) => {
                f.write_str("[")?;
                for (i, c) in coords.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{c}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// A selection with one [`IndexDim`] per matrix dimension.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Index {
    dims: Vec<IndexDim>,
}

impl Index {
    pub fn new(dims: Vec<IndexDim>) -> MathResult<Self> {
        if dims
            .iter()
            .any(|d| matches!(d, IndexDim::Range { step: 0, .. }))
        {
            return Err(invalid_matrix("index range step must be positive"));
        }
        Ok(Index { dims })
    }

    /// Index selecting one element.
    pub fn scalar(coords: &[usize]) -> Self {
        Index {
            dims: coords.iter().copied().map(IndexDim::Scalar).collect(),
        }
    }

    #[inline]
    pub fn dims(&self) -> &[IndexDim] {
        &self.dims
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Whether every dimension selects a single coordinate.
    pub fn is_scalar(&self) -> bool {
        self.dims.iter().all(|d| matches!(d, IndexDim::Scalar(_)))
    }

    /// The coordinates of a scalar index.
    pub fn scalar_coords(&self) -> Option<SmallVec<[usize; 4]>> {
        self.dims
            .iter()
            .map(|d| match d {
                IndexDim::Scalar(i) => Some(*i),
                _ => None,
            })
            .collect()
    }

    /// Size of the selection; scalar dimensions count as 1.
    pub fn size(&self) -> Vec<usize> {
        self.dims.iter().map(IndexDim::len).collect()
    }

    /// Check rank and bounds against a matrix size.
    pub fn validate(&self, size: &[usize]) -> MathResult<()> {
        if self.rank() != size.len() {
            return Err(rank_mismatch(self.rank(), size.len()));
        }
        for (dim, &extent) in self.dims.iter().zip(size) {
            if let Some(max) = dim.max().filter(|&max| max >= extent) {
                return Err(index_out_of_bounds(max, extent));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, dim) in self.dims.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{dim}")?;
        }
        f.write_str("]")
    }
}
