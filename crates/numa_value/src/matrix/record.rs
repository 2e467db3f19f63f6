//! Serialized form of the matrix types.
//!
//! Matrices travel as tagged records (`{format, size, datatype, values, ...}`)
//! and are rebuilt through the validating constructors, so a malformed
//! record is rejected instead of producing a matrix that panics on access.

use std::borrow::Cow;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{invalid_matrix, MathResult};
use crate::kind::ElementKind;
use crate::value::Value;

use super::{DenseMatrix, Matrix, SparseMatrix, Storage};

#[derive(Serialize, Deserialize)]
struct DenseRecord<'a> {
    format: Storage,
    size: Cow<'a, [usize]>,
    datatype: ElementKind,
    values: Cow<'a, [Value]>,
}

#[derive(Serialize, Deserialize)]
struct SparseRecord<'a> {
    format: Storage,
    size: [usize; 2],
    datatype: ElementKind,
    values: Cow<'a, [Value]>,
    index: Cow<'a, [usize]>,
    ptr: Cow<'a, [usize]>,
}

fn require_format(found: Storage, expected: Storage) -> MathResult<()> {
    if found == expected {
        Ok(())
    } else {
        Err(invalid_matrix(format!(
            "expected a {expected} matrix record, got {found}"
        )))
    }
}

impl DenseRecord<'_> {
    fn into_matrix(self) -> MathResult<DenseMatrix> {
        require_format(self.format, Storage::Dense)?;
        let matrix = DenseMatrix::new(self.values.into_owned(), self.size.into_owned())?;
        // Nothing to infer from: keep the declared datatype.
        if matrix.is_empty() {
            let size = matrix.size().to_vec();
            return Ok(DenseMatrix::from_parts(matrix.into_data(), size, self.datatype));
        }
        Ok(matrix)
    }
}

impl SparseRecord<'_> {
    fn into_matrix(self) -> MathResult<SparseMatrix> {
        require_format(self.format, Storage::Sparse)?;
        let matrix = SparseMatrix::from_parts(
            self.values.into_owned(),
            self.index.into_owned(),
            self.ptr.into_owned(),
            self.size,
        )?;
        if matrix.nnz() == 0 {
            return Ok(matrix.with_datatype(self.datatype));
        }
        Ok(matrix)
    }
}

impl Serialize for DenseMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        DenseRecord {
            format: Storage::Dense,
            size: Cow::Borrowed(self.size()),
            datatype: self.datatype(),
            values: Cow::Borrowed(self.data()),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DenseMatrix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        DenseRecord::deserialize(deserializer)?
            .into_matrix()
            .map_err(D::Error::custom)
    }
}

impl Serialize for SparseMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SparseRecord {
            format: Storage::Sparse,
            size: [self.rows(), self.columns()],
            datatype: self.datatype(),
            values: Cow::Borrowed(self.values()),
            index: Cow::Borrowed(self.index()),
            ptr: Cow::Borrowed(self.ptr()),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SparseMatrix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        SparseRecord::deserialize(deserializer)?
            .into_matrix()
            .map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests;
