//! Dense row-major matrix of any rank.

use std::fmt;

use crate::errors::{
    dimension_mismatch, index_out_of_bounds, invalid_matrix, rank_mismatch, MathResult,
};
use crate::kind::{ElementKind, Kind};
use crate::value::Value;

use super::{
    element_count, offset_of, position_of, positions, replacement_values, require_scalar, Index,
    Matrix, SparseMatrix, Storage,
};

/// Dense matrix: every element stored, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct DenseMatrix {
    data: Vec<Value>,
    size: Vec<usize>,
    datatype: ElementKind,
}

impl DenseMatrix {
    /// Build from row-major elements. The element count must equal the size
    /// product and no element may be a matrix.
    pub fn new(data: Vec<Value>, size: Vec<usize>) -> MathResult<Self> {
        if size.is_empty() {
            return Err(invalid_matrix("a matrix has at least one dimension"));
        }
        if element_count(&size) != data.len() {
            return Err(invalid_matrix(format!(
                "{} elements do not fill size {:?}",
                data.len(),
                size
            )));
        }
        for value in &data {
            require_scalar(value)?;
        }
        let datatype = ElementKind::infer(data.iter().map(Value::kind));
        Ok(DenseMatrix {
            data,
            size,
            datatype,
        })
    }

    /// Build from arrays the caller already keeps consistent.
    pub(crate) fn from_parts(data: Vec<Value>, size: Vec<usize>, datatype: ElementKind) -> Self {
        DenseMatrix {
            data,
            size,
            datatype,
        }
    }

    /// One-dimensional matrix.
    pub fn from_vec(values: Vec<Value>) -> MathResult<Self> {
        let len = values.len();
        Self::new(values, vec![len])
    }

    /// Two-dimensional matrix from equally long rows.
    pub fn from_rows(rows: Vec<Vec<Value>>) -> MathResult<Self> {
        let columns = rows.first().map_or(0, Vec::len);
        let row_count = rows.len();
        let mut data = Vec::with_capacity(row_count * columns);
        for row in rows {
            if row.len() != columns {
                return Err(dimension_mismatch(&[row.len()], &[columns]));
            }
            data.extend(row);
        }
        Self::new(data, vec![row_count, columns])
    }

    /// Matrix of `size` filled with the zero of `kind`.
    pub fn zeros(size: &[usize], kind: Kind) -> MathResult<Self> {
        let zero = Value::zero_of(kind)
            .ok_or_else(|| invalid_matrix(format!("{kind} has no zero element")))?;
        Self::filled(size, &zero)
    }

    /// Matrix of `size` with every element set to `value`.
    pub fn filled(size: &[usize], value: &Value) -> MathResult<Self> {
        require_scalar(value)?;
        if size.is_empty() {
            return Err(invalid_matrix("a matrix has at least one dimension"));
        }
        Ok(DenseMatrix {
            data: vec![value.clone(); element_count(size)],
            size: size.to_vec(),
            datatype: ElementKind::Uniform(value.kind()),
        })
    }

    /// Elements in row-major order.
    #[inline]
    pub fn data(&self) -> &[Value] {
        &self.data
    }

    #[inline]
    pub fn into_data(self) -> Vec<Value> {
        self.data
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Linear offset of `position`, validating rank and bounds.
    pub fn offset(&self, position: &[usize]) -> MathResult<usize> {
        if position.len() != self.size.len() {
            return Err(rank_mismatch(position.len(), self.size.len()));
        }
        for (&i, &extent) in position.iter().zip(&self.size) {
            if i >= extent {
                return Err(index_out_of_bounds(i, extent));
            }
        }
        Ok(offset_of(&self.size, position))
    }

    /// Borrow the element at `position`.
    pub fn get_ref(&self, position: &[usize]) -> MathResult<&Value> {
        let offset = self.offset(position)?;
        Ok(&self.data[offset])
    }

    /// Resize in place, keeping the overlapping region and filling new
    /// positions with `default`.
    pub fn resize(&mut self, size: &[usize], default: &Value) -> MathResult<()> {
        require_scalar(default)?;
        if size.is_empty() {
            return Err(invalid_matrix("a matrix has at least one dimension"));
        }
        if size == self.size.as_slice() {
            return Ok(());
        }
        let mut data = vec![default.clone(); element_count(size)];
        if size.len() == self.size.len() {
            for (offset, value) in self.data.iter().enumerate() {
                let position = position_of(&self.size, offset);
                if position.iter().zip(size).all(|(&i, &extent)| i < extent) {
                    data[offset_of(size, &position)] = value.clone();
                }
            }
        } else {
            // Rank change: keep the leading elements in row-major order.
            for (slot, value) in data.iter_mut().zip(&self.data) {
                *slot = value.clone();
            }
        }
        self.data = data;
        self.size = size.to_vec();
        self.datatype = ElementKind::infer(self.data.iter().map(Value::kind));
        Ok(())
    }

    /// Same elements under a new size with the same element count.
    pub fn reshape(&self, size: &[usize]) -> MathResult<Self> {
        if size.is_empty() || element_count(size) != self.data.len() {
            return Err(dimension_mismatch(size, &self.size));
        }
        Ok(DenseMatrix {
            data: self.data.clone(),
            size: size.to_vec(),
            datatype: self.datatype,
        })
    }

    /// Transpose of a two-dimensional matrix; a vector is returned as is.
    pub fn transpose(&self) -> MathResult<Self> {
        match *self.size.as_slice() {
            [_] => Ok(self.clone()),
            [rows, columns] => {
                let mut data = Vec::with_capacity(self.data.len());
                for j in 0..columns {
                    for i in 0..rows {
                        data.push(self.data[i * columns + j].clone());
                    }
                }
                Ok(DenseMatrix {
                    data,
                    size: vec![columns, rows],
                    datatype: self.datatype,
                })
            }
            _ => Err(rank_mismatch(self.size.len(), 2)),
        }
    }

    /// Sparse copy. Vectors become `n x 1` columns.
    pub fn to_sparse(&self) -> MathResult<SparseMatrix> {
        let (rows, columns) = match *self.size.as_slice() {
            [n] => (n, 1),
            [rows, columns] => (rows, columns),
            _ => return Err(rank_mismatch(self.size.len(), 2)),
        };
        let mut values = Vec::new();
        let mut index = Vec::new();
        let mut ptr = Vec::with_capacity(columns + 1);
        for j in 0..columns {
            ptr.push(values.len());
            for i in 0..rows {
                let value = &self.data[i * columns + j];
                if !value.is_zero() {
                    values.push(value.clone());
                    index.push(i);
                }
            }
        }
        ptr.push(values.len());
        Ok(SparseMatrix::from_parts_unchecked(
            values,
            index,
            ptr,
            [rows, columns],
            self.datatype,
        ))
    }
}

impl Matrix for DenseMatrix {
    #[inline]
    fn storage(&self) -> Storage {
        Storage::Dense
    }

    #[inline]
    fn size(&self) -> &[usize] {
        &self.size
    }

    #[inline]
    fn datatype(&self) -> ElementKind {
        self.datatype
    }

    fn get(&self, position: &[usize]) -> MathResult {
        self.get_ref(position).cloned()
    }

    fn set(&mut self, position: &[usize], value: Value) -> MathResult<()> {
        require_scalar(&value)?;
        let offset = self.offset(position)?;
        let kind = value.kind();
        self.data[offset] = value;
        if self.datatype.uniform() != Some(kind) {
            self.datatype = ElementKind::infer(self.data.iter().map(Value::kind));
        }
        Ok(())
    }

    fn subset(&self, index: &Index) -> MathResult {
        index.validate(&self.size)?;
        if let Some(coords) = index.scalar_coords() {
            return self.get(&coords);
        }
        let selected: Vec<Vec<usize>> = index.dims().iter().map(|d| d.positions()).collect();
        let size = index.size();
        let mut data = Vec::with_capacity(element_count(&size));
        for local in positions(&size) {
            let source: Vec<usize> = local
                .iter()
                .zip(&selected)
                .map(|(&k, picks)| picks[k])
                .collect();
            data.push(self.data[offset_of(&self.size, &source)].clone());
        }
        let datatype = ElementKind::infer(data.iter().map(Value::kind));
        Ok(Value::dense(DenseMatrix {
            data,
            size,
            datatype,
        }))
    }

    fn subset_assign(&mut self, index: &Index, replacement: &Value) -> MathResult<()> {
        index.validate(&self.size)?;
        let size = index.size();
        let values = replacement_values(replacement, &size)?;
        let selected: Vec<Vec<usize>> = index.dims().iter().map(|d| d.positions()).collect();
        for (local, value) in positions(&size).zip(values) {
            require_scalar(&value)?;
            let target: Vec<usize> = local
                .iter()
                .zip(&selected)
                .map(|(&k, picks)| picks[k])
                .collect();
            let offset = offset_of(&self.size, &target);
            self.data[offset] = value;
        }
        self.datatype = ElementKind::infer(self.data.iter().map(Value::kind));
        Ok(())
    }

    fn map<F>(&self, mut f: F) -> MathResult<Self>
    where
        F: FnMut(&Value, &[usize]) -> MathResult,
    {
        let mut data = Vec::with_capacity(self.data.len());
        for (offset, value) in self.data.iter().enumerate() {
            let mapped = f(value, &position_of(&self.size, offset))?;
            require_scalar(&mapped)?;
            data.push(mapped);
        }
        let datatype = ElementKind::infer(data.iter().map(Value::kind));
        Ok(DenseMatrix {
            data,
            size: self.size.clone(),
            datatype,
        })
    }
}

impl fmt::Display for DenseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_level(
            f: &mut fmt::Formatter<'_>,
            data: &[Value],
            size: &[usize],
        ) -> fmt::Result {
            f.write_str("[")?;
            match size {
                [] => {}
                [_] => {
                    for (i, value) in data.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{value}")?;
                    }
                }
                [extent, rest @ ..] => {
                    let stride = element_count(rest);
                    for i in 0..*extent {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write_level(f, &data[i * stride..(i + 1) * stride], rest)?;
                    }
                }
            }
            f.write_str("]")
        }
        write_level(f, &self.data, &self.size)
    }
}
