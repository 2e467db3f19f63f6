//! Compressed sparse column matrix.
//!
//! Column `j` owns the entries `ptr[j]..ptr[j + 1]` of `values` / `index`,
//! with strictly increasing row indices. Positions without an entry hold the
//! zero of the datatype.

use std::fmt;

use crate::errors::{index_out_of_bounds, invalid_matrix, rank_mismatch, MathResult};
use crate::kind::{ElementKind, Kind};
use crate::value::Value;

use super::{replacement_values, require_scalar, DenseMatrix, Index, Matrix, Storage};

/// Two-dimensional CSC matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct SparseMatrix {
    values: Vec<Value>,
    index: Vec<usize>,
    ptr: Vec<usize>,
    size: [usize; 2],
    datatype: ElementKind,
}

impl SparseMatrix {
    /// Build from CSC arrays, validating every structural invariant.
    pub fn from_parts(
        values: Vec<Value>,
        index: Vec<usize>,
        ptr: Vec<usize>,
        size: [usize; 2],
    ) -> MathResult<Self> {
        let [rows, columns] = size;
        if ptr.len() != columns + 1 {
            return Err(invalid_matrix(format!(
                "column pointer has {} entries, expected {}",
                ptr.len(),
                columns + 1
            )));
        }
        if values.len() != index.len() {
            return Err(invalid_matrix("values and row indices differ in length"));
        }
        if ptr.first() != Some(&0) || ptr.last() != Some(&values.len()) {
            return Err(invalid_matrix(
                "column pointer must start at 0 and end at the entry count",
            ));
        }
        if ptr.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(invalid_matrix("column pointer must be non-decreasing"));
        }
        for j in 0..columns {
            let rows_of_column = &index[ptr[j]..ptr[j + 1]];
            if let Some(&row) = rows_of_column.iter().find(|&&row| row >= rows) {
                return Err(index_out_of_bounds(row, rows));
            }
            if rows_of_column.windows(2).any(|pair| pair[0] >= pair[1]) {
                return Err(invalid_matrix(format!(
                    "row indices of column {j} are not strictly increasing"
                )));
            }
        }
        for value in &values {
            require_scalar(value)?;
        }
        let datatype = ElementKind::infer(values.iter().map(Value::kind));
        Ok(SparseMatrix {
            values,
            index,
            ptr,
            size,
            datatype,
        })
    }

    /// Build from arrays the caller already keeps consistent.
    pub(crate) fn from_parts_unchecked(
        values: Vec<Value>,
        index: Vec<usize>,
        ptr: Vec<usize>,
        size: [usize; 2],
        datatype: ElementKind,
    ) -> Self {
        SparseMatrix {
            values,
            index,
            ptr,
            size,
            datatype,
        }
    }

    /// Empty matrix; `kind` declares the datatype of the implicit zeros.
    pub fn zeros(rows: usize, columns: usize, kind: Option<Kind>) -> Self {
        SparseMatrix {
            values: Vec::new(),
            index: Vec::new(),
            ptr: vec![0; columns + 1],
            size: [rows, columns],
            datatype: kind.map_or(ElementKind::Mixed, ElementKind::Uniform),
        }
    }

    /// Sparse copy of a one or two dimensional dense matrix.
    pub fn from_dense(dense: &DenseMatrix) -> MathResult<Self> {
        dense.to_sparse()
    }

    /// Declare the datatype of a matrix built column by column. Used when
    /// the datatype cannot be inferred from the stored entries alone.
    #[must_use]
    pub fn with_datatype(mut self, datatype: ElementKind) -> Self {
        self.datatype = datatype;
        self
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.size[0]
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.size[1]
    }

    /// Number of stored entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Row index of each stored entry.
    #[inline]
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    /// Column pointers, `columns + 1` long.
    #[inline]
    pub fn ptr(&self) -> &[usize] {
        &self.ptr
    }

    /// Stored `(row, value)` entries of column `j`, by increasing row.
    pub fn column_entries(&self, j: usize) -> impl Iterator<Item = (usize, &Value)> + '_ {
        let (start, end) = (self.ptr[j], self.ptr[j + 1]);
        self.index[start..end]
            .iter()
            .copied()
            .zip(&self.values[start..end])
    }

    /// The implicit zero: zero of the datatype, or `number` zero.
    pub fn zero(&self) -> Value {
        self.datatype
            .uniform()
            .and_then(Value::zero_of)
            .unwrap_or(Value::Number(0.0))
    }

    /// Dense copy.
    pub fn to_dense(&self) -> DenseMatrix {
        let [rows, columns] = self.size;
        let zero = self.zero();
        let mut data = vec![zero.clone(); rows * columns];
        for j in 0..columns {
            for (i, value) in self.column_entries(j) {
                data[i * columns + j] = value.clone();
            }
        }
        let datatype = if data.is_empty() {
            self.datatype
        } else if self.nnz() == data.len() {
            ElementKind::infer(self.values.iter().map(Value::kind))
        } else {
            ElementKind::infer(
                self.values
                    .iter()
                    .map(Value::kind)
                    .chain(std::iter::once(zero.kind())),
            )
        };
        DenseMatrix::from_parts(data, vec![rows, columns], datatype)
    }

    /// Apply `f` to stored entries only, dropping results that are zero.
    pub fn map_stored<F>(&self, mut f: F) -> MathResult<Self>
    where
        F: FnMut(&Value, usize, usize) -> MathResult,
    {
        let mut values = Vec::with_capacity(self.values.len());
        let mut index = Vec::with_capacity(self.index.len());
        let mut ptr = Vec::with_capacity(self.ptr.len());
        for j in 0..self.columns() {
            ptr.push(values.len());
            for (i, value) in self.column_entries(j) {
                let mapped = f(value, i, j)?;
                require_scalar(&mapped)?;
                if !mapped.is_zero() {
                    values.push(mapped);
                    index.push(i);
                }
            }
        }
        ptr.push(values.len());
        Ok(Self::built(values, index, ptr, self.size, self.datatype))
    }

    /// Transpose.
    pub fn transpose(&self) -> Self {
        let [rows, columns] = self.size;
        let mut counts = vec![0usize; rows + 1];
        for &i in &self.index {
            counts[i + 1] += 1;
        }
        for i in 0..rows {
            counts[i + 1] += counts[i];
        }
        let ptr = counts.clone();
        let mut next = counts;
        let mut values = vec![Value::Number(0.0); self.nnz()];
        let mut index = vec![0usize; self.nnz()];
        for j in 0..columns {
            for (i, value) in self.column_entries(j) {
                let slot = next[i];
                values[slot] = value.clone();
                index[slot] = j;
                next[i] += 1;
            }
        }
        SparseMatrix {
            values,
            index,
            ptr,
            size: [columns, rows],
            datatype: self.datatype,
        }
    }

    /// Datatype of freshly produced entries, falling back to `declared` when
    /// there are none.
    fn built(
        values: Vec<Value>,
        index: Vec<usize>,
        ptr: Vec<usize>,
        size: [usize; 2],
        declared: ElementKind,
    ) -> Self {
        let datatype = if values.is_empty() {
            declared
        } else {
            ElementKind::infer(values.iter().map(Value::kind))
        };
        SparseMatrix {
            values,
            index,
            ptr,
            size,
            datatype,
        }
    }

    fn check_position(&self, position: &[usize]) -> MathResult<(usize, usize)> {
        let [i, j] = *position else {
            return Err(rank_mismatch(position.len(), 2));
        };
        if i >= self.rows() {
            return Err(index_out_of_bounds(i, self.rows()));
        }
        if j >= self.columns() {
            return Err(index_out_of_bounds(j, self.columns()));
        }
        Ok((i, j))
    }

    /// Entry slot of `(i, j)`: `Ok(k)` when stored, `Err(k)` for the
    /// insertion point.
    fn locate(&self, i: usize, j: usize) -> Result<usize, usize> {
        let (start, end) = (self.ptr[j], self.ptr[j + 1]);
        self.index[start..end]
            .binary_search(&i)
            .map(|k| start + k)
            .map_err(|k| start + k)
    }
}

impl Matrix for SparseMatrix {
    #[inline]
    fn storage(&self) -> Storage {
        Storage::Sparse
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
        let (i, j) = self.check_position(position)?;
        Ok(match self.locate(i, j) {
            Ok(k) => self.values[k].clone(),
            Err(_) => self.zero(),
        })
    }

    /// Setting a zero removes the stored entry.
    fn set(&mut self, position: &[usize], value: Value) -> MathResult<()> {
        require_scalar(&value)?;
        let (i, j) = self.check_position(position)?;
        let kind = value.kind();
        match (self.locate(i, j), value.is_zero()) {
            (Ok(k), true) => {
                self.values.remove(k);
                self.index.remove(k);
                for p in &mut self.ptr[j + 1..] {
                    *p -= 1;
                }
            }
            (Ok(k), false) => self.values[k] = value,
            (Err(_), true) => {}
            (Err(k), false) => {
                self.values.insert(k, value);
                self.index.insert(k, i);
                for p in &mut self.ptr[j + 1..] {
                    *p += 1;
                }
            }
        }
        if self.datatype.uniform() != Some(kind) && !self.values.is_empty() {
            self.datatype = ElementKind::infer(self.values.iter().map(Value::kind));
        }
        Ok(())
    }

    fn subset(&self, index: &Index) -> MathResult {
        index.validate(&self.size)?;
        if let Some(coords) = index.scalar_coords() {
            return self.get(&coords);
        }
        let dims = index.dims();
        let (rows, columns) = (dims[0].positions(), dims[1].positions());
        let mut values = Vec::new();
        let mut row_index = Vec::new();
        let mut ptr = Vec::with_capacity(columns.len() + 1);
        for &j in &columns {
            ptr.push(values.len());
            for (r, &i) in rows.iter().enumerate() {
                if let Ok(k) = self.locate(i, j) {
                    values.push(self.values[k].clone());
                    row_index.push(r);
                }
            }
        }
        ptr.push(values.len());
        Ok(Value::sparse(Self::built(
            values,
            row_index,
            ptr,
            [rows.len(), columns.len()],
            self.datatype,
        )))
    }

    fn subset_assign(&mut self, index: &Index, replacement: &Value) -> MathResult<()> {
        index.validate(&self.size)?;
        let size = index.size();
        let values = replacement_values(replacement, &size)?;
        let dims = index.dims();
        let (rows, columns) = (dims[0].positions(), dims[1].positions());
        // Replacement values are row-major over the selection.
        for (r, &i) in rows.iter().enumerate() {
            for (c, &j) in columns.iter().enumerate() {
                self.set(&[i, j], values[r * columns.len() + c].clone())?;
            }
        }
        Ok(())
    }

    /// Visits every position, including implicit zeros.
    fn map<F>(&self, mut f: F) -> MathResult<Self>
    where
        F: FnMut(&Value, &[usize]) -> MathResult,
    {
        let zero = self.zero();
        let mut values = Vec::new();
        let mut index = Vec::new();
        let mut ptr = Vec::with_capacity(self.ptr.len());
        for j in 0..self.columns() {
            ptr.push(values.len());
            let mut stored = self.column_entries(j).peekable();
            for i in 0..self.rows() {
                let current = match stored.peek() {
                    Some(&(row, value)) if row == i => {
                        stored.next();
                        value
                    }
                    _ => &zero,
                };
                let mapped = f(current, &[i, j])?;
                require_scalar(&mapped)?;
                if !mapped.is_zero() {
                    values.push(mapped);
                    index.push(i);
                }
            }
        }
        ptr.push(values.len());
        Ok(Self::built(values, index, ptr, self.size, self.datatype))
    }
}

impl fmt::Display for SparseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [rows, columns] = self.size;
        write!(f, "SparseMatrix [{rows} x {columns}] {{")?;
        let mut first = true;
        for j in 0..columns {
            for (i, value) in self.column_entries(j) {
                f.write_str(if first { " " } else { ", " })?;
                write!(f, "({i}, {j}): {value}")?;
                first = false;
            }
        }
        f.write_str(if first { "}" } else { " }" })
    }
}
