// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Snapshot dimensions and the dense process × resource matrix.

use crate::InputError;
use std::fmt;

/// Number of processes (rows) and resource types (columns) in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Dimensions {
    /// Process count `P`.
    pub processes: usize,
    /// Resource-type count `R`.
    pub resources: usize,
}

impl Dimensions {
    /// Creates a new dimension pair.
    pub fn new(processes: usize, resources: usize) -> Self {
        Self {
            processes,
            resources,
        }
    }

    /// Number of entries in a `P × R` matrix.
    pub fn cells(&self) -> usize {
        self.processes * self.resources
    }

    /// Returns `true` if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.processes == 0 || self.resources == 0
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.processes, self.resources)
    }
}

/// A dense, row-major `P × R` matrix of resource counts.
///
/// Row `i` describes process `i`; column `j` describes resource type `j`.
/// Serialises as a list of rows.
///
/// # Examples
/// ```
/// use resource_state::Matrix;
///
/// let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
/// assert_eq!(m.get(1, 0), 3);
/// assert_eq!(m.row(0), &[1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<Vec<u64>>", into = "Vec<Vec<u64>>")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<u64>,
}

impl Matrix {
    /// Creates a matrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    /// Creates a matrix whose entry `(i, j)` is `f(i, j)`.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> u64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }

    /// Creates a matrix from a flat row-major buffer.
    pub fn from_flat(rows: usize, cols: usize, data: Vec<u64>) -> Result<Self, InputError> {
        if data.len() != rows * cols {
            return Err(InputError::ShapeMismatch {
                what: "matrix buffer".into(),
                expected: format!("{} values", rows * cols),
                actual: format!("{} values", data.len()),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Creates a matrix from a list of rows. All rows must have equal length.
    pub fn from_rows(rows: Vec<Vec<u64>>) -> Result<Self, InputError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(InputError::ShapeMismatch {
                    what: format!("row {i}"),
                    expected: format!("{cols} columns"),
                    actual: format!("{} columns", row.len()),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Number of rows (processes).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (resource types).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the shape of this matrix as [`Dimensions`].
    pub fn dims(&self) -> Dimensions {
        Dimensions::new(self.rows, self.cols)
    }

    /// Returns the entry at `(row, col)`.
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> u64 {
        assert!(row < self.rows, "row {row} out of bounds ({})", self.rows);
        assert!(col < self.cols, "column {col} out of bounds ({})", self.cols);
        self.data[row * self.cols + col]
    }

    /// Returns row `i` as a slice.
    ///
    /// # Panics
    /// Panics if `i >= rows`.
    pub fn row(&self, i: usize) -> &[u64] {
        let start = i * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Iterates over rows in index order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[u64]> {
        (0..self.rows).map(move |i| self.row(i))
    }

    /// Sums each column, returning `None` on overflow.
    pub fn column_sums(&self) -> Option<Vec<u64>> {
        let mut sums = vec![0u64; self.cols];
        for row in self.iter_rows() {
            for (s, &v) in sums.iter_mut().zip(row) {
                *s = s.checked_add(v)?;
            }
        }
        Some(sums)
    }

    /// Returns the rows as nested vectors.
    pub fn to_rows(&self) -> Vec<Vec<u64>> {
        self.iter_rows().map(<[u64]>::to_vec).collect()
    }
}

impl TryFrom<Vec<Vec<u64>>> for Matrix {
    type Error = InputError;

    fn try_from(rows: Vec<Vec<u64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<Matrix> for Vec<Vec<u64>> {
    fn from(m: Matrix) -> Self {
        m.to_rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let m = Matrix::from_rows(vec![vec![0, 1, 0], vec![2, 0, 0]]).unwrap();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        assert_eq!(m.get(1, 0), 2);
        assert_eq!(m.row(0), &[0, 1, 0]);
    }

    #[test]
    #[should_panic(expected = "row 2 out of bounds (2)")]
    fn test_get_row_out_of_bounds() {
        let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        m.get(2, 0);
    }

    #[test]
    #[should_panic(expected = "column 2 out of bounds (2)")]
    fn test_get_column_out_of_bounds() {
        let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        m.get(0, 2);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = Matrix::from_rows(vec![vec![1, 2], vec![3]]);
        assert!(matches!(result, Err(InputError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_from_flat_length_checked() {
        assert!(Matrix::from_flat(2, 2, vec![1, 2, 3]).is_err());
        let m = Matrix::from_flat(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(m.to_rows(), vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn test_empty_matrix() {
        let m = Matrix::from_rows(vec![]).unwrap();
        assert!(m.dims().is_empty());
        assert_eq!(m.iter_rows().count(), 0);
    }

    #[test]
    fn test_column_sums() {
        let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4], vec![5, 6]]).unwrap();
        assert_eq!(m.column_sums(), Some(vec![9, 12]));

        let big = Matrix::from_rows(vec![vec![u64::MAX], vec![1]]).unwrap();
        assert_eq!(big.column_sums(), None);
    }

    #[test]
    fn test_serde_as_rows() {
        let m = Matrix::from_rows(vec![vec![7, 5], vec![3, 2]]).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "[[7,5],[3,2]]");
        let back: Matrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_serde_rejects_ragged() {
        let result: Result<Matrix, _> = serde_json::from_str("[[1,2],[3]]");
        assert!(result.is_err());
    }

    #[test]
    fn test_dimensions_display() {
        assert_eq!(Dimensions::new(5, 3).to_string(), "5x3");
        assert_eq!(Dimensions::new(5, 3).cells(), 15);
    }
}
