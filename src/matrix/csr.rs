//! Compressed Sparse Row (CSR) matrix format implementation

use std::fmt;

use log::debug;
use num_traits::Num;

use crate::error::{Axis, Error, Result};
use crate::matrix::description::MatrixDescription;
use crate::matrix::format::SparseFormat;
use crate::matrix::meta::MatrixMeta;
use crate::matrix::statistics::RowStatistics;
use crate::utils::{exclusive_scan, try_filled};

/// Whether the column/value payload of a CSR is materialized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CsrPayload {
    /// row_ptr, columns and data
    #[default]
    Full,
    /// row_ptr only, for sizing and statistics
    RowPtrOnly,
}

/// A sparse matrix in Compressed Sparse Row (CSR) format
///
/// The CSR format stores a sparse matrix using three arrays:
/// - row_ptr: Array of size rows + 1 containing offsets into columns and data
/// - columns: Array of size nnz containing column indices of non-zero elements
/// - data: Array of size nnz containing the non-zero values
///
/// Every other format in this crate is derived from a CSR instance.
#[derive(Clone)]
pub struct CsrMatrix<T> {
    /// Dimensions and nonzero count
    pub meta: MatrixMeta,

    /// Row pointers (size: rows + 1)
    /// row_ptr[i] is the index in columns and data where row i starts
    /// row_ptr[rows] is equal to nnz
    pub row_ptr: Vec<usize>,

    /// Column indices (size: nnz, or empty in row_ptr-only mode)
    pub columns: Vec<usize>,

    /// Non-zero values (size: nnz, or empty in row_ptr-only mode)
    pub data: Vec<T>,

    payload: CsrPayload,
}

fn normalise(index: usize, base: usize, bound: usize, axis: Axis) -> Result<usize> {
    index
        .checked_sub(base)
        .filter(|&i| i < bound)
        .ok_or(Error::OutOfRange { axis, index, bound })
}

impl<T> CsrMatrix<T>
where
    T: Copy + Num,
{
    /// Builds a CSR matrix from an unsorted triple list
    ///
    /// Entries are validated up front, counted per row, and then scattered
    /// through a per-row write cursor, so entries of one row keep the order
    /// in which they were supplied.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if any row or column index exceeds the declared
    ///   dimensions after base normalisation
    /// - `Allocation` if the row pointer array cannot be allocated for the
    ///   declared row count
    pub fn from_description(desc: &MatrixDescription<T>, payload: CsrPayload) -> Result<Self> {
        let base = desc.base.offset();
        let rows = desc.rows;
        let cols = desc.cols;

        for &(row, col, _) in &desc.entries {
            normalise(row, base, rows, Axis::Row)?;
            normalise(col, base, cols, Axis::Column)?;
        }

        let meta = MatrixMeta::new(rows, cols, desc.entries.len())?;
        rows.checked_add(1).ok_or(Error::Allocation {
            elements: usize::MAX,
        })?;

        // Count non-zeros per row
        let mut row_counts = try_filled(rows, 0usize)?;
        for &(row, _, _) in &desc.entries {
            row_counts[row - base] += 1;
        }

        // Compute row pointers via prefix sum
        let row_ptr = exclusive_scan(&row_counts)?;

        if payload == CsrPayload::RowPtrOnly {
            debug!("built row_ptr-only CSR: {} × {}, nnz {}", rows, cols, meta.non_zero_count);
            return Ok(Self {
                meta,
                row_ptr,
                columns: Vec::new(),
                data: Vec::new(),
                payload,
            });
        }

        let nnz = meta.non_zero_count;
        let mut columns = try_filled(nnz, 0usize)?;
        let mut data = try_filled(nnz, T::zero())?;

        // Scatter through per-row write cursors
        let mut cursor = row_ptr[..rows].to_vec();
        for &(row, col, value) in &desc.entries {
            let r = row - base;
            let pos = cursor[r];

            columns[pos] = col - base;
            data[pos] = value;

            cursor[r] += 1;
        }

        debug!("built CSR: {} × {}, nnz {}", rows, cols, nnz);

        Ok(Self {
            meta,
            row_ptr,
            columns,
            data,
            payload,
        })
    }

    /// Wraps existing CSR arrays after checking every CSR invariant
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if array lengths disagree or row_ptr is not a
    ///   valid offset sequence
    /// - `OutOfRange` if a column index is `>= cols`
    /// - `Allocation` if `rows + 1` overflows
    pub fn from_raw_parts(
        rows: usize,
        cols: usize,
        row_ptr: Vec<usize>,
        columns: Vec<usize>,
        data: Vec<T>,
    ) -> Result<Self> {
        let ptr_len = rows.checked_add(1).ok_or(Error::Allocation {
            elements: usize::MAX,
        })?;
        if row_ptr.len() != ptr_len {
            return Err(Error::invalid("row_ptr", "row_ptr.len() must be rows + 1"));
        }
        if columns.len() != data.len() {
            return Err(Error::invalid("columns", "columns.len() must equal data.len()"));
        }
        if row_ptr[0] != 0 {
            return Err(Error::invalid("row_ptr", "row_ptr[0] must be 0"));
        }
        if row_ptr[rows] != columns.len() {
            return Err(Error::invalid("row_ptr", "row_ptr[rows] must equal columns.len()"));
        }
        if row_ptr.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::invalid("row_ptr", "row_ptr must be non-decreasing"));
        }
        if let Some(&col) = columns.iter().find(|&&c| c >= cols) {
            return Err(Error::OutOfRange {
                axis: Axis::Column,
                index: col,
                bound: cols,
            });
        }

        let meta = MatrixMeta::new(rows, cols, columns.len())?;

        Ok(Self {
            meta,
            row_ptr,
            columns,
            data,
            payload: CsrPayload::Full,
        })
    }

    /// Creates an empty matrix with the given dimensions
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            meta: MatrixMeta {
                rows,
                cols,
                non_zero_count: 0,
            },
            row_ptr: vec![0; rows + 1],
            columns: Vec::new(),
            data: Vec::new(),
            payload: CsrPayload::Full,
        }
    }

    /// Creates an identity matrix of the given size
    pub fn identity(n: usize) -> Self {
        Self {
            meta: MatrixMeta {
                rows: n,
                cols: n,
                non_zero_count: n,
            },
            row_ptr: (0..=n).collect(),
            columns: (0..n).collect(),
            data: vec![T::one(); n],
            payload: CsrPayload::Full,
        }
    }

    /// Returns an iterator over the non-zero elements in row i
    ///
    /// Each item is a tuple (column, value) in stored order.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows` or the matrix was built row_ptr-only.
    pub fn row_iter(&self, i: usize) -> impl Iterator<Item = (usize, &T)> {
        assert!(i < self.meta.rows, "Row index out of bounds");
        assert!(self.has_payload(), "row_ptr-only CSR has no entries");

        let start = self.row_ptr[i];
        let end = self.row_ptr[i + 1];

        self.columns[start..end]
            .iter()
            .zip(&self.data[start..end])
            .map(|(&col, val)| (col, val))
    }

    /// Fails with `MissingPayload` on a row_ptr-only matrix
    pub(crate) fn require_payload(&self) -> Result<()> {
        if self.has_payload() {
            Ok(())
        } else {
            Err(Error::MissingPayload)
        }
    }
}

impl<T> CsrMatrix<T> {
    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.meta.non_zero_count
    }

    /// Whether columns and data are materialized
    pub fn has_payload(&self) -> bool {
        self.payload == CsrPayload::Full
    }

    /// Number of entries stored in row `i`
    pub fn row_len(&self, i: usize) -> usize {
        self.row_ptr[i + 1] - self.row_ptr[i]
    }

    /// Per-row entry counts
    pub fn row_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.row_ptr.windows(2).map(|w| w[1] - w[0])
    }

    /// Length of the longest row, 0 for a matrix without rows
    pub fn max_row_len(&self) -> usize {
        self.row_lengths().max().unwrap_or(0)
    }

    /// Nonzeros-per-row statistics of this matrix
    pub fn statistics(&self) -> RowStatistics {
        RowStatistics::from_row_ptr(&self.meta, &self.row_ptr)
    }
}

impl<T: Copy + Num> SparseFormat<T> for CsrMatrix<T> {
    fn meta(&self) -> &MatrixMeta {
        &self.meta
    }

    fn format_name(&self) -> &'static str {
        "CSR"
    }

    fn stored_elements(&self) -> usize {
        self.data.len()
    }

    fn storage_bytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<T>()
            + (self.columns.len() + self.row_ptr.len()) * std::mem::size_of::<usize>()
    }

    /// Empty for a row_ptr-only matrix
    fn triplets(&self) -> Vec<(usize, usize, T)> {
        if !self.has_payload() {
            return Vec::new();
        }
        (0..self.meta.rows)
            .flat_map(|row| self.row_iter(row).map(move |(col, &val)| (row, col, val)))
            .collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for CsrMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CsrMatrix {{")?;
        writeln!(f, "  dimensions: {} × {}", self.meta.rows, self.meta.cols)?;
        writeln!(f, "  nnz: {}", self.nnz())?;

        if !self.has_payload() {
            writeln!(f, "  (row_ptr only)")?;
            return write!(f, "}}");
        }

        // Print a sample of the matrix content
        let max_rows_to_print = 5.min(self.meta.rows);

        if max_rows_to_print > 0 {
            writeln!(f, "  content sample:")?;

            for i in 0..max_rows_to_print {
                write!(f, "    row {}: ", i)?;
                let start = self.row_ptr[i];
                let end = self.row_ptr[i + 1];

                if start == end {
                    writeln!(f, "(empty)")?;
                } else {
                    let max_elements = 5.min(end - start);

                    for j in start..(start + max_elements) {
                        write!(f, "({}, {:?}) ", self.columns[j], self.data[j])?;
                    }

                    if end - start > max_elements {
                        write!(f, "... ({} more)", end - start - max_elements)?;
                    }

                    writeln!(f)?;
                }
            }

            if self.meta.rows > max_rows_to_print {
                writeln!(f, "    ... ({} more rows)", self.meta.rows - max_rows_to_print)?;
            }
        }

        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::description::IndexBase;

    fn two_row_example() -> MatrixDescription<f64> {
        MatrixDescription::new(2, 3, vec![(0, 0, 1.0), (0, 2, 2.0), (1, 1, 3.0)])
    }

    #[test]
    fn test_build_from_description() {
        let csr = CsrMatrix::from_description(&two_row_example(), CsrPayload::Full).unwrap();

        assert_eq!(csr.row_ptr, vec![0, 2, 3]);
        assert_eq!(csr.columns, vec![0, 2, 1]);
        assert_eq!(csr.data, vec![1.0, 2.0, 3.0]);
        assert_eq!(csr.meta, MatrixMeta { rows: 2, cols: 3, non_zero_count: 3 });
    }

    #[test]
    fn test_unsorted_entries_keep_row_order() {
        let desc = MatrixDescription::new(
            3,
            4,
            vec![(2, 3, 1), (0, 1, 2), (2, 0, 3), (0, 0, 4), (1, 2, 5)],
        );
        let csr = CsrMatrix::from_description(&desc, CsrPayload::Full).unwrap();

        assert_eq!(csr.row_ptr, vec![0, 2, 3, 5]);
        let row0: Vec<_> = csr.row_iter(0).collect();
        assert_eq!(row0, vec![(1, &2), (0, &4)]);
        let row2: Vec<_> = csr.row_iter(2).collect();
        assert_eq!(row2, vec![(3, &1), (0, &3)]);
    }

    #[test]
    fn test_one_based_entries_are_normalised() {
        let desc = MatrixDescription::new(2, 2, vec![(1, 1, 5.0), (2, 2, 6.0)])
            .with_base(IndexBase::One);
        let csr = CsrMatrix::from_description(&desc, CsrPayload::Full).unwrap();

        assert_eq!(csr.row_ptr, vec![0, 1, 2]);
        assert_eq!(csr.columns, vec![0, 1]);
    }

    #[test]
    fn test_out_of_range_entries() {
        let desc = MatrixDescription::new(2, 2, vec![(0, 2, 1.0)]);
        let err = CsrMatrix::from_description(&desc, CsrPayload::Full).unwrap_err();
        assert!(matches!(
            err,
            Error::OutOfRange { axis: Axis::Column, index: 2, bound: 2 }
        ));

        let desc = MatrixDescription::new(2, 2, vec![(0, 1, 1.0)]).with_base(IndexBase::One);
        let err = CsrMatrix::from_description(&desc, CsrPayload::Full).unwrap_err();
        assert!(matches!(err, Error::OutOfRange { axis: Axis::Row, index: 0, .. }));
    }

    #[test]
    fn test_row_ptr_only() {
        let csr = CsrMatrix::from_description(&two_row_example(), CsrPayload::RowPtrOnly).unwrap();

        assert_eq!(csr.row_ptr, vec![0, 2, 3]);
        assert!(!csr.has_payload());
        assert!(csr.columns.is_empty());
        assert!(matches!(csr.require_payload(), Err(Error::MissingPayload)));
        assert_eq!(csr.max_row_len(), 2);
    }

    #[test]
    fn test_from_raw_parts_validation() {
        let columns = vec![0, 1, 1, 0, 2];
        let values = vec![1, 2, 3, 4, 5];
        let valid =
            CsrMatrix::from_raw_parts(3, 3, vec![0, 2, 3, 5], columns.clone(), values.clone());
        assert!(valid.is_ok());

        let missing = CsrMatrix::from_raw_parts(3, 3, vec![0, 2, 3], columns, values);
        assert!(matches!(missing, Err(Error::InvalidParameter { name: "row_ptr", .. })));

        let decreasing = CsrMatrix::from_raw_parts(2, 3, vec![0, 2, 1], vec![0], vec![1]);
        assert!(matches!(decreasing, Err(Error::InvalidParameter { .. })));

        let lengths = CsrMatrix::from_raw_parts(1, 3, vec![0, 2], vec![0, 1], vec![1]);
        assert!(matches!(lengths, Err(Error::InvalidParameter { name: "columns", .. })));

        let column = CsrMatrix::from_raw_parts(1, 2, vec![0, 1], vec![2], vec![1]);
        assert!(matches!(column, Err(Error::OutOfRange { axis: Axis::Column, .. })));
    }

    #[test]
    fn test_identity() {
        let identity = CsrMatrix::<i32>::identity(3);

        assert_eq!(identity.nnz(), 3);
        assert_eq!(identity.row_ptr, vec![0, 1, 2, 3]);
        assert_eq!(identity.columns, vec![0, 1, 2]);
        assert_eq!(identity.data, vec![1, 1, 1]);
    }

    #[test]
    fn test_debug_output() {
        let csr = CsrMatrix::from_description(&two_row_example(), CsrPayload::Full).unwrap();
        let text = format!("{:?}", csr);
        assert!(text.contains("dimensions: 2 × 3"));
        assert!(text.contains("row 0: (0, 1.0) (2, 2.0)"));
    }
}
