//! Sliced COO (SCOO) matrix format
//!
//! The rows are cut into consecutive slices of `slice_size` rows. Each slice
//! stores its entries as a COO block; `index[s]..index[s + 1]` is the range
//! of slice `s` in `values`, `c_index` and `r_index`. A vectorized kernel
//! processes one slice at a time and only ever touches `slice_size` output
//! rows, which keeps its accumulation window in fast memory.
//!
//! Entries keep CSR order inside and across slices, so the concatenation of
//! all slices is exactly the CSR entry sequence.

use log::debug;
use num_traits::Num;

use crate::error::{Error, Result};
use crate::matrix::csr::CsrMatrix;
use crate::matrix::format::SparseFormat;
use crate::matrix::meta::MatrixMeta;
use crate::utils::try_filled;

/// A sparse matrix in Sliced COO format
#[derive(Debug, Clone)]
pub struct ScooMatrix<T> {
    /// Dimensions and nonzero count of the source matrix
    pub meta: MatrixMeta,

    /// Rows per slice (the last slice may hold fewer)
    pub slice_size: usize,

    /// Values in slice order (size: nnz)
    pub values: Vec<T>,

    /// Column index per entry (size: nnz)
    pub c_index: Vec<usize>,

    /// Row index per entry (size: nnz)
    pub r_index: Vec<usize>,

    /// Slice offsets into the entry arrays (size: slices + 1)
    pub index: Vec<usize>,
}

/// Borrowed view of one slice
#[derive(Debug, Clone, Copy)]
pub struct ScooSlice<'a, T> {
    /// First row covered by the slice
    pub first_row: usize,
    /// Rows covered by the slice
    pub row_count: usize,
    pub values: &'a [T],
    pub c_index: &'a [usize],
    pub r_index: &'a [usize],
}

impl<'a, T> ScooSlice<'a, T> {
    /// Entries stored in the slice
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<T> ScooMatrix<T>
where
    T: Copy + Num,
{
    /// Converts `csr` with `slice_size` rows per slice
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `slice_size` is zero, `MissingPayload` for a
    /// row_ptr-only CSR.
    pub fn from_csr(csr: &CsrMatrix<T>, slice_size: usize) -> Result<Self> {
        if slice_size == 0 {
            return Err(Error::invalid("slice_size", "must be at least one row"));
        }
        csr.require_payload()?;

        let rows = csr.meta.rows;
        let nnz = csr.nnz();
        let slices = rows.div_ceil(slice_size);

        // Slice boundaries fall on row boundaries, so they come straight from row_ptr
        let index: Vec<usize> = (0..=slices)
            .map(|s| csr.row_ptr[(s * slice_size).min(rows)])
            .collect();

        let mut values = try_filled(nnz, T::zero())?;
        let mut c_index = try_filled(nnz, 0usize)?;
        let mut r_index = try_filled(nnz, 0usize)?;

        for row in 0..rows {
            for idx in csr.row_ptr[row]..csr.row_ptr[row + 1] {
                values[idx] = csr.data[idx];
                c_index[idx] = csr.columns[idx];
                r_index[idx] = row;
            }
        }

        debug!(
            "SCOO: {} slices of {} rows, {} entries",
            slices, slice_size, nnz
        );

        Ok(Self {
            meta: csr.meta,
            slice_size,
            values,
            c_index,
            r_index,
            index,
        })
    }
}

impl<T> ScooMatrix<T> {
    /// Number of stored entries, always equal to the source nnz
    pub fn elements_count(&self) -> usize {
        self.values.len()
    }

    /// Number of slices
    pub fn slices_count(&self) -> usize {
        self.index.len() - 1
    }

    /// View of slice `s`
    ///
    /// # Panics
    ///
    /// Panics if `s >= slices_count()`.
    pub fn slice(&self, s: usize) -> ScooSlice<'_, T> {
        assert!(s < self.slices_count(), "Slice index out of bounds");

        let range = self.index[s]..self.index[s + 1];
        let first_row = s * self.slice_size;
        ScooSlice {
            first_row,
            row_count: self.slice_size.min(self.meta.rows - first_row),
            values: &self.values[range.clone()],
            c_index: &self.c_index[range.clone()],
            r_index: &self.r_index[range],
        }
    }

    /// Iterator over all slices in order
    pub fn slices(&self) -> impl Iterator<Item = ScooSlice<'_, T>> {
        (0..self.slices_count()).map(move |s| self.slice(s))
    }
}

impl<T: Copy + Num> SparseFormat<T> for ScooMatrix<T> {
    fn meta(&self) -> &MatrixMeta {
        &self.meta
    }

    fn format_name(&self) -> &'static str {
        "SCOO"
    }

    fn stored_elements(&self) -> usize {
        self.values.len()
    }

    fn storage_bytes(&self) -> usize {
        self.values.len() * std::mem::size_of::<T>()
            + (self.c_index.len() + self.r_index.len() + self.index.len())
                * std::mem::size_of::<usize>()
    }

    fn triplets(&self) -> Vec<(usize, usize, T)> {
        self.slices()
            .flat_map(|slice| {
                slice
                    .r_index
                    .iter()
                    .zip(slice.c_index)
                    .zip(slice.values)
                    .map(|((&r, &c), &v)| (r, c, v))
            })
            .collect()
    }
}
