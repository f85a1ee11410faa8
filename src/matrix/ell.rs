//! ELLPACK (ELL) matrix format
//!
//! Every row occupies exactly `elements_in_rows` slots. Rows with fewer
//! entries are padded with value zero and the sentinel column index
//! `meta.cols`, which no real entry can carry, so kernels skip a slot by
//! testing `col < cols`.
//!
//! ## Width policies
//!
//! - [`EllMatrix::from_csr`] uses the longest row as the width and never
//!   loses entries.
//! - [`EllMatrix::with_width`] takes the width from the caller. Rows longer
//!   than the width are rejected with [`Error::RowOverflow`] under
//!   [`EllOverflow::Reject`], or cut down under [`EllOverflow::Truncate`]
//!   with a warning naming the number of dropped entries.
//! - The hybrid converter fills a narrower head without checks and hands the
//!   excess of every row to its COO tail.

use log::{debug, warn};
use ndarray::{ArrayView2, ShapeBuilder};
use num_traits::Num;

use crate::error::{Error, Result};
use crate::matrix::csr::CsrMatrix;
use crate::matrix::format::SparseFormat;
use crate::matrix::meta::MatrixMeta;
use crate::utils::{checked_slots, try_filled};

/// Placement of the `rows × width` slots in the flat buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EllLayout {
    /// Slot `(r, k)` at `r * width + k`
    #[default]
    RowMajor,
    /// Slot `(r, k)` at `k * rows + r`, coalesced for one-thread-per-row kernels
    ColumnMajor,
}

impl EllLayout {
    /// Flat buffer position of slot `k` of `row`
    #[inline]
    pub fn slot(&self, rows: usize, width: usize, row: usize, k: usize) -> usize {
        match self {
            EllLayout::RowMajor => row * width + k,
            EllLayout::ColumnMajor => k * rows + row,
        }
    }
}

/// What a fixed-width conversion does with rows longer than the width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EllOverflow {
    /// Fail with `Error::RowOverflow`
    #[default]
    Reject,
    /// Keep the first `width` entries of each row, drop and report the rest
    Truncate,
}

/// A sparse matrix in fixed-width padded ELL format
#[derive(Debug, Clone)]
pub struct EllMatrix<T> {
    /// Dimensions and nonzero count of the source matrix
    pub meta: MatrixMeta,

    /// Slots per row
    pub elements_in_rows: usize,

    /// Buffer ordering
    pub layout: EllLayout,

    /// Values (size: rows × elements_in_rows), zero in padded slots
    pub data: Vec<T>,

    /// Column indices (size: rows × elements_in_rows), `meta.cols` in padded slots
    pub columns: Vec<usize>,
}

impl<T> EllMatrix<T>
where
    T: Copy + Num,
{
    /// Number of slots an auto-width conversion would allocate
    ///
    /// Only row_ptr is read, so a row_ptr-only CSR is accepted. Callers use
    /// this to check a memory budget before converting.
    pub fn estimate_size(csr: &CsrMatrix<T>) -> Result<usize> {
        checked_slots(csr.meta.rows, csr.max_row_len())
    }

    /// Converts with the longest row length as the width
    pub fn from_csr(csr: &CsrMatrix<T>, layout: EllLayout) -> Result<Self> {
        let width = csr.max_row_len();
        Self::with_width(csr, width, layout, EllOverflow::Reject)
    }

    /// Converts with a caller supplied width
    ///
    /// # Errors
    ///
    /// - `MissingPayload` for a row_ptr-only CSR
    /// - `RowOverflow` if a row exceeds `width` under `EllOverflow::Reject`
    /// - `Allocation` if `rows × width` cannot be allocated
    pub fn with_width(
        csr: &CsrMatrix<T>,
        width: usize,
        layout: EllLayout,
        overflow: EllOverflow,
    ) -> Result<Self> {
        csr.require_payload()?;
        check_overflow(csr, width, overflow)?;

        let mut ell = Self::padded(csr.meta, width, layout)?;
        ell.fill_from(csr);
        Ok(ell)
    }

    /// Head of a hybrid split: excess entries are left for the COO tail
    pub(crate) fn head(csr: &CsrMatrix<T>, width: usize, layout: EllLayout) -> Result<Self> {
        csr.require_payload()?;
        let mut ell = Self::padded(csr.meta, width, layout)?;
        ell.fill_from(csr);
        Ok(ell)
    }

    /// An ELL matrix in which every slot is padding
    pub(crate) fn padded(meta: MatrixMeta, width: usize, layout: EllLayout) -> Result<Self> {
        let slots = checked_slots(meta.rows, width)?;
        debug!(
            "allocating ELL: {} rows × {} slots ({:?})",
            meta.rows, width, layout
        );

        Ok(Self {
            meta,
            elements_in_rows: width,
            layout,
            data: try_filled(slots, T::zero())?,
            columns: try_filled(slots, meta.cols)?,
        })
    }

    fn fill_from(&mut self, csr: &CsrMatrix<T>) {
        let rows = self.meta.rows;
        let width = self.elements_in_rows;

        for row in 0..rows {
            let start = csr.row_ptr[row];
            let end = csr.row_ptr[row + 1].min(start + width);

            for (k, idx) in (start..end).enumerate() {
                let pos = self.layout.slot(rows, width, row, k);
                self.columns[pos] = csr.columns[idx];
                self.data[pos] = csr.data[idx];
            }
        }
    }

    /// Value and column of slot `k` in `row`
    pub fn get(&self, row: usize, k: usize) -> (usize, T) {
        let pos = self
            .layout
            .slot(self.meta.rows, self.elements_in_rows, row, k);
        (self.columns[pos], self.data[pos])
    }

    /// Real entries of `row`, padding skipped
    pub fn row_entries(&self, row: usize) -> impl Iterator<Item = (usize, T)> + '_ {
        (0..self.elements_in_rows)
            .map(move |k| self.get(row, k))
            .filter(move |&(col, _)| !self.is_sentinel(col))
    }

    /// Number of real entries stored across all rows
    pub fn stored_nonzeros(&self) -> usize {
        self.columns.iter().filter(|&&c| !self.is_sentinel(c)).count()
    }
}

impl<T> EllMatrix<T> {
    /// Column index marking a padded slot
    pub fn sentinel(&self) -> usize {
        self.meta.cols
    }

    /// Whether `col` is the padding marker
    #[inline]
    pub fn is_sentinel(&self, col: usize) -> bool {
        col >= self.meta.cols
    }

    fn shape_view<'a, U>(&self, buffer: &'a [U]) -> Result<ArrayView2<'a, U>> {
        let shape = (self.meta.rows, self.elements_in_rows);
        let view = match self.layout {
            EllLayout::RowMajor => ArrayView2::from_shape(shape, buffer),
            EllLayout::ColumnMajor => ArrayView2::from_shape(shape.f(), buffer),
        };
        view.map_err(|e| Error::invalid("ell", e.to_string()))
    }

    /// Values as a `rows × elements_in_rows` view regardless of layout
    pub fn data_view(&self) -> Result<ArrayView2<'_, T>> {
        self.shape_view(&self.data)
    }

    /// Column indices as a `rows × elements_in_rows` view regardless of layout
    pub fn columns_view(&self) -> Result<ArrayView2<'_, usize>> {
        self.shape_view(&self.columns)
    }
}

/// Applies the overflow policy for a fixed width, returning how many
/// nonzeros the width drops
pub(crate) fn check_overflow<T>(
    csr: &CsrMatrix<T>,
    width: usize,
    overflow: EllOverflow,
) -> Result<usize> {
    match overflow {
        EllOverflow::Reject => {
            let mut lengths = csr.row_lengths().enumerate();
            if let Some((row, length)) = lengths.find(|&(_, len)| len > width) {
                return Err(Error::RowOverflow { row, length, width });
            }
            Ok(0)
        }
        EllOverflow::Truncate => {
            let dropped: usize = csr.row_lengths().map(|len| len.saturating_sub(width)).sum();
            if dropped > 0 {
                warn!(
                    "ELL width {} truncates {} of {} nonzeros",
                    width,
                    dropped,
                    csr.nnz()
                );
            }
            Ok(dropped)
        }
    }
}

impl<T: Copy + Num> SparseFormat<T> for EllMatrix<T> {
    fn meta(&self) -> &MatrixMeta {
        &self.meta
    }

    fn format_name(&self) -> &'static str {
        "ELL"
    }

    fn stored_elements(&self) -> usize {
        self.data.len()
    }

    fn storage_bytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<T>()
            + self.columns.len() * std::mem::size_of::<usize>()
    }

    fn triplets(&self) -> Vec<(usize, usize, T)> {
        (0..self.meta.rows)
            .flat_map(|row| self.row_entries(row).map(move |(col, val)| (row, col, val)))
            .collect()
    }
}
