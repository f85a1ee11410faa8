//! Coordinate (COO) matrix format

use log::debug;
use num_traits::Num;

use crate::error::Result;
use crate::matrix::csr::CsrMatrix;
use crate::matrix::format::SparseFormat;
use crate::matrix::meta::MatrixMeta;
use crate::utils::try_filled;

/// A sparse matrix, or the overflow part of one, as parallel triple lists
#[derive(Debug, Clone)]
pub struct CooMatrix<T> {
    /// Dimensions and nonzero count of the source matrix
    pub meta: MatrixMeta,

    /// Row index of each entry
    pub rows: Vec<usize>,

    /// Column index of each entry
    pub cols: Vec<usize>,

    /// Value of each entry
    pub data: Vec<T>,
}

impl<T> CooMatrix<T>
where
    T: Copy + Num,
{
    /// Captures every nonzero of `csr` in row order
    pub fn from_csr(csr: &CsrMatrix<T>) -> Result<Self> {
        Self::from_csr_offset(csr, 0)
    }

    /// Captures, per row, the entries after the first `element_start`
    ///
    /// This is the tail of a hybrid split whose ELL head holds
    /// `element_start` slots per row. Output buffers are sized exactly from
    /// the summed tail lengths before the single fill pass.
    pub fn from_csr_offset(csr: &CsrMatrix<T>, element_start: usize) -> Result<Self> {
        csr.require_payload()?;

        let elements_count: usize = csr
            .row_lengths()
            .map(|len| len.saturating_sub(element_start))
            .sum();
        debug!(
            "COO from CSR: skipping {} per row, {} of {} entries captured",
            element_start,
            elements_count,
            csr.nnz()
        );

        let mut rows = try_filled(elements_count, 0usize)?;
        let mut cols = try_filled(elements_count, 0usize)?;
        let mut data = try_filled(elements_count, T::zero())?;

        let mut out = 0;
        for row in 0..csr.meta.rows {
            let start = csr.row_ptr[row];
            let end = csr.row_ptr[row + 1];
            let skip = element_start.min(end - start);

            for idx in (start + skip)..end {
                rows[out] = row;
                cols[out] = csr.columns[idx];
                data[out] = csr.data[idx];
                out += 1;
            }
        }

        Ok(Self {
            meta: csr.meta,
            rows,
            cols,
            data,
        })
    }
}

impl<T> CooMatrix<T> {
    /// Number of triples held
    pub fn elements_count(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T: Copy + Num> SparseFormat<T> for CooMatrix<T> {
    fn meta(&self) -> &MatrixMeta {
        &self.meta
    }

    fn format_name(&self) -> &'static str {
        "COO"
    }

    fn stored_elements(&self) -> usize {
        self.data.len()
    }

    fn storage_bytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<T>()
            + (self.rows.len() + self.cols.len()) * std::mem::size_of::<usize>()
    }

    fn triplets(&self) -> Vec<(usize, usize, T)> {
        self.rows
            .iter()
            .zip(&self.cols)
            .zip(&self.data)
            .map(|((&r, &c), &v)| (r, c, v))
            .collect()
    }
}
