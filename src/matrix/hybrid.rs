//! # Hybrid ELL + COO format
//!
//! Each row is split at a common width: the first `elements_in_rows` entries
//! go to a dense ELL head, the rest to a COO tail.
//!
//! ## Width selection
//!
//! The width is the smallest `w` for which the head captures at least
//! `percent`% of all nonzeros, where a width `w` captures
//! `Σ_r min(len_r, w)` entries. The sum grows by the number of rows longer
//! than `w` at each step, so a histogram of row lengths gives every
//! candidate in one sweep.
//!
//! - `percent == 0` gives width 0: an empty head and a full COO tail.
//! - `percent == 100` gives the longest row: an empty COO tail.

use log::debug;
use num_traits::Num;

use crate::constants::MAX_HYBRID_PERCENT;
use crate::error::{Error, Result};
use crate::matrix::coo::CooMatrix;
use crate::matrix::csr::CsrMatrix;
use crate::matrix::ell::{EllLayout, EllMatrix};
use crate::matrix::format::SparseFormat;
use crate::matrix::meta::MatrixMeta;

/// A sparse matrix split into an ELL head and a COO tail
#[derive(Debug, Clone)]
pub struct HybridMatrix<T> {
    /// Dimensions and nonzero count of the source matrix
    pub meta: MatrixMeta,

    /// First `ell.elements_in_rows` entries of every row
    pub ell: EllMatrix<T>,

    /// Remaining entries of every row
    pub coo: CooMatrix<T>,
}

/// Checks that `percent` lies in `[0, 100]`
pub fn validate_percent(percent: f64) -> Result<()> {
    if !percent.is_finite() || !(0.0..=MAX_HYBRID_PERCENT).contains(&percent) {
        return Err(Error::invalid(
            "percent",
            format!("{} is not within [0, {}]", percent, MAX_HYBRID_PERCENT),
        ));
    }
    Ok(())
}

/// Smallest ELL width whose head holds at least `percent`% of the nonzeros
///
/// Only row_ptr is read.
pub fn select_ell_width<T>(csr: &CsrMatrix<T>, percent: f64) -> Result<usize> {
    validate_percent(percent)?;

    let nnz = csr.nnz();
    let required = ((nnz as f64 * percent / 100.0).ceil() as usize).min(nnz);
    if required == 0 {
        return Ok(0);
    }

    let max_len = csr.max_row_len();
    let mut histogram = vec![0usize; max_len + 1];
    for len in csr.row_lengths() {
        histogram[len] += 1;
    }

    // rows_longer = number of rows with len > width
    let mut rows_longer = csr.meta.rows - histogram[0];
    let mut captured = 0;
    let mut width = 0;
    while captured < required {
        captured += rows_longer;
        width += 1;
        rows_longer -= histogram[width];
    }

    Ok(width)
}

impl<T> HybridMatrix<T>
where
    T: Copy + Num,
{
    /// Splits `csr` so the ELL head covers about `percent`% of the nonzeros
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for a percent outside `[0, 100]`, plus whatever
    /// the ELL and COO conversions report.
    pub fn from_csr(csr: &CsrMatrix<T>, percent: f64, layout: EllLayout) -> Result<Self> {
        let width = select_ell_width(csr, percent)?;

        if log::log_enabled!(log::Level::Debug) {
            let stats = csr.statistics();
            debug!(
                "hybrid split at {}% -> ELL width {} (rows min {} max {} avg {:.2} σ {:.2})",
                percent, width, stats.min, stats.max, stats.average, stats.std_dev
            );
        }

        Self::with_width(csr, width, layout)
    }

    /// Splits `csr` at an explicit ELL width
    pub fn with_width(csr: &CsrMatrix<T>, width: usize, layout: EllLayout) -> Result<Self> {
        csr.require_payload()?;

        let ell = EllMatrix::head(csr, width, layout)?;
        let coo = CooMatrix::from_csr_offset(csr, width)?;

        Ok(Self {
            meta: csr.meta,
            ell,
            coo,
        })
    }

    /// Width of the ELL head
    pub fn elements_in_rows(&self) -> usize {
        self.ell.elements_in_rows
    }

    /// Share of nonzeros held by the ELL head, in percent
    pub fn ell_share(&self) -> f64 {
        if self.meta.non_zero_count == 0 {
            return 100.0;
        }
        let head = self.meta.non_zero_count - self.coo.elements_count();
        100.0 * head as f64 / self.meta.non_zero_count as f64
    }
}

impl<T: Copy + Num> SparseFormat<T> for HybridMatrix<T> {
    fn meta(&self) -> &MatrixMeta {
        &self.meta
    }

    fn format_name(&self) -> &'static str {
        "HYBRID"
    }

    fn stored_elements(&self) -> usize {
        self.ell.stored_elements() + self.coo.stored_elements()
    }

    fn storage_bytes(&self) -> usize {
        self.ell.storage_bytes() + self.coo.storage_bytes()
    }

    /// Head entries first, then the tail
    fn triplets(&self) -> Vec<(usize, usize, T)> {
        let mut all = self.ell.triplets();
        all.extend(self.coo.triplets());
        all
    }
}
