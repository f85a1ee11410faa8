//! # spmv-formats: sparse matrix storage formats for SpMV kernels
//!
//! Converts a sparse matrix between the layouts used by sparse
//! matrix–vector multiplication kernels:
//!
//! - **CSR**: row offsets plus parallel column/value arrays, built from a raw
//!   triple list. Every other format derives from it.
//! - **ELL**: a fixed number of slots per row, padded with a sentinel column
//!   (`cols`) and zero values.
//! - **COO**: parallel row/column/value lists.
//! - **Hybrid**: an ELL head holding a chosen share of the nonzeros plus a
//!   COO tail holding the rest of every row.
//! - **SCOO**: COO grouped into slices of consecutive rows.
//!
//! Conversions are pure: they read a CSR and return a freshly allocated
//! representation, validating sizes and parameters before filling anything.
//!
//! ## Usage
//!
//! ```
//! use spmv_formats::{CsrMatrix, CsrPayload, EllLayout, EllMatrix, MatrixDescription};
//!
//! let desc = MatrixDescription::new(2, 3, vec![(0, 0, 1.0), (0, 2, 2.0), (1, 1, 3.0)]);
//! let csr = CsrMatrix::from_description(&desc, CsrPayload::Full).unwrap();
//! assert_eq!(csr.row_ptr, vec![0, 2, 3]);
//!
//! let ell = EllMatrix::from_csr(&csr, EllLayout::RowMajor).unwrap();
//! assert_eq!(ell.data, vec![1.0, 2.0, 3.0, 0.0]);
//! assert_eq!(ell.columns, vec![0, 2, 1, 3]); // 3 == cols marks padding
//! ```
//!
//! All formats at once, from a Matrix Market file:
//!
//! ```no_run
//! use spmv_formats::{convert_all, ConversionConfig, MatrixMarketIO};
//!
//! let csr = MatrixMarketIO::read_csr("matrix.mtx")?;
//! let formats = convert_all(&csr, &ConversionConfig::default())?;
//! println!("hybrid ELL width: {}", formats.hybrid.elements_in_rows());
//! # Ok::<(), spmv_formats::Error>(())
//! ```

pub mod constants;
pub mod error;
pub mod io;
pub mod matrix;
pub mod parallel;
pub mod utils;

// Re-export primary components
pub use error::{Axis, Error, Result};
pub use io::MatrixMarketIO;
pub use matrix::{
    select_ell_width, CooMatrix, CsrMatrix, CsrPayload, EllLayout, EllMatrix, EllOverflow,
    HybridMatrix, IndexBase, MatrixDescription, MatrixMeta, RowStatistics, ScooMatrix, ScooSlice,
    SparseFormat,
};
pub use matrix::config::{ConversionConfig, SystemParameters};
pub use utils::{coo_to_sprs_triplets, from_sprs_csr, to_sprs_csr};

use log::debug;
use num_traits::Num;

/// Every derived format of one CSR matrix
#[derive(Debug, Clone)]
pub struct ConvertedFormats<T> {
    pub ell: EllMatrix<T>,
    pub coo: CooMatrix<T>,
    pub hybrid: HybridMatrix<T>,
    pub scoo: ScooMatrix<T>,
}

/// Builds the ELL format as configured, in parallel when it is large enough
pub fn convert_ell<T>(csr: &CsrMatrix<T>, config: &ConversionConfig) -> Result<EllMatrix<T>>
where
    T: Copy + Num + Send + Sync,
{
    let width = config.ell_width.unwrap_or_else(|| csr.max_row_len());
    let slots = utils::checked_slots(csr.meta.rows, width)?;

    if config.system_params.use_parallel(slots) {
        parallel::ell_from_csr_parallel(
            csr,
            Some(width),
            config.ell_layout,
            config.ell_overflow,
            &config.system_params,
        )
    } else {
        EllMatrix::with_width(csr, width, config.ell_layout, config.ell_overflow)
    }
}

/// Converts `csr` into every derived format
///
/// The configuration is validated before the first conversion starts; a
/// failing conversion returns its error and no partial result.
///
/// # Examples
///
/// ```
/// use spmv_formats::{convert_all, ConversionConfig, CsrMatrix, SparseFormat};
///
/// let csr = CsrMatrix::<f64>::identity(5);
/// let formats = convert_all(&csr, &ConversionConfig::default()).unwrap();
///
/// assert_eq!(formats.ell.elements_in_rows, 1);
/// assert_eq!(formats.coo.elements_count(), 5);
/// assert_eq!(formats.scoo.elements_count(), 5);
/// assert_eq!(formats.hybrid.triplets().len(), 5);
/// ```
pub fn convert_all<T>(csr: &CsrMatrix<T>, config: &ConversionConfig) -> Result<ConvertedFormats<T>>
where
    T: Copy + Num + Send + Sync,
{
    config.validate()?;
    csr.require_payload()?;

    let ell = convert_ell(csr, config)?;
    let coo = CooMatrix::from_csr(csr)?;
    let hybrid = HybridMatrix::from_csr(csr, config.hybrid_percent, config.ell_layout)?;
    let scoo = ScooMatrix::from_csr(csr, config.scoo_slice_size)?;

    debug!(
        "converted {} × {} matrix (nnz {}, density {:.3e}): ELL {} slots, hybrid {} + {}",
        csr.meta.rows,
        csr.meta.cols,
        csr.nnz(),
        csr.meta.density(),
        ell.stored_elements(),
        hybrid.ell.stored_elements(),
        hybrid.coo.elements_count()
    );
    debug!(
        "SCOO: {} slices, {} empty, largest holds {} entries",
        scoo.slices_count(),
        scoo.slices().filter(|slice| slice.is_empty()).count(),
        scoo.slices().map(|slice| slice.len()).max().unwrap_or(0)
    );

    Ok(ConvertedFormats { ell, coo, hybrid, scoo })
}

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
