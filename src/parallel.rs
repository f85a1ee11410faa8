//! # Parallel ELL conversion
//!
//! The ELL fill is the only conversion whose output (rows × width slots)
//! can be much larger than the nonzero count, so it is the one worth
//! spreading over threads. Workers own disjoint output ranges fixed before
//! the pass starts, so no locking is involved:
//!
//! - row-major: each task owns a contiguous chunk of whole rows
//! - column-major: each task owns one slot index `k` across all rows

use num_traits::Num;
use rayon::prelude::*;

use crate::constants::PARALLEL_ROW_CHUNK;
use crate::error::{Error, Result};
use crate::matrix::config::SystemParameters;
use crate::matrix::ell::{check_overflow, EllLayout, EllMatrix, EllOverflow};
use crate::matrix::CsrMatrix;

/// Converts `csr` to ELL using a rayon pool of `params.n_threads` threads
///
/// Produces exactly the buffers of [`EllMatrix::with_width`] (or
/// [`EllMatrix::from_csr`] when `width` is None) and reports the same errors.
///
/// # Examples
///
/// ```
/// use spmv_formats::{CsrMatrix, EllLayout, EllOverflow, SystemParameters};
/// use spmv_formats::parallel::ell_from_csr_parallel;
///
/// let csr = CsrMatrix::<f64>::identity(4);
/// let params = SystemParameters { n_threads: 2, parallel_threshold: 0 };
/// let ell = ell_from_csr_parallel(&csr, None, EllLayout::RowMajor, EllOverflow::Reject, &params)
///     .unwrap();
///
/// assert_eq!(ell.elements_in_rows, 1);
/// assert_eq!(ell.columns, vec![0, 1, 2, 3]);
/// ```
pub fn ell_from_csr_parallel<T>(
    csr: &CsrMatrix<T>,
    width: Option<usize>,
    layout: EllLayout,
    overflow: EllOverflow,
    params: &SystemParameters,
) -> Result<EllMatrix<T>>
where
    T: Copy + Num + Send + Sync,
{
    csr.require_payload()?;
    let width = width.unwrap_or_else(|| csr.max_row_len());
    check_overflow(csr, width, overflow)?;

    let mut ell = EllMatrix::padded(csr.meta, width, layout)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(params.n_threads)
        .build()
        .map_err(|e| Error::invalid("n_threads", e.to_string()))?;

    pool.install(|| fill_parallel(csr, &mut ell));

    Ok(ell)
}

fn fill_parallel<T>(csr: &CsrMatrix<T>, ell: &mut EllMatrix<T>)
where
    T: Copy + Send + Sync,
{
    let rows = ell.meta.rows;
    let width = ell.elements_in_rows;
    if rows == 0 || width == 0 {
        return;
    }

    let data = &mut ell.data;
    let columns = &mut ell.columns;

    match ell.layout {
        EllLayout::RowMajor => {
            let chunk = width * PARALLEL_ROW_CHUNK;
            data.par_chunks_mut(chunk)
                .zip(columns.par_chunks_mut(chunk))
                .enumerate()
                .for_each(|(c, (data, cols))| {
                    let first_row = c * PARALLEL_ROW_CHUNK;

                    for (local, (d_row, c_row)) in
                        data.chunks_mut(width).zip(cols.chunks_mut(width)).enumerate()
                    {
                        let row = first_row + local;
                        let start = csr.row_ptr[row];
                        let end = csr.row_ptr[row + 1].min(start + width);
                        let n = end - start;

                        d_row[..n].copy_from_slice(&csr.data[start..end]);
                        c_row[..n].copy_from_slice(&csr.columns[start..end]);
                    }
                });
        }
        EllLayout::ColumnMajor => {
            // Slot k of every row is the contiguous run [k * rows, (k + 1) * rows)
            data.par_chunks_mut(rows)
                .zip(columns.par_chunks_mut(rows))
                .enumerate()
                .for_each(|(k, (data, cols))| {
                    for row in 0..rows {
                        let idx = csr.row_ptr[row] + k;
                        if idx < csr.row_ptr[row + 1] {
                            data[row] = csr.data[idx];
                            cols[row] = csr.columns[idx];
                        }
                    }
                });
        }
    }
}
