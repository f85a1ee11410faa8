//! Nonzeros-per-row statistics
//!
//! Computed from a row_ptr array alone, so a row_ptr-only CSR is enough to
//! size an ELL buffer or pick a hybrid split before materializing payloads.

use crate::matrix::meta::MatrixMeta;

/// Summary of row lengths over all rows of a matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowStatistics {
    /// Shortest row
    pub min: usize,
    /// Longest row
    pub max: usize,
    /// Mean row length
    pub average: f64,
    /// Population standard deviation of row lengths
    pub std_dev: f64,
}

impl RowStatistics {
    /// Scans `row_ptr` (length `meta.rows + 1`) in two passes
    ///
    /// A matrix without rows yields all zeros.
    pub fn from_row_ptr(meta: &MatrixMeta, row_ptr: &[usize]) -> Self {
        let rows = meta.rows;
        if rows == 0 {
            return Self {
                min: 0,
                max: 0,
                average: 0.0,
                std_dev: 0.0,
            };
        }

        let lengths = || row_ptr[..=rows].windows(2).map(|w| w[1] - w[0]);

        let mut min = usize::MAX;
        let mut max = 0;
        let mut total = 0usize;
        for len in lengths() {
            min = min.min(len);
            max = max.max(len);
            total += len;
        }

        let average = total as f64 / rows as f64;
        let squared: f64 = lengths()
            .map(|len| {
                let d = len as f64 - average;
                d * d
            })
            .sum();

        Self {
            min,
            max,
            average,
            std_dev: (squared / rows as f64).sqrt(),
        }
    }
}
